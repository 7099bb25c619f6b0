//! Translational velocity and acceleration of one point relative to another.
//!
//! `v_M_RoSo_E` is the velocity of point `So` relative to point `Ro`, as seen (ie,
//! differentiated) in frame `M`, expressed in frame `E`. When `Ro` is the origin `Mo` of the
//! measured-in frame the monogram shortens to `v_MSo_E`, and that absolute velocity is just the
//! case `from == Mo`. `a_M_RoSo_E` is the corresponding acceleration.
//!
//! The free functions in this module are the textbook identities relating these quantities:
//!
//! - moving to another point of the same rigid body ([`shift_velocity`],
//!   [`shift_acceleration`]);
//! - changing the frame the derivative is taken in ([`change_measured_frame_velocity`],
//!   [`change_measured_frame_acceleration`]).
//!
//! Every operand must already be expressed in one common frame; re-express with
//! [`RotationMatrix::apply`] first otherwise.

use crate::angular::{AngularAcceleration, AngularVelocity};
use crate::error::{ensure_expressed_in, ensure_frame, FrameRole, Result};
use crate::frames::FrameId;
use crate::position::PositionVector;
use crate::rotation::{private, Reexpress, RotationMatrix};
use crate::units::LinearOrder;
use crate::Vector3;
use nalgebra::Rotation3;
use std::fmt::{self, Display, Formatter};
use std::marker::PhantomData;
use std::ops::Neg;
use typenum::{N1, N2};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Translational velocity `v_M_RoSo_E`, in meters per second.
pub type TranslationalVelocity = TranslationalVector<N1>;

/// Translational acceleration `a_M_RoSo_E`, in meters per second squared.
pub type TranslationalAcceleration = TranslationalVector<N2>;

/// A translational rate of order `Time` (see [`LinearOrder`]) of the point `to` relative to the
/// point `from`, differentiated in `measured_in` and with components written in the basis of
/// `expressed_in`.
///
/// Velocities and accelerations are different types, so they can't be mixed up:
///
/// ```compile_fail
/// # use kinemono::{FrameRegistry, TranslationalAcceleration, TranslationalVelocity};
/// # let mut frames = FrameRegistry::new();
/// # let (m, mo, so) = (frames.frame("M"), frames.frame("Mo"), frames.frame("So"));
/// let v: TranslationalVelocity = TranslationalAcceleration::zero(m, mo, so, m);
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require Time: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct TranslationalVector<Time>
where
    Time: LinearOrder,
{
    /// X, Y, Z in meters per `Time`
    pub(crate) inner: Vector3,
    measured_in: FrameId,
    from: FrameId,
    to: FrameId,
    expressed_in: FrameId,
    #[cfg_attr(feature = "serde", serde(skip))]
    unit: PhantomData<Time>,
}

// manual impls of Clone and Copy to avoid requiring Time: Copy + Clone
impl<Time: LinearOrder> Clone for TranslationalVector<Time> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<Time: LinearOrder> Copy for TranslationalVector<Time> {}

impl<Time: LinearOrder> PartialEq<Self> for TranslationalVector<Time> {
    fn eq(&self, other: &Self) -> bool {
        self.same_frames(other) && self.inner == other.inner
    }
}

impl<Time: LinearOrder> Display for TranslationalVector<Time> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) {}",
            self.inner.x,
            self.inner.y,
            self.inner.z,
            Time::SYMBOL
        )
    }
}

impl<Time: LinearOrder> TranslationalVector<Time> {
    pub(crate) fn from_nalgebra_vector(
        measured_in: FrameId,
        from: FrameId,
        to: FrameId,
        expressed_in: FrameId,
        inner: Vector3,
    ) -> Self {
        Self {
            inner,
            measured_in,
            from,
            to,
            expressed_in,
            unit: PhantomData,
        }
    }

    fn same_frames(&self, other: &Self) -> bool {
        self.measured_in == other.measured_in
            && self.from == other.from
            && self.to == other.to
            && self.expressed_in == other.expressed_in
    }

    /// Constructs the rate of `to` relative to `from` in `measured_in` from its Cartesian
    /// components in `expressed_in`.
    ///
    /// For an absolute velocity `v_MSo_E`, pass the origin of `M` as `from`.
    #[must_use]
    pub fn build(
        measured_in: FrameId,
        from: FrameId,
        to: FrameId,
        expressed_in: FrameId,
        [x, y, z]: [Time::Quantity; 3],
    ) -> Self {
        Self::from_nalgebra_vector(
            measured_in,
            from,
            to,
            expressed_in,
            Vector3::new(Time::to_si(x), Time::to_si(y), Time::to_si(z)),
        )
    }

    /// Like [`TranslationalVector::build`], with the components expressed in `measured_in`.
    #[must_use]
    pub fn in_measured_frame(
        measured_in: FrameId,
        from: FrameId,
        to: FrameId,
        components: [Time::Quantity; 3],
    ) -> Self {
        Self::build(measured_in, from, to, measured_in, components)
    }

    /// Constructs the rate with all components zero.
    #[must_use]
    pub fn zero(measured_in: FrameId, from: FrameId, to: FrameId, expressed_in: FrameId) -> Self {
        Self::from_nalgebra_vector(measured_in, from, to, expressed_in, Vector3::zeros())
    }

    /// Returns the frame the derivative is taken in (`M` in `v_M_RoSo_E`).
    #[must_use]
    pub fn measured_in(&self) -> FrameId {
        self.measured_in
    }

    /// Returns the reference point (`Ro` in `v_M_RoSo_E`).
    #[must_use]
    pub fn from(&self) -> FrameId {
        self.from
    }

    /// Returns the moving point (`So` in `v_M_RoSo_E`).
    #[must_use]
    pub fn to(&self) -> FrameId {
        self.to
    }

    /// Returns the frame the components are expressed in (`E` in `v_M_RoSo_E`).
    #[must_use]
    pub fn expressed_in(&self) -> FrameId {
        self.expressed_in
    }

    /// Returns the X, Y, and Z components.
    #[must_use]
    pub fn to_cartesian(&self) -> [Time::Quantity; 3] {
        [self.inner.x, self.inner.y, self.inner.z].map(Time::from_si)
    }

    /// Returns the components in meters per second (or per second squared).
    #[must_use]
    pub fn to_si(&self) -> Vector3 {
        self.inner
    }

    /// Returns the magnitude, which does not depend on the expressed-in frame (but does on the
    /// measured-in frame).
    #[must_use]
    pub fn magnitude(&self) -> Time::Quantity {
        Time::from_si(self.inner.norm())
    }

    /// Returns `v_M_SoRo_E` for `v_M_RoSo_E`.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::from_nalgebra_vector(
            self.measured_in,
            self.to,
            self.from,
            self.expressed_in,
            -self.inner,
        )
    }

    /// Computes `v_M_RoSo_E = v_M_XSo_E - v_M_XRo_E` from `self` (`v_M_XSo_E`) and `reference`
    /// (`v_M_XRo_E`).
    ///
    /// Both must be measured in and expressed in the same frames, and start from the same point
    /// `X`. Otherwise this returns [`Error::FrameMismatch`](crate::Error::FrameMismatch).
    pub fn relative(&self, reference: &Self) -> Result<Self> {
        ensure_frame(
            "relative",
            FrameRole::ExpressedIn,
            self.expressed_in,
            reference.expressed_in,
        )?;
        ensure_frame(
            "relative",
            FrameRole::MeasuredIn,
            self.measured_in,
            reference.measured_in,
        )?;
        ensure_frame("relative", FrameRole::From, self.from, reference.from)?;
        Ok(Self::from_nalgebra_vector(
            self.measured_in,
            reference.to,
            self.to,
            self.expressed_in,
            self.inner - reference.inner,
        ))
    }

    /// Re-expresses the rate using `rotation` (`R_EF` for a rate expressed in `F`).
    ///
    /// Shorthand for [`RotationMatrix::apply`].
    pub fn reexpress(self, rotation: &RotationMatrix) -> Result<Self> {
        rotation.apply(self)
    }
}

impl TranslationalVelocity {
    /// See [`shift_velocity`].
    pub fn shift(&self, w_ms: &AngularVelocity, r_so_sq: &PositionVector) -> Result<Self> {
        shift_velocity(self, w_ms, r_so_sq)
    }

    /// See [`change_measured_frame_velocity`].
    pub fn change_measured_frame(
        &self,
        w_nm: &AngularVelocity,
        r_ro_so: &PositionVector,
    ) -> Result<Self> {
        change_measured_frame_velocity(self, w_nm, r_ro_so)
    }
}

impl TranslationalAcceleration {
    /// See [`shift_acceleration`].
    pub fn shift(
        &self,
        alpha_ms: &AngularAcceleration,
        w_ms: &AngularVelocity,
        r_so_sq: &PositionVector,
    ) -> Result<Self> {
        shift_acceleration(self, alpha_ms, w_ms, r_so_sq)
    }

    /// See [`change_measured_frame_acceleration`].
    pub fn change_measured_frame(
        &self,
        alpha_nm: &AngularAcceleration,
        w_nm: &AngularVelocity,
        r_ro_so: &PositionVector,
        v_m_ro_so: &TranslationalVelocity,
    ) -> Result<Self> {
        change_measured_frame_acceleration(self, alpha_nm, w_nm, r_ro_so, v_m_ro_so)
    }
}

/// Computes the velocity `v_MSq_E` of a point `Sq` fixed on frame `S` from the velocity
/// `v_MSo_E` of another point `So` of `S`:
///
/// ```text
/// v_MSq = v_MSo + w_MS × p_SoSq
/// ```
///
/// `w_ms` must be measured in the same frame as `v_mso`, and `r_so_sq` must start at the point
/// `v_mso` is the velocity of. That `So` and `Sq` are in fact both fixed on `S` is up to the
/// caller.
///
/// ```rust
/// use kinemono::{
///     translational::shift_velocity, AngularVelocity, FrameRegistry, PositionVector,
///     TranslationalVelocity, Vector3,
/// };
/// use uom::si::f64::{AngularVelocity as Rate, Length, Velocity};
/// use uom::si::{angular_velocity::radian_per_second, length::meter, velocity::meter_per_second};
///
/// let mut frames = FrameRegistry::new();
/// let (m, s) = (frames.frame("M"), frames.frame("S"));
/// let (mo, so, sq) = (frames.origin(m)?, frames.origin(s)?, frames.point(s, "q")?);
///
/// let v_mso = TranslationalVelocity::in_measured_frame(
///     m, mo, so, [1., 0., 0.].map(Velocity::new::<meter_per_second>),
/// );
/// let w_ms = AngularVelocity::in_measured_frame(
///     m, s, [0., 0., 1.].map(Rate::new::<radian_per_second>),
/// );
/// let p_sosq = PositionVector::build(so, sq, m, [0., 1., 0.].map(Length::new::<meter>));
///
/// // Sq is exactly where S's spin cancels its drift
/// let v_msq = shift_velocity(&v_mso, &w_ms, &p_sosq)?;
/// assert_eq!(v_msq.to(), sq);
/// assert_eq!(v_msq.to_si(), Vector3::zeros());
/// # Ok::<(), kinemono::Error>(())
/// ```
pub fn shift_velocity(
    v_mso: &TranslationalVelocity,
    w_ms: &AngularVelocity,
    r_so_sq: &PositionVector,
) -> Result<TranslationalVelocity> {
    const OP: &str = "shift";
    ensure_expressed_in(
        OP,
        v_mso.expressed_in,
        [w_ms.expressed_in(), r_so_sq.expressed_in()],
    )?;
    ensure_frame(OP, FrameRole::MeasuredIn, v_mso.measured_in, w_ms.measured_in())?;
    ensure_frame(OP, FrameRole::From, v_mso.to, r_so_sq.from())?;

    Ok(TranslationalVelocity::from_nalgebra_vector(
        v_mso.measured_in,
        v_mso.from,
        r_so_sq.to(),
        v_mso.expressed_in,
        v_mso.inner + w_ms.inner.cross(&r_so_sq.inner),
    ))
}

/// Computes the acceleration `a_MSq_E` of a point `Sq` fixed on frame `S` from the acceleration
/// `a_MSo_E` of another point `So` of `S`:
///
/// ```text
/// a_MSq = a_MSo + alpha_MS × p_SoSq + w_MS × (w_MS × p_SoSq)
/// ```
///
/// `alpha_ms` and `w_ms` must both describe the same frame measured in the same frame as
/// `a_mso`, and `r_so_sq` must start at the point `a_mso` is the acceleration of.
pub fn shift_acceleration(
    a_mso: &TranslationalAcceleration,
    alpha_ms: &AngularAcceleration,
    w_ms: &AngularVelocity,
    r_so_sq: &PositionVector,
) -> Result<TranslationalAcceleration> {
    const OP: &str = "shift";
    ensure_expressed_in(
        OP,
        a_mso.expressed_in,
        [
            alpha_ms.expressed_in(),
            w_ms.expressed_in(),
            r_so_sq.expressed_in(),
        ],
    )?;
    ensure_frame(OP, FrameRole::MeasuredIn, a_mso.measured_in, alpha_ms.measured_in())?;
    ensure_frame(OP, FrameRole::MeasuredIn, a_mso.measured_in, w_ms.measured_in())?;
    ensure_frame(OP, FrameRole::Of, alpha_ms.of(), w_ms.of())?;
    ensure_frame(OP, FrameRole::From, a_mso.to, r_so_sq.from())?;

    let w = w_ms.inner;
    let r = r_so_sq.inner;
    Ok(TranslationalAcceleration::from_nalgebra_vector(
        a_mso.measured_in,
        a_mso.from,
        r_so_sq.to(),
        a_mso.expressed_in,
        a_mso.inner + alpha_ms.inner.cross(&r) + w.cross(&w.cross(&r)),
    ))
}

/// Computes `v_N_RoSo_E` from `v_M_RoSo_E`, where frame `M` rotates in frame `N` with angular
/// velocity `w_NM_E`:
///
/// ```text
/// v_N_RoSo = v_M_RoSo + w_NM × p_RoSo
/// ```
///
/// This is the "golden rule" for differentiating a vector in two frames. `w_nm` must describe
/// the rotation of the frame `v_m_ro_so` is measured in, and `r_ro_so` must run between the same
/// two points as `v_m_ro_so`.
pub fn change_measured_frame_velocity(
    v_m_ro_so: &TranslationalVelocity,
    w_nm: &AngularVelocity,
    r_ro_so: &PositionVector,
) -> Result<TranslationalVelocity> {
    const OP: &str = "change_measured_frame";
    ensure_expressed_in(
        OP,
        v_m_ro_so.expressed_in,
        [w_nm.expressed_in(), r_ro_so.expressed_in()],
    )?;
    ensure_frame(OP, FrameRole::Of, v_m_ro_so.measured_in, w_nm.of())?;
    ensure_frame(OP, FrameRole::From, v_m_ro_so.from, r_ro_so.from())?;
    ensure_frame(OP, FrameRole::To, v_m_ro_so.to, r_ro_so.to())?;

    Ok(TranslationalVelocity::from_nalgebra_vector(
        w_nm.measured_in(),
        v_m_ro_so.from,
        v_m_ro_so.to,
        v_m_ro_so.expressed_in,
        v_m_ro_so.inner + w_nm.inner.cross(&r_ro_so.inner),
    ))
}

/// Computes `a_N_RoSo_E` from `a_M_RoSo_E`, where frame `M` rotates in frame `N` with angular
/// velocity `w_NM_E` and angular acceleration `alpha_NM_E`:
///
/// ```text
/// a_N_RoSo = a_M_RoSo + alpha_NM × p_RoSo + w_NM × (w_NM × p_RoSo) + 2 w_NM × v_M_RoSo
/// ```
///
/// The last term is the Coriolis acceleration. `alpha_nm` and `w_nm` must both describe the
/// rotation of the frame `a_m_ro_so` is measured in, and `r_ro_so` and `v_m_ro_so` must relate
/// the same two points as `a_m_ro_so` (with `v_m_ro_so` also measured in `M`).
pub fn change_measured_frame_acceleration(
    a_m_ro_so: &TranslationalAcceleration,
    alpha_nm: &AngularAcceleration,
    w_nm: &AngularVelocity,
    r_ro_so: &PositionVector,
    v_m_ro_so: &TranslationalVelocity,
) -> Result<TranslationalAcceleration> {
    const OP: &str = "change_measured_frame";
    ensure_expressed_in(
        OP,
        a_m_ro_so.expressed_in,
        [
            alpha_nm.expressed_in(),
            w_nm.expressed_in(),
            r_ro_so.expressed_in(),
            v_m_ro_so.expressed_in,
        ],
    )?;
    ensure_frame(OP, FrameRole::Of, a_m_ro_so.measured_in, alpha_nm.of())?;
    ensure_frame(OP, FrameRole::Of, alpha_nm.of(), w_nm.of())?;
    ensure_frame(OP, FrameRole::MeasuredIn, alpha_nm.measured_in(), w_nm.measured_in())?;
    ensure_frame(OP, FrameRole::MeasuredIn, a_m_ro_so.measured_in, v_m_ro_so.measured_in)?;
    for (from, to) in [
        (r_ro_so.from(), r_ro_so.to()),
        (v_m_ro_so.from, v_m_ro_so.to),
    ] {
        ensure_frame(OP, FrameRole::From, a_m_ro_so.from, from)?;
        ensure_frame(OP, FrameRole::To, a_m_ro_so.to, to)?;
    }

    let w = w_nm.inner;
    let r = r_ro_so.inner;
    Ok(TranslationalAcceleration::from_nalgebra_vector(
        alpha_nm.measured_in(),
        a_m_ro_so.from,
        a_m_ro_so.to,
        a_m_ro_so.expressed_in,
        a_m_ro_so.inner
            + alpha_nm.inner.cross(&r)
            + w.cross(&w.cross(&r))
            + 2. * w.cross(&v_m_ro_so.inner),
    ))
}

impl<Time: LinearOrder> Neg for TranslationalVector<Time> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<Time: LinearOrder> private::Sealed for TranslationalVector<Time> {}

impl<Time: LinearOrder> Reexpress for TranslationalVector<Time> {
    fn expressed_in(&self) -> FrameId {
        self.expressed_in
    }

    fn reexpressed(self, rotation: &Rotation3<f64>, expressed_in: FrameId) -> Self {
        Self {
            inner: rotation * self.inner,
            expressed_in,
            ..self
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl<Time: LinearOrder> AbsDiffEq<Self> for TranslationalVector<Time> {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Vector3::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.same_frames(other) && self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<Time: LinearOrder> RelativeEq for TranslationalVector<Time> {
    fn default_max_relative() -> Self::Epsilon {
        Vector3::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.same_frames(other) && self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}
