//! Angular velocity and angular acceleration of one frame in another.
//!
//! `w_MS_E` is the angular velocity of frame `S` measured in frame `M`, expressed in frame `E`;
//! `alpha_MS_E` is its time derivative taken in `M`. When `E` is `M` the expressed-in frame is
//! usually left out of the monogram (`w_MS`), and [`AngularVector::in_measured_frame`] builds
//! exactly that case.
//!
//! Angular velocities chain by addition (`w_MT = w_MS + w_ST`), see
//! [`AngularVelocity::compose`]. Angular accelerations do _not_: differentiating that sum in `M`
//! picks up a cross term, so the chain rule is the separate
//! [`AngularAcceleration::transport`].

use crate::error::{ensure_expressed_in, ensure_frame, FrameRole, Result};
use crate::frames::FrameId;
use crate::rotation::{private, Reexpress, RotationMatrix};
use crate::units::AngularOrder;
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

/// Angular velocity `w_MS_E`, in radians per second.
pub type AngularVelocity = AngularVector<N1>;

/// Angular acceleration `alpha_MS_E`, in radians per second squared.
///
/// Unlike [`AngularVelocity`], angular accelerations of chained frames cannot simply be added,
/// so there is no `compose` (and no `+`) for them:
///
/// ```compile_fail
/// # use kinemono::{AngularAcceleration, FrameRegistry};
/// # let mut frames = FrameRegistry::new();
/// # let (m, s, t) = (frames.frame("M"), frames.frame("S"), frames.frame("T"));
/// let alpha_ms = AngularAcceleration::zero(m, s, m);
/// let alpha_st = AngularAcceleration::zero(s, t, m);
/// let alpha_mt = alpha_ms.compose(&alpha_st);
/// ```
///
/// Use [`AngularAcceleration::transport`] instead.
pub type AngularAcceleration = AngularVector<N2>;

/// A rotational quantity of order `Time` (see [`AngularOrder`]) of the frame `of` measured in
/// the frame `measured_in`, with components written in the basis of `expressed_in`.
///
/// You will normally use this through the [`AngularVelocity`] and [`AngularAcceleration`]
/// aliases.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require Time: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct AngularVector<Time>
where
    Time: AngularOrder,
{
    /// X, Y, Z in radians per `Time`
    pub(crate) inner: Vector3,
    measured_in: FrameId,
    of: FrameId,
    expressed_in: FrameId,
    #[cfg_attr(feature = "serde", serde(skip))]
    unit: PhantomData<Time>,
}

// manual impls of Clone and Copy to avoid requiring Time: Copy + Clone
impl<Time: AngularOrder> Clone for AngularVector<Time> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<Time: AngularOrder> Copy for AngularVector<Time> {}

impl<Time: AngularOrder> PartialEq<Self> for AngularVector<Time> {
    fn eq(&self, other: &Self) -> bool {
        self.measured_in == other.measured_in
            && self.of == other.of
            && self.expressed_in == other.expressed_in
            && self.inner == other.inner
    }
}

impl<Time: AngularOrder> Display for AngularVector<Time> {
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

impl<Time: AngularOrder> AngularVector<Time> {
    pub(crate) fn from_nalgebra_vector(
        measured_in: FrameId,
        of: FrameId,
        expressed_in: FrameId,
        inner: Vector3,
    ) -> Self {
        Self {
            inner,
            measured_in,
            of,
            expressed_in,
            unit: PhantomData,
        }
    }

    /// Constructs the quantity of `of` measured in `measured_in` from its Cartesian components
    /// in `expressed_in`.
    #[must_use]
    pub fn build(
        measured_in: FrameId,
        of: FrameId,
        expressed_in: FrameId,
        [x, y, z]: [Time::Quantity; 3],
    ) -> Self {
        Self::from_nalgebra_vector(
            measured_in,
            of,
            expressed_in,
            Vector3::new(Time::to_si(x), Time::to_si(y), Time::to_si(z)),
        )
    }

    /// Like [`AngularVector::build`], with the components expressed in `measured_in`.
    ///
    /// This is the `w_MS` (short for `w_MS_M`) shorthand.
    #[must_use]
    pub fn in_measured_frame(
        measured_in: FrameId,
        of: FrameId,
        components: [Time::Quantity; 3],
    ) -> Self {
        Self::build(measured_in, of, measured_in, components)
    }

    /// Constructs the quantity with all components zero, as for two frames that don't rotate
    /// relative to each other.
    #[must_use]
    pub fn zero(measured_in: FrameId, of: FrameId, expressed_in: FrameId) -> Self {
        Self::from_nalgebra_vector(measured_in, of, expressed_in, Vector3::zeros())
    }

    /// Returns the frame the rate is measured in (`M` in `w_MS_E`).
    #[must_use]
    pub fn measured_in(&self) -> FrameId {
        self.measured_in
    }

    /// Returns the rotating frame (`S` in `w_MS_E`).
    #[must_use]
    pub fn of(&self) -> FrameId {
        self.of
    }

    /// Returns the frame the components are expressed in (`E` in `w_MS_E`).
    #[must_use]
    pub fn expressed_in(&self) -> FrameId {
        self.expressed_in
    }

    /// Returns the X, Y, and Z components.
    #[must_use]
    pub fn to_cartesian(&self) -> [Time::Quantity; 3] {
        [self.inner.x, self.inner.y, self.inner.z].map(Time::from_si)
    }

    /// Returns the components in radians per second (or per second squared).
    #[must_use]
    pub fn to_si(&self) -> Vector3 {
        self.inner
    }

    /// Returns the magnitude, which does not depend on the expressed-in frame.
    #[must_use]
    pub fn magnitude(&self) -> Time::Quantity {
        Time::from_si(self.inner.norm())
    }

    /// Returns `w_SM_E` for `w_MS_E` (or `alpha_SM_E` for `alpha_MS_E`).
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::from_nalgebra_vector(self.of, self.measured_in, self.expressed_in, -self.inner)
    }

    /// Re-expresses the quantity using `rotation` (`R_EF` for a quantity expressed in `F`).
    ///
    /// Shorthand for [`RotationMatrix::apply`].
    pub fn reexpress(self, rotation: &RotationMatrix) -> Result<Self> {
        rotation.apply(self)
    }
}

impl AngularVelocity {
    /// Computes `w_MT_E = w_MS_E + w_ST_E` from `self` (`w_MS_E`) and `rhs` (`w_ST_E`).
    ///
    /// ```rust
    /// use kinemono::{AngularVelocity, FrameRegistry};
    /// use uom::si::{angular_velocity::radian_per_second, f64::AngularVelocity as Rate};
    ///
    /// let rad_s = Rate::new::<radian_per_second>;
    /// let mut frames = FrameRegistry::new();
    /// let (m, s, t) = (frames.frame("M"), frames.frame("S"), frames.frame("T"));
    ///
    /// let w_ms = AngularVelocity::in_measured_frame(m, s, [rad_s(0.), rad_s(0.), rad_s(1.)]);
    /// let w_st = AngularVelocity::build(s, t, m, [rad_s(0.), rad_s(0.), rad_s(2.)]);
    /// let w_mt = w_ms.compose(&w_st)?;
    ///
    /// assert_eq!((w_mt.measured_in(), w_mt.of()), (m, t));
    /// assert_eq!(w_mt.to_cartesian()[2], rad_s(3.));
    /// # Ok::<(), kinemono::Error>(())
    /// ```
    ///
    /// Returns [`Error::FrameMismatch`](crate::Error::FrameMismatch) unless both are expressed
    /// in the same frame and `rhs` is measured in the frame `self` is the rotation of.
    pub fn compose(&self, rhs: &AngularVelocity) -> Result<AngularVelocity> {
        ensure_frame(
            "compose",
            FrameRole::ExpressedIn,
            self.expressed_in,
            rhs.expressed_in,
        )?;
        ensure_frame("compose", FrameRole::MeasuredIn, self.of, rhs.measured_in)?;
        Ok(Self::from_nalgebra_vector(
            self.measured_in,
            rhs.of,
            self.expressed_in,
            self.inner + rhs.inner,
        ))
    }
}

impl AngularAcceleration {
    /// Computes `alpha_MT_E` for a frame `T` whose motion is known relative to `S`, which in
    /// turn moves relative to `M`:
    ///
    /// ```text
    /// alpha_MT = alpha_MS + alpha_ST + w_MS × w_ST
    /// ```
    ///
    /// The cross term is what makes plain addition wrong: `alpha_ST` is the derivative of
    /// `w_ST` in `S`, but `alpha_MT` needs its derivative in `M`.
    ///
    /// All four operands must be expressed in the same frame. `alpha_st` must be measured in the
    /// frame `alpha_ms` is the rotation of, and `w_ms` and `w_st` must carry the same
    /// measured-in and rotating frames as `alpha_ms` and `alpha_st` respectively. Otherwise this
    /// returns [`Error::FrameMismatch`](crate::Error::FrameMismatch).
    pub fn transport(
        alpha_ms: &AngularAcceleration,
        alpha_st: &AngularAcceleration,
        w_ms: &AngularVelocity,
        w_st: &AngularVelocity,
    ) -> Result<AngularAcceleration> {
        const OP: &str = "transport";
        ensure_expressed_in(
            OP,
            alpha_ms.expressed_in,
            [alpha_st.expressed_in, w_ms.expressed_in, w_st.expressed_in],
        )?;
        ensure_frame(OP, FrameRole::MeasuredIn, alpha_ms.of, alpha_st.measured_in)?;
        ensure_frame(OP, FrameRole::MeasuredIn, alpha_ms.measured_in, w_ms.measured_in)?;
        ensure_frame(OP, FrameRole::Of, alpha_ms.of, w_ms.of)?;
        ensure_frame(OP, FrameRole::MeasuredIn, alpha_st.measured_in, w_st.measured_in)?;
        ensure_frame(OP, FrameRole::Of, alpha_st.of, w_st.of)?;

        Ok(Self::from_nalgebra_vector(
            alpha_ms.measured_in,
            alpha_st.of,
            alpha_ms.expressed_in,
            alpha_ms.inner + alpha_st.inner + w_ms.inner.cross(&w_st.inner),
        ))
    }
}

impl<Time: AngularOrder> Neg for AngularVector<Time> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<Time: AngularOrder> private::Sealed for AngularVector<Time> {}

impl<Time: AngularOrder> Reexpress for AngularVector<Time> {
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
impl<Time: AngularOrder> AbsDiffEq<Self> for AngularVector<Time> {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Vector3::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.measured_in == other.measured_in
            && self.of == other.of
            && self.expressed_in == other.expressed_in
            && self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<Time: AngularOrder> RelativeEq for AngularVector<Time> {
    fn default_max_relative() -> Self::Epsilon {
        Vector3::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.measured_in == other.measured_in
            && self.of == other.of
            && self.expressed_in == other.expressed_in
            && self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}
