//! Spatial velocity and acceleration: a rotational part stacked over a translational part.
//!
//! `V_MSa_E = [w_MS_E ; v_MSa_E]` is the spatial velocity of the offset frame `Sa` (aligned with
//! `S`, with its origin at the point `Sa`) measured in `M`. Its relative form,
//! `V_M_RbSa_E = [w_RS_E ; v_M_RbSa_E]`, is what [`SpatialVelocity::relative`] produces: note
//! that the rotational half is then measured in `R`, while the translational half stays
//! measured in `M`. Spatial accelerations follow the same layout with `alpha` and `a`.
//!
//! These types only bundle the operations of [`AngularVelocity`], [`AngularAcceleration`] and
//! [`crate::translational`], which do all the tag checking.

use crate::angular::{AngularAcceleration, AngularVelocity};
use crate::error::{ensure_frame, FrameRole, Result};
use crate::frames::FrameId;
use crate::position::PositionVector;
use crate::rotation::{private, Reexpress, RotationMatrix};
use crate::translational::{TranslationalAcceleration, TranslationalVelocity};
use crate::Vector6;
use nalgebra::Rotation3;
use std::fmt::{self, Display, Formatter};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Checks the precondition shared by [`SpatialVelocity::new`] and [`SpatialAcceleration::new`].
fn ensure_halves_agree(
    rotational: (FrameId, FrameId),
    translational: (FrameId, FrameId),
) -> Result<()> {
    let ((rotational_measured_in, rotational_expressed_in), (measured_in, expressed_in)) =
        (rotational, translational);
    ensure_frame(
        "spatial",
        FrameRole::ExpressedIn,
        rotational_expressed_in,
        expressed_in,
    )?;
    ensure_frame(
        "spatial",
        FrameRole::MeasuredIn,
        rotational_measured_in,
        measured_in,
    )
}

/// The spatial velocity `V_MSa_E` (or, from [`SpatialVelocity::relative`], `V_M_RbSa_E`).
///
/// Deserializing does not re-check that the two halves agree on their frames.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpatialVelocity {
    rotational: AngularVelocity,
    translational: TranslationalVelocity,
}

impl Display for SpatialVelocity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}; {}]", self.rotational, self.translational)
    }
}

impl SpatialVelocity {
    /// Stacks `w_MS_E` over `v_MSa_E`.
    ///
    /// Returns [`Error::FrameMismatch`](crate::Error::FrameMismatch) unless both halves are
    /// measured in and expressed in the same frames.
    pub fn new(w_ms: AngularVelocity, v_msa: TranslationalVelocity) -> Result<Self> {
        ensure_halves_agree(
            (w_ms.measured_in(), w_ms.expressed_in()),
            (v_msa.measured_in(), v_msa.expressed_in()),
        )?;
        Ok(Self {
            rotational: w_ms,
            translational: v_msa,
        })
    }

    /// Returns the rotational half.
    #[must_use]
    pub fn rotational(&self) -> AngularVelocity {
        self.rotational
    }

    /// Returns the translational half.
    #[must_use]
    pub fn translational(&self) -> TranslationalVelocity {
        self.translational
    }

    /// Returns the frame the translational half is measured in (`M`).
    #[must_use]
    pub fn measured_in(&self) -> FrameId {
        self.translational.measured_in()
    }

    /// Returns the frame both halves are expressed in (`E`).
    #[must_use]
    pub fn expressed_in(&self) -> FrameId {
        self.translational.expressed_in()
    }

    /// Returns the six components, rotational part first, in SI units.
    #[must_use]
    pub fn to_si(&self) -> Vector6 {
        let (w, v) = (self.rotational.inner, self.translational.inner);
        Vector6::new(w.x, w.y, w.z, v.x, v.y, v.z)
    }

    /// Re-expresses both halves using `rotation`.
    ///
    /// Shorthand for [`RotationMatrix::apply`].
    pub fn reexpress(self, rotation: &RotationMatrix) -> Result<Self> {
        rotation.apply(self)
    }

    /// Computes `V_MSq_E` from `V_MSo_E` for a point `Sq` fixed on the same frame as `So`.
    ///
    /// The rotational half is unchanged; the translational half follows
    /// [`shift_velocity`](crate::translational::shift_velocity).
    pub fn shift(&self, r_so_sq: &PositionVector) -> Result<Self> {
        Ok(Self {
            rotational: self.rotational,
            translational: self.translational.shift(&self.rotational, r_so_sq)?,
        })
    }

    /// Computes `V_N_MoSo_E` (`[w_NS_E ; v_N_MoSo_E]`) from `V_MSo_E` given `w_NM_E`:
    ///
    /// ```text
    /// V_N = [w_NM + w_MS ; v_M + w_NM × r]
    /// ```
    ///
    /// `r` is the position of the moving point relative to the translational half's reference
    /// point, which the result keeps. So the translational half is still relative to `Mo`, and
    /// is only the absolute `v_NSo_E` when `Mo` doesn't move in `N`.
    pub fn change_measured_frame(&self, w_nm: &AngularVelocity, r: &PositionVector) -> Result<Self> {
        Ok(Self {
            rotational: w_nm.compose(&self.rotational)?,
            translational: self.translational.change_measured_frame(w_nm, r)?,
        })
    }

    /// Computes `V_M_RbSa_E` from `self` (`V_MSa_E`) and `reference` (`V_MRb_E`).
    ///
    /// The rotational half becomes `w_RS_E = w_MS_E - w_MR_E`, the translational half
    /// `v_M_RbSa_E = v_MSa_E - v_MRb_E`.
    pub fn relative(&self, reference: &SpatialVelocity) -> Result<Self> {
        ensure_frame(
            "relative",
            FrameRole::MeasuredIn,
            reference.rotational.measured_in(),
            self.rotational.measured_in(),
        )?;
        Ok(Self {
            rotational: reference.rotational.negate().compose(&self.rotational)?,
            translational: self.translational.relative(&reference.translational)?,
        })
    }
}

/// The spatial acceleration `A_MSa_E` (or, from [`SpatialAcceleration::relative`],
/// `A_M_RbSa_E`).
///
/// Deserializing does not re-check that the two halves agree on their frames.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpatialAcceleration {
    rotational: AngularAcceleration,
    translational: TranslationalAcceleration,
}

impl Display for SpatialAcceleration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}; {}]", self.rotational, self.translational)
    }
}

impl SpatialAcceleration {
    /// Stacks `alpha_MS_E` over `a_MSa_E`.
    ///
    /// Returns [`Error::FrameMismatch`](crate::Error::FrameMismatch) unless both halves are
    /// measured in and expressed in the same frames.
    pub fn new(alpha_ms: AngularAcceleration, a_msa: TranslationalAcceleration) -> Result<Self> {
        ensure_halves_agree(
            (alpha_ms.measured_in(), alpha_ms.expressed_in()),
            (a_msa.measured_in(), a_msa.expressed_in()),
        )?;
        Ok(Self {
            rotational: alpha_ms,
            translational: a_msa,
        })
    }

    /// Returns the rotational half.
    #[must_use]
    pub fn rotational(&self) -> AngularAcceleration {
        self.rotational
    }

    /// Returns the translational half.
    #[must_use]
    pub fn translational(&self) -> TranslationalAcceleration {
        self.translational
    }

    /// Returns the frame the translational half is measured in (`M`).
    #[must_use]
    pub fn measured_in(&self) -> FrameId {
        self.translational.measured_in()
    }

    /// Returns the frame both halves are expressed in (`E`).
    #[must_use]
    pub fn expressed_in(&self) -> FrameId {
        self.translational.expressed_in()
    }

    /// Returns the six components, rotational part first, in SI units.
    #[must_use]
    pub fn to_si(&self) -> Vector6 {
        let (alpha, a) = (self.rotational.inner, self.translational.inner);
        Vector6::new(alpha.x, alpha.y, alpha.z, a.x, a.y, a.z)
    }

    /// Re-expresses both halves using `rotation`.
    ///
    /// Shorthand for [`RotationMatrix::apply`].
    pub fn reexpress(self, rotation: &RotationMatrix) -> Result<Self> {
        rotation.apply(self)
    }

    /// Computes `A_MSq_E` from `A_MSo_E` for a point `Sq` fixed on the same frame as `So`.
    ///
    /// Unlike velocities, this needs the angular velocity `w_MS_E` of the frame as well.
    pub fn shift(&self, w_ms: &AngularVelocity, r_so_sq: &PositionVector) -> Result<Self> {
        Ok(Self {
            rotational: self.rotational,
            translational: self.translational.shift(&self.rotational, w_ms, r_so_sq)?,
        })
    }

    /// Computes `A_N_MoSo_E` (`[alpha_NS_E ; a_N_MoSo_E]`) from `A_MSo_E`, given the spatial
    /// velocity `V_MSo_E` of the same point and the motion (`alpha_NM_E`, `w_NM_E`) of `M` in
    /// `N`:
    ///
    /// ```text
    /// A_N = [alpha_NM + alpha_MS + w_NM × w_MS ; a_M + alpha_NM × r + w_NM × (w_NM × r) + 2 w_NM × v_M]
    /// ```
    ///
    /// Like [`SpatialVelocity::change_measured_frame`], the result keeps the reference point
    /// `Mo` of the translational half. See [`AngularAcceleration::transport`] and
    /// [`change_measured_frame_acceleration`](crate::translational::change_measured_frame_acceleration).
    pub fn change_measured_frame(
        &self,
        velocity: &SpatialVelocity,
        alpha_nm: &AngularAcceleration,
        w_nm: &AngularVelocity,
        r: &PositionVector,
    ) -> Result<Self> {
        Ok(Self {
            rotational: AngularAcceleration::transport(
                alpha_nm,
                &self.rotational,
                w_nm,
                &velocity.rotational,
            )?,
            translational: self.translational.change_measured_frame(
                alpha_nm,
                w_nm,
                r,
                &velocity.translational,
            )?,
        })
    }

    /// Computes `A_M_RbSa_E` from `self` (`A_MSa_E`) and `reference` (`A_MRb_E`), given the
    /// angular velocities `w_MR_E` and `w_MS_E`.
    ///
    /// The rotational half is `alpha_RS = alpha_MS - alpha_MR - w_MR × w_RS`, which inverts
    /// [`AngularAcceleration::transport`]. The translational half is `a_MSa - a_MRb`.
    pub fn relative(
        &self,
        reference: &SpatialAcceleration,
        w_mr: &AngularVelocity,
        w_ms: &AngularVelocity,
    ) -> Result<Self> {
        const OP: &str = "relative";
        let alpha_ms = &self.rotational;
        let alpha_mr = &reference.rotational;
        ensure_frame(OP, FrameRole::MeasuredIn, alpha_mr.measured_in(), alpha_ms.measured_in())?;
        for (alpha, w) in [(alpha_mr, w_mr), (alpha_ms, w_ms)] {
            ensure_frame(OP, FrameRole::ExpressedIn, alpha.expressed_in(), w.expressed_in())?;
            ensure_frame(OP, FrameRole::MeasuredIn, alpha.measured_in(), w.measured_in())?;
            ensure_frame(OP, FrameRole::Of, alpha.of(), w.of())?;
        }

        let w_rs = w_mr.negate().compose(w_ms)?;
        let alpha_rs = AngularAcceleration::from_nalgebra_vector(
            w_rs.measured_in(),
            w_rs.of(),
            w_rs.expressed_in(),
            alpha_ms.inner - alpha_mr.inner - w_mr.inner.cross(&w_rs.inner),
        );
        Ok(Self {
            rotational: alpha_rs,
            translational: self.translational.relative(&reference.translational)?,
        })
    }
}

impl private::Sealed for SpatialVelocity {}

impl Reexpress for SpatialVelocity {
    fn expressed_in(&self) -> FrameId {
        self.translational.expressed_in()
    }

    fn reexpressed(self, rotation: &Rotation3<f64>, expressed_in: FrameId) -> Self {
        Self {
            rotational: self.rotational.reexpressed(rotation, expressed_in),
            translational: self.translational.reexpressed(rotation, expressed_in),
        }
    }
}

impl private::Sealed for SpatialAcceleration {}

impl Reexpress for SpatialAcceleration {
    fn expressed_in(&self) -> FrameId {
        self.translational.expressed_in()
    }

    fn reexpressed(self, rotation: &Rotation3<f64>, expressed_in: FrameId) -> Self {
        Self {
            rotational: self.rotational.reexpressed(rotation, expressed_in),
            translational: self.translational.reexpressed(rotation, expressed_in),
        }
    }
}

macro_rules! impl_approx {
    ($spatial:ty) => {
        #[cfg(any(test, feature = "approx"))]
        impl AbsDiffEq<Self> for $spatial {
            type Epsilon = <f64 as AbsDiffEq>::Epsilon;

            fn default_epsilon() -> Self::Epsilon {
                Vector6::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                self.rotational.abs_diff_eq(&other.rotational, epsilon)
                    && self.translational.abs_diff_eq(&other.translational, epsilon)
            }
        }

        #[cfg(any(test, feature = "approx"))]
        impl RelativeEq for $spatial {
            fn default_max_relative() -> Self::Epsilon {
                Vector6::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                self.rotational
                    .relative_eq(&other.rotational, epsilon, max_relative)
                    && self
                        .translational
                        .relative_eq(&other.translational, epsilon, max_relative)
            }
        }
    };
}

impl_approx!(SpatialVelocity);
impl_approx!(SpatialAcceleration);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Angles, Triple};
    use crate::{Error, FrameRegistry, Monogram, Vector3};
    use approx::assert_relative_eq;
    use quickcheck::quickcheck;
    use uom::si::acceleration::meter_per_second_squared;
    use uom::si::angular_acceleration::radian_per_second_squared;
    use uom::si::angular_velocity::radian_per_second;
    use uom::si::f64 as si;
    use uom::si::length::meter;
    use uom::si::velocity::meter_per_second;

    fn v(xyz: [f64; 3]) -> [si::Velocity; 3] {
        xyz.map(si::Velocity::new::<meter_per_second>)
    }
    fn a(xyz: [f64; 3]) -> [si::Acceleration; 3] {
        xyz.map(si::Acceleration::new::<meter_per_second_squared>)
    }
    fn w(xyz: [f64; 3]) -> [si::AngularVelocity; 3] {
        xyz.map(si::AngularVelocity::new::<radian_per_second>)
    }
    fn alpha(xyz: [f64; 3]) -> [si::AngularAcceleration; 3] {
        xyz.map(si::AngularAcceleration::new::<radian_per_second_squared>)
    }
    fn meters(xyz: [f64; 3]) -> [si::Length; 3] {
        xyz.map(si::Length::new::<meter>)
    }

    #[test]
    fn halves_must_agree() {
        let mut frames = FrameRegistry::new();
        let m = frames.frame("M");
        let n = frames.frame("N");
        let s = frames.frame("S");
        let mo = frames.origin(m).unwrap();
        let sa = frames.offset_frame(s, "a").unwrap();

        let w_ms = AngularVelocity::in_measured_frame(m, s, w([0., 0., 1.]));
        let v_msa = TranslationalVelocity::in_measured_frame(m, mo, sa, v([1., 0., 0.]));
        let v_nsa = TranslationalVelocity::build(n, mo, sa, m, v([1., 0., 0.]));
        let v_msa_n = TranslationalVelocity::build(m, mo, sa, n, v([1., 0., 0.]));

        let velocity = SpatialVelocity::new(w_ms, v_msa).unwrap();
        assert_eq!(velocity.measured_in(), m);
        assert_eq!(velocity.to_si(), Vector6::new(0., 0., 1., 1., 0., 0.));
        assert_eq!(
            SpatialVelocity::new(w_ms, v_nsa),
            Err(Error::FrameMismatch {
                operation: "spatial",
                role: FrameRole::MeasuredIn,
                expected: m,
                found: n,
            })
        );
        assert_eq!(
            SpatialVelocity::new(w_ms, v_msa_n),
            Err(Error::FrameMismatch {
                operation: "spatial",
                role: FrameRole::ExpressedIn,
                expected: m,
                found: n,
            })
        );

        let alpha_ms = AngularAcceleration::in_measured_frame(m, s, alpha([0., 0., 1.]));
        let a_nsa = TranslationalAcceleration::build(n, mo, sa, m, a([1., 0., 0.]));
        assert!(SpatialAcceleration::new(alpha_ms, a_nsa).is_err());
    }

    #[test]
    fn shift_moves_only_the_translational_half() {
        let mut frames = FrameRegistry::new();
        let m = frames.frame("M");
        let s = frames.frame("S");
        let mo = frames.origin(m).unwrap();
        let so = frames.origin(s).unwrap();
        let sq = frames.point(s, "q").unwrap();

        let velocity = SpatialVelocity::new(
            AngularVelocity::in_measured_frame(m, s, w([0., 0., 2.])),
            TranslationalVelocity::in_measured_frame(m, mo, so, v([0., 0., 0.])),
        )
        .unwrap();
        let r = PositionVector::build(so, sq, m, meters([1., 0., 0.]));

        let shifted = velocity.shift(&r).unwrap();
        assert_eq!(shifted.rotational(), velocity.rotational());
        assert_eq!(shifted.translational().to(), sq);
        assert_eq!(shifted.to_si(), Vector6::new(0., 0., 2., 0., 2., 0.));

        let acceleration = SpatialAcceleration::new(
            AngularAcceleration::zero(m, s, m),
            TranslationalAcceleration::zero(m, mo, so, m),
        )
        .unwrap();
        let shifted = acceleration.shift(&velocity.rotational(), &r).unwrap();
        assert_eq!(shifted.to_si(), Vector6::new(0., 0., 0., -4., 0., 0.));
    }

    #[test]
    fn changing_the_measured_frame() {
        let mut frames = FrameRegistry::new();
        let m = frames.frame("M");
        let n = frames.frame("N");
        let s = frames.frame("S");
        let mo = frames.origin(m).unwrap();
        let so = frames.origin(s).unwrap();

        let w_nm = AngularVelocity::build(n, m, m, w([0., 0., 1.]));
        let alpha_nm = AngularAcceleration::zero(n, m, m);
        let r = PositionVector::build(mo, so, m, meters([1., 0., 0.]));

        let velocity = SpatialVelocity::new(
            AngularVelocity::in_measured_frame(m, s, w([3., 0., 0.])),
            TranslationalVelocity::in_measured_frame(m, mo, so, v([1., 0., 0.])),
        )
        .unwrap();
        let in_n = velocity.change_measured_frame(&w_nm, &r).unwrap();
        assert_eq!(in_n.measured_in(), n);
        assert_eq!(in_n.rotational().measured_in(), n);
        // still relative to Mo, which is not N's origin
        assert_eq!(in_n.translational().from(), mo);
        insta::assert_snapshot!(in_n.monogram(&frames).unwrap(), @"V_N_MoS_M");
        assert_eq!(in_n.to_si(), Vector6::new(3., 0., 1., 1., 1., 0.));

        let acceleration = SpatialAcceleration::new(
            AngularAcceleration::zero(m, s, m),
            TranslationalAcceleration::zero(m, mo, so, m),
        )
        .unwrap();
        let in_n = acceleration
            .change_measured_frame(&velocity, &alpha_nm, &w_nm, &r)
            .unwrap();
        assert_eq!(
            (in_n.rotational().measured_in(), in_n.rotational().of()),
            (n, s)
        );
        assert_eq!(in_n.translational().from(), mo);
        insta::assert_snapshot!(in_n.monogram(&frames).unwrap(), @"A_N_MoS_M");
        // w_NM × w_MS over centripetal + Coriolis
        assert_eq!(in_n.to_si(), Vector6::new(0., 3., 0., -1., 2., 0.));
    }

    #[test]
    fn relative_velocity() {
        let mut frames = FrameRegistry::new();
        let m = frames.frame("M");
        let r = frames.frame("R");
        let s = frames.frame("S");
        let mo = frames.origin(m).unwrap();
        let rb = frames.offset_frame(r, "b").unwrap();
        let sa = frames.offset_frame(s, "a").unwrap();

        let v_msa = SpatialVelocity::new(
            AngularVelocity::in_measured_frame(m, s, w([1., 2., 3.])),
            TranslationalVelocity::in_measured_frame(m, mo, sa, v([4., 5., 6.])),
        )
        .unwrap();
        let v_mrb = SpatialVelocity::new(
            AngularVelocity::in_measured_frame(m, r, w([1., 1., 1.])),
            TranslationalVelocity::in_measured_frame(m, mo, rb, v([1., 1., 1.])),
        )
        .unwrap();

        let v_m_rbsa = v_msa.relative(&v_mrb).unwrap();
        assert_eq!(
            v_m_rbsa.rotational(),
            AngularVelocity::build(r, s, m, w([0., 1., 2.]))
        );
        assert_eq!(
            v_m_rbsa.translational(),
            TranslationalVelocity::in_measured_frame(m, rb, sa, v([3., 4., 5.]))
        );
        assert_eq!(v_m_rbsa.measured_in(), m);

        // a relative spatial velocity can't be the start of another one
        assert!(v_m_rbsa.relative(&v_mrb).is_err());
    }

    #[test]
    fn relative_acceleration_inverts_transport() {
        let mut frames = FrameRegistry::new();
        let m = frames.frame("M");
        let r = frames.frame("R");
        let s = frames.frame("S");
        let mo = frames.origin(m).unwrap();
        let rb = frames.offset_frame(r, "b").unwrap();
        let sa = frames.offset_frame(s, "a").unwrap();

        let w_mr = AngularVelocity::in_measured_frame(m, r, w([0., 0., 1.]));
        let w_ms = AngularVelocity::in_measured_frame(m, s, w([2., 0., 1.]));
        let a_msa = SpatialAcceleration::new(
            AngularAcceleration::in_measured_frame(m, s, alpha([0.5, 0., 0.])),
            TranslationalAcceleration::in_measured_frame(m, mo, sa, a([1., 2., 3.])),
        )
        .unwrap();
        let a_mrb = SpatialAcceleration::new(
            AngularAcceleration::in_measured_frame(m, r, alpha([0., 0.25, 0.])),
            TranslationalAcceleration::in_measured_frame(m, mo, rb, a([1., 1., 1.])),
        )
        .unwrap();

        let a_m_rbsa = a_msa.relative(&a_mrb, &w_mr, &w_ms).unwrap();
        let alpha_rs = a_m_rbsa.rotational();
        assert_eq!((alpha_rs.measured_in(), alpha_rs.of()), (r, s));
        assert_eq!(
            a_m_rbsa.translational(),
            TranslationalAcceleration::in_measured_frame(m, rb, sa, a([0., 1., 2.]))
        );

        let w_rs = w_mr.negate().compose(&w_ms).unwrap();
        let alpha_ms =
            AngularAcceleration::transport(&a_mrb.rotational(), &alpha_rs, &w_mr, &w_rs).unwrap();
        assert_relative_eq!(alpha_ms, a_msa.rotational());

        // the angular velocities have to be those of the two frames
        assert_eq!(
            a_msa.relative(&a_mrb, &w_ms, &w_ms),
            Err(Error::FrameMismatch {
                operation: "relative",
                role: FrameRole::Of,
                expected: r,
                found: s,
            })
        );
    }

    #[test]
    fn display() {
        let mut frames = FrameRegistry::new();
        let m = frames.frame("M");
        let s = frames.frame("S");
        let mo = frames.origin(m).unwrap();
        let so = frames.origin(s).unwrap();

        let velocity = SpatialVelocity::new(
            AngularVelocity::in_measured_frame(m, s, w([0., 0., 1.])),
            TranslationalVelocity::in_measured_frame(m, mo, so, v([1., 0., 0.])),
        )
        .unwrap();
        insta::assert_snapshot!(velocity, @"[(0, 0, 1) rad/s; (1, 0, 0) m/s]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let mut frames = FrameRegistry::new();
        let m = frames.frame("M");
        let s = frames.frame("S");
        let mo = frames.origin(m).unwrap();
        let sa = frames.offset_frame(s, "a").unwrap();

        let acceleration = SpatialAcceleration::new(
            AngularAcceleration::in_measured_frame(m, s, alpha([0., 0.5, 1.])),
            TranslationalAcceleration::in_measured_frame(m, mo, sa, a([1., 0., -9.81])),
        )
        .unwrap();
        let ser = serde_yaml::to_string(&acceleration).unwrap();
        assert_eq!(
            serde_yaml::from_str::<SpatialAcceleration>(&ser).unwrap(),
            acceleration
        );
    }

    quickcheck! {
        fn reexpress_round_trip(spin: Triple, drift: Triple, angles: Angles) -> () {
            let mut frames = FrameRegistry::new();
            let e = frames.frame("E");
            let m = frames.frame("M");
            let s = frames.frame("S");
            let mo = frames.origin(m).unwrap();
            let so = frames.origin(s).unwrap();

            let r_em = angles.rotation(e, m);
            let velocity = SpatialVelocity::new(
                AngularVelocity::in_measured_frame(m, s, w(spin.0)),
                TranslationalVelocity::in_measured_frame(m, mo, so, v(drift.0)),
            )
            .unwrap();

            let in_e = velocity.reexpress(&r_em).unwrap();
            assert_eq!(in_e.expressed_in(), e);
            assert_eq!(in_e.rotational().expressed_in(), e);
            assert_eq!(in_e.measured_in(), m);
            assert_relative_eq!(
                in_e.rotational().to_si().norm(),
                Vector3::from(spin.0).norm(),
                epsilon = 1e-9
            );
            assert_relative_eq!(in_e.reexpress(&r_em.inverse()).unwrap(), velocity, epsilon = 1e-9);
        }
    }
}
