use crate::error::{ensure_frame, FrameRole, Result};
use crate::frames::FrameId;
use crate::rotation::{private, Reexpress, RotationMatrix};
use crate::Vector3;
use nalgebra::Rotation3;
use std::fmt::{self, Display, Formatter};
use std::ops::Neg;
use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The position `p_PQ_E` of point `Q` relative to point `P`, expressed in frame `E`.
///
/// `P` and `Q` are usually points (`So`, `Sq`), but any handle works, including offset frames
/// (which double as their own origin point).
///
/// Positions chain tip-to-tail with [`PositionVector::chain`] (`p_AC = p_AB + p_BC`), and
/// negating one swaps its end points (`-p_PQ = p_QP`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionVector {
    /// X, Y, Z in meters
    pub(crate) inner: Vector3,
    from: FrameId,
    to: FrameId,
    expressed_in: FrameId,
}

impl Display for PositionVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) m",
            self.inner.x, self.inner.y, self.inner.z
        )
    }
}

impl PositionVector {
    pub(crate) fn from_nalgebra_vector(
        from: FrameId,
        to: FrameId,
        expressed_in: FrameId,
        inner: Vector3,
    ) -> Self {
        Self {
            inner,
            from,
            to,
            expressed_in,
        }
    }

    /// Constructs `p_PQ_E` from its Cartesian components in `E`.
    #[must_use]
    pub fn build(from: FrameId, to: FrameId, expressed_in: FrameId, [x, y, z]: [Length; 3]) -> Self {
        Self::from_nalgebra_vector(
            from,
            to,
            expressed_in,
            Vector3::new(x.get::<meter>(), y.get::<meter>(), z.get::<meter>()),
        )
    }

    /// Constructs `p_PQ_E` for coincident points.
    #[must_use]
    pub fn zero(from: FrameId, to: FrameId, expressed_in: FrameId) -> Self {
        Self::from_nalgebra_vector(from, to, expressed_in, Vector3::zeros())
    }

    /// Returns the start point (`P` in `p_PQ_E`).
    #[must_use]
    pub fn from(&self) -> FrameId {
        self.from
    }

    /// Returns the end point (`Q` in `p_PQ_E`).
    #[must_use]
    pub fn to(&self) -> FrameId {
        self.to
    }

    /// Returns the frame the components are expressed in (`E` in `p_PQ_E`).
    #[must_use]
    pub fn expressed_in(&self) -> FrameId {
        self.expressed_in
    }

    /// Returns the X, Y, and Z components.
    #[must_use]
    pub fn to_cartesian(&self) -> [Length; 3] {
        [self.inner.x, self.inner.y, self.inner.z].map(Length::new::<meter>)
    }

    /// Returns the components in meters.
    #[must_use]
    pub fn to_si(&self) -> Vector3 {
        self.inner
    }

    /// Returns the distance between the two points.
    #[must_use]
    pub fn magnitude(&self) -> Length {
        Length::new::<meter>(self.inner.norm())
    }

    /// Computes `p_AC_E = p_AB_E + p_BC_E` from `self` (`p_AB_E`) and `rhs` (`p_BC_E`).
    ///
    /// Returns [`Error::FrameMismatch`](crate::Error::FrameMismatch) unless both are expressed
    /// in the same frame and `rhs` starts where `self` ends.
    pub fn chain(&self, rhs: &PositionVector) -> Result<PositionVector> {
        ensure_frame(
            "chain",
            FrameRole::ExpressedIn,
            self.expressed_in,
            rhs.expressed_in,
        )?;
        ensure_frame("chain", FrameRole::From, self.to, rhs.from)?;
        Ok(Self::from_nalgebra_vector(
            self.from,
            rhs.to,
            self.expressed_in,
            self.inner + rhs.inner,
        ))
    }

    /// Returns `p_QP_E` for `p_PQ_E`.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::from_nalgebra_vector(self.to, self.from, self.expressed_in, -self.inner)
    }

    /// Re-expresses the position using `rotation` (`R_EF` for a position expressed in `F`).
    ///
    /// Shorthand for [`RotationMatrix::apply`].
    pub fn reexpress(self, rotation: &RotationMatrix) -> Result<Self> {
        rotation.apply(self)
    }
}

impl Neg for PositionVector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl private::Sealed for PositionVector {}

impl Reexpress for PositionVector {
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
impl AbsDiffEq<Self> for PositionVector {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Vector3::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.expressed_in == other.expressed_in
            && self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for PositionVector {
    fn default_max_relative() -> Self::Epsilon {
        Vector3::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.expressed_in == other.expressed_in
            && self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Angles, Triple};
    use crate::{Error, FrameRegistry};
    use approx::assert_relative_eq;
    use quickcheck::quickcheck;

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }

    #[test]
    fn chaining_tip_to_tail() {
        let mut frames = FrameRegistry::new();
        let e = frames.frame("E");
        let s = frames.frame("S");
        let so = frames.origin(s).unwrap();
        let sq = frames.point(s, "q").unwrap();
        let sr = frames.point(s, "r").unwrap();

        let p_so_sq = PositionVector::build(so, sq, e, [m(1.), m(0.), m(0.)]);
        let p_sq_sr = PositionVector::build(sq, sr, e, [m(0.), m(2.), m(0.)]);
        let p_so_sr = p_so_sq.chain(&p_sq_sr).unwrap();

        assert_eq!(p_so_sr, PositionVector::build(so, sr, e, [m(1.), m(2.), m(0.)]));
        assert_relative_eq!(p_so_sr.magnitude().get::<meter>(), 5f64.sqrt());
    }

    #[test]
    fn chain_rejects_gaps_and_mixed_bases() {
        let mut frames = FrameRegistry::new();
        let e = frames.frame("E");
        let f = frames.frame("F");
        let s = frames.frame("S");
        let so = frames.origin(s).unwrap();
        let sq = frames.point(s, "q").unwrap();
        let sr = frames.point(s, "r").unwrap();

        let p_so_sq = PositionVector::zero(so, sq, e);
        assert_eq!(
            p_so_sq.chain(&PositionVector::zero(so, sr, e)),
            Err(Error::FrameMismatch {
                operation: "chain",
                role: FrameRole::From,
                expected: sq,
                found: so,
            })
        );
        assert_eq!(
            p_so_sq.chain(&PositionVector::zero(sq, sr, f)),
            Err(Error::FrameMismatch {
                operation: "chain",
                role: FrameRole::ExpressedIn,
                expected: e,
                found: f,
            })
        );
    }

    #[test]
    fn negation_swaps_end_points() {
        let mut frames = FrameRegistry::new();
        let e = frames.frame("E");
        let p = frames.frame("P");
        let q = frames.frame("Q");

        let p_pq = PositionVector::build(p, q, e, [m(1.), m(-2.), m(3.)]);
        assert_eq!(-p_pq, PositionVector::build(q, p, e, [m(-1.), m(2.), m(-3.)]));
        assert_eq!(p_pq.chain(&-p_pq).unwrap(), PositionVector::zero(p, p, e));
    }

    #[test]
    fn display() {
        let mut frames = FrameRegistry::new();
        let e = frames.frame("E");
        insta::assert_snapshot!(
            PositionVector::build(e, e, e, [m(1.), m(-0.5), m(0.)]),
            @"(1, -0.5, 0) m"
        );
    }

    quickcheck! {
        fn reexpress_round_trip_preserves_magnitude(xyz: Triple, angles: Angles) -> () {
            let mut frames = FrameRegistry::new();
            let e = frames.frame("E");
            let f = frames.frame("F");
            let p = frames.frame("P");
            let q = frames.frame("Q");

            let r_ef = angles.rotation(e, f);
            let p_pq_f = PositionVector::build(p, q, f, xyz.0.map(m));
            let p_pq_e = p_pq_f.reexpress(&r_ef).unwrap();
            assert_eq!((p_pq_e.from(), p_pq_e.to(), p_pq_e.expressed_in()), (p, q, e));
            assert_relative_eq!(
                p_pq_e.magnitude().get::<meter>(),
                p_pq_f.magnitude().get::<meter>(),
                epsilon = 1e-9
            );
            assert_relative_eq!(
                p_pq_e.reexpress(&r_ef.inverse()).unwrap(),
                p_pq_f,
                epsilon = 1e-9
            );
        }
    }
}
