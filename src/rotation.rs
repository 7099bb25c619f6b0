//! Orientation of one frame relative to another.
//!
//! The only type here is [`RotationMatrix`], written `R_AB` in monogram notation: the
//! orientation of frame `B` in frame `A`. Its columns are the unit vectors of `B` expressed in
//! `A`, so multiplying it with a vector expressed in `B` re-expresses that vector in `A`. This
//! module also defines [`Reexpress`], implemented by every frame-tagged quantity in the crate, so
//! that [`RotationMatrix::apply`] works on all of them.

use crate::config::Tolerance;
use crate::error::{ensure_frame, Error, FrameRole, Result};
use crate::frames::FrameId;
use crate::{Matrix3, Vector3};
use nalgebra::{Quaternion, Rotation3, Unit, UnitQuaternion};
use std::fmt::{self, Display, Formatter};
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The orientation `R_AB` of frame `B` (the "of" frame) in frame `A` (the "in" frame).
///
/// A `RotationMatrix` is always orthonormal with a determinant of `+1` (within the
/// [`Tolerance`] it was validated against). The available constructors either validate their
/// input ([`RotationMatrix::new`]) or cannot produce anything but a proper rotation
/// ([`RotationMatrix::from_axis_angle`], [`RotationMatrix::from_tait_bryan_angles`], ...).
///
/// ```rust
/// use approx::assert_relative_eq;
/// use kinemono::{FrameRegistry, PositionVector, RotationMatrix, Vector3};
/// use uom::si::{angle::degree, f64::{Angle, Length}, length::meter};
///
/// let mut frames = FrameRegistry::new();
/// let (a, b) = (frames.frame("A"), frames.frame("B"));
/// let (ao, bq) = (frames.origin(a)?, frames.point(b, "q")?);
///
/// // B is A yawed by 90°
/// let r_ab = RotationMatrix::from_tait_bryan_angles(
///     a,
///     b,
///     Angle::new::<degree>(90.),
///     Angle::new::<degree>(0.),
///     Angle::new::<degree>(0.),
/// )
/// .expect("finite angles");
///
/// // B's x axis is A's y axis
/// let p_b = PositionVector::build(ao, bq, b, [1., 0., 0.].map(Length::new::<meter>));
/// let p_a = r_ab.apply(p_b)?;
/// assert_eq!(p_a.expressed_in(), a);
/// assert_relative_eq!(p_a.to_si(), Vector3::new(0., 1., 0.), epsilon = 1e-12);
/// # Ok::<(), kinemono::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// deserialized matrices are validated again, against the tolerance they were written with
#[cfg_attr(feature = "serde", serde(try_from = "Unchecked", into = "Unchecked"))]
pub struct RotationMatrix {
    inner: Rotation3<f64>,
    in_frame: FrameId,
    of_frame: FrameId,
}

impl Display for RotationMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let m = self.inner.matrix();
        write!(f, "[")?;
        for row in 0..3 {
            if row > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}, {}, {}]", m[(row, 0)], m[(row, 1)], m[(row, 2)])?;
        }
        write!(f, "]")
    }
}

impl RotationMatrix {
    /// Constructs `R_AB` from its matrix, validated against the default [`Tolerance`].
    ///
    /// Returns [`Error::Domain`] if `matrix` is not orthonormal or has a determinant other than
    /// `+1` (eg, if it is a reflection).
    pub fn new(in_frame: FrameId, of_frame: FrameId, matrix: Matrix3) -> Result<Self> {
        Self::new_with_tolerance(in_frame, of_frame, matrix, Tolerance::default())
    }

    /// Like [`RotationMatrix::new`], but validates against the given `tolerance`.
    ///
    /// A matrix is accepted when every entry of `RᵀR − I` and `det(R) − 1` are no larger in
    /// magnitude than [`Tolerance::orthonormality`]. Non-finite matrices are always rejected.
    ///
    /// Returns [`Error::InvalidTolerance`] if the bound is NaN, infinite or negative.
    pub fn new_with_tolerance(
        in_frame: FrameId,
        of_frame: FrameId,
        matrix: Matrix3,
        tolerance: Tolerance,
    ) -> Result<Self> {
        let bound = tolerance.validated()?.orthonormality;
        let (orthogonality_error, determinant) = deviation(&matrix);

        // written so that NaN fails the check
        if !(orthogonality_error <= bound && (determinant - 1.).abs() <= bound) {
            tracing::debug!(
                orthogonality_error,
                determinant,
                tolerance = bound,
                "rejected matrix that is not a proper rotation"
            );
            return Err(Error::Domain {
                determinant,
                orthogonality_error,
                tolerance: bound,
            });
        }

        Ok(Self {
            inner: Rotation3::from_matrix_unchecked(matrix),
            in_frame,
            of_frame,
        })
    }

    /// Constructs `R_AB` for frames `A` and `B` that are aligned.
    #[must_use]
    pub fn identity(in_frame: FrameId, of_frame: FrameId) -> Self {
        Self {
            inner: Rotation3::identity(),
            in_frame,
            of_frame,
        }
    }

    /// Constructs `R_AB` where `B` is `A` rotated by `angle` about `axis` (given in `A`).
    ///
    /// The axis does not need to be normalized. Positive angles follow the right-hand rule.
    ///
    /// Returns `None` if `axis` is (numerically) zero, if its length overflows, or if `axis` or
    /// `angle` are not finite.
    #[must_use]
    pub fn from_axis_angle(
        in_frame: FrameId,
        of_frame: FrameId,
        axis: [f64; 3],
        angle: impl Into<Angle>,
    ) -> Option<Self> {
        let angle = angle.into().get::<radian>();
        let axis = Vector3::from(axis);
        // a finite axis can still have an infinite norm, which normalizes to zero
        if !angle.is_finite() || !axis.norm().is_finite() {
            return None;
        }
        let axis = Unit::try_new(axis, f64::EPSILON)?;
        Some(Self {
            inner: Rotation3::from_axis_angle(&axis, angle),
            in_frame,
            of_frame,
        })
    }

    /// Constructs `R_AB` from intrinsic yaw-pitch-roll [Tait-Bryan angles][tb].
    ///
    /// `B` is reached from `A` by first rotating by `yaw` about the Z axis, then by `pitch` about
    /// the resulting Y axis, and finally by `roll` about the resulting X axis.
    ///
    /// Returns `None` if any of the angles is not finite.
    ///
    /// [tb]: https://en.wikipedia.org/wiki/Euler_angles#Tait%E2%80%93Bryan_angles
    #[doc(alias = "from_ypr")]
    #[must_use]
    pub fn from_tait_bryan_angles(
        in_frame: FrameId,
        of_frame: FrameId,
        yaw: impl Into<Angle>,
        pitch: impl Into<Angle>,
        roll: impl Into<Angle>,
    ) -> Option<Self> {
        let angles: [Angle; 3] = [yaw.into(), pitch.into(), roll.into()];
        let [yaw, pitch, roll] = angles.map(|angle| angle.get::<radian>());
        if ![yaw, pitch, roll].iter().all(|a| a.is_finite()) {
            return None;
        }
        Some(Self {
            // nalgebra composes these as Rz(yaw) * Ry(pitch) * Rx(roll), ie intrinsic z-y'-x''
            inner: Rotation3::from_euler_angles(roll, pitch, yaw),
            in_frame,
            of_frame,
        })
    }

    /// Constructs `R_AB` from the components of the unit quaternion that rotates `A` onto `B`.
    ///
    /// `w` is the scalar part and `[i, j, k]` the vector part. The quaternion is normalized, so
    /// it does not need to be exactly unit length.
    ///
    /// Returns `None` for a zero quaternion, or one whose components or length are not finite.
    #[doc(alias = "from_versor")]
    #[must_use]
    pub fn from_unit_quaternion(
        in_frame: FrameId,
        of_frame: FrameId,
        w: f64,
        i: f64,
        j: f64,
        k: f64,
    ) -> Option<Self> {
        let q = Quaternion::new(w, i, j, k);
        if !q.norm().is_finite() {
            return None;
        }
        let q = UnitQuaternion::try_new(q, f64::EPSILON)?;
        Some(Self {
            inner: q.to_rotation_matrix(),
            in_frame,
            of_frame,
        })
    }

    /// Returns the unit quaternion `(w, i, j, k)` equivalent to this rotation.
    #[doc(alias = "to_versor")]
    #[must_use]
    pub fn to_unit_quaternion(&self) -> (f64, f64, f64, f64) {
        let q = UnitQuaternion::from_rotation_matrix(&self.inner);
        (q.w, q.i, q.j, q.k)
    }

    /// Returns the frame `A` of `R_AB`.
    #[must_use]
    pub fn in_frame(&self) -> FrameId {
        self.in_frame
    }

    /// Returns the frame `B` of `R_AB`.
    #[must_use]
    pub fn of_frame(&self) -> FrameId {
        self.of_frame
    }

    /// Returns the 3×3 matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        *self.inner.matrix()
    }

    /// Returns the determinant, which is `1` up to rounding.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.inner.matrix().determinant()
    }

    /// Computes `R_AC = R_AB · R_BC`.
    ///
    /// Returns [`Error::FrameMismatch`] unless the "of" frame of `self` is the "in" frame of
    /// `rhs`.
    pub fn compose(&self, rhs: &RotationMatrix) -> Result<RotationMatrix> {
        ensure_frame("compose", FrameRole::Of, self.of_frame, rhs.in_frame)?;
        Ok(Self {
            inner: self.inner * rhs.inner,
            in_frame: self.in_frame,
            of_frame: rhs.of_frame,
        })
    }

    /// Returns `R_BA`, the transpose of `R_AB`.
    #[must_use]
    pub fn inverse(&self) -> RotationMatrix {
        Self {
            inner: self.inner.inverse(),
            in_frame: self.of_frame,
            of_frame: self.in_frame,
        }
    }

    /// Re-expresses `quantity` (expressed in `B`) in `A`.
    ///
    /// Only the expressed-in frame changes: re-expression is instantaneous, so the measured-in
    /// frame of a rate, and the points of an offset, are left untouched.
    ///
    /// Returns [`Error::FrameMismatch`] if `quantity` is not expressed in `B`.
    pub fn apply<T: Reexpress>(&self, quantity: T) -> Result<T> {
        ensure_frame(
            "reexpress",
            FrameRole::ExpressedIn,
            self.of_frame,
            quantity.expressed_in(),
        )?;
        Ok(quantity.reexpressed(&self.inner, self.in_frame))
    }
}

/// A frame-tagged quantity whose components can be re-expressed in another frame.
///
/// This trait is sealed, and so cannot be implemented by user code.
pub trait Reexpress: Sized + private::Sealed {
    /// The frame whose basis the components are written in.
    fn expressed_in(&self) -> FrameId;

    #[doc(hidden)]
    fn reexpressed(self, rotation: &Rotation3<f64>, expressed_in: FrameId) -> Self;
}

pub(crate) mod private {
    pub trait Sealed {}
}

/// Returns the max-norm of `RᵀR − I` and the determinant of `matrix`.
fn deviation(matrix: &Matrix3) -> (f64, f64) {
    let orthogonality_error = (matrix.transpose() * matrix - Matrix3::identity()).amax();
    (orthogonality_error, matrix.determinant())
}

#[cfg(feature = "serde")]
#[derive(Clone, Copy, Serialize, Deserialize)]
struct Unchecked {
    in_frame: FrameId,
    of_frame: FrameId,
    matrix: Matrix3,
    // the tightest bound the matrix passes, but never tighter than the default
    #[serde(default)]
    tolerance: Tolerance,
}

#[cfg(feature = "serde")]
impl TryFrom<Unchecked> for RotationMatrix {
    type Error = Error;

    fn try_from(value: Unchecked) -> Result<Self> {
        Self::new_with_tolerance(value.in_frame, value.of_frame, value.matrix, value.tolerance)
    }
}

#[cfg(feature = "serde")]
impl From<RotationMatrix> for Unchecked {
    fn from(value: RotationMatrix) -> Self {
        let matrix = value.matrix();
        let (orthogonality_error, determinant) = deviation(&matrix);
        let needed = orthogonality_error.max((determinant - 1.).abs());
        Self {
            in_frame: value.in_frame,
            of_frame: value.of_frame,
            matrix,
            tolerance: Tolerance::new(needed.max(Tolerance::DEFAULT_ORTHONORMALITY)),
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for RotationMatrix {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Rotation3::<f64>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.in_frame == other.in_frame
            && self.of_frame == other.of_frame
            && self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for RotationMatrix {
    fn default_max_relative() -> Self::Epsilon {
        Rotation3::<f64>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.in_frame == other.in_frame
            && self.of_frame == other.of_frame
            && self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}
