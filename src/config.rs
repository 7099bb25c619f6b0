use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::rotation::RotationMatrix;

/// Numeric tolerances used when validating inputs.
///
/// Consumers that keep their own configuration files can embed this type directly; every field
/// is optional when deserializing and falls back to its default. Deserialized values are checked
/// the way [`Tolerance::try_new`] checks them.
///
/// ```rust
/// use kinemono::Tolerance;
///
/// assert_eq!(Tolerance::default().orthonormality, 1e-10);
/// assert_eq!(Tolerance::new(1e-6).orthonormality, 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Unchecked"))]
pub struct Tolerance {
    /// How far `RᵀR` may stray from the identity (max-norm), and `det(R)` from `1`, for a
    /// matrix to be accepted by [`RotationMatrix::new`].
    pub orthonormality: f64,
}

impl Tolerance {
    /// Default for [`Tolerance::orthonormality`]; appropriate for double precision.
    pub const DEFAULT_ORTHONORMALITY: f64 = 1e-10;

    /// Constructs a tolerance with the given orthonormality bound.
    ///
    /// The sign of `orthonormality` is ignored.
    #[must_use]
    pub fn new(orthonormality: f64) -> Self {
        Self {
            orthonormality: orthonormality.abs(),
        }
    }

    /// Constructs a tolerance with the given orthonormality bound, which must be finite and
    /// non-negative.
    ///
    /// Returns [`Error::InvalidTolerance`] otherwise, since a NaN or negative bound would reject
    /// every matrix.
    pub fn try_new(orthonormality: f64) -> Result<Self> {
        if orthonormality.is_finite() && orthonormality >= 0. {
            Ok(Self { orthonormality })
        } else {
            tracing::debug!(orthonormality, "rejected unusable tolerance");
            Err(Error::InvalidTolerance { orthonormality })
        }
    }

    /// Checks a tolerance that may have been put together field by field.
    pub(crate) fn validated(self) -> Result<Self> {
        Self::try_new(self.orthonormality)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(default)]
struct Unchecked {
    orthonormality: f64,
}

#[cfg(feature = "serde")]
impl Default for Unchecked {
    fn default() -> Self {
        Self {
            orthonormality: Tolerance::DEFAULT_ORTHONORMALITY,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<Unchecked> for Tolerance {
    type Error = Error;

    fn try_from(value: Unchecked) -> Result<Self> {
        Self::try_new(value.orthonormality)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            orthonormality: Self::DEFAULT_ORTHONORMALITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_bounds_are_flipped() {
        assert_eq!(Tolerance::new(-1e-3), Tolerance::new(1e-3));
    }

    #[test]
    fn unusable_bounds_are_refused() {
        assert_eq!(Tolerance::try_new(1e-6), Ok(Tolerance::new(1e-6)));
        assert_eq!(Tolerance::try_new(0.), Ok(Tolerance::new(0.)));
        assert_eq!(
            Tolerance::try_new(-1e-6),
            Err(Error::InvalidTolerance {
                orthonormality: -1e-6
            })
        );
        assert!(matches!(
            Tolerance::try_new(f64::NAN),
            Err(Error::InvalidTolerance { orthonormality }) if orthonormality.is_nan()
        ));
        assert!(Tolerance::try_new(f64::INFINITY).is_err());
        assert!(Tolerance { orthonormality: -1. }.validated().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let tolerance: Tolerance = serde_yaml::from_str("{}").unwrap();
        assert_eq!(tolerance, Tolerance::default());

        let tolerance: Tolerance = serde_yaml::from_str("orthonormality: 1.0e-6").unwrap();
        assert_eq!(tolerance.orthonormality, 1e-6);

        let ser = serde_yaml::to_string(&Tolerance::default()).unwrap();
        assert_eq!(serde_yaml::from_str::<Tolerance>(&ser).unwrap(), Tolerance::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unusable_bounds_are_not_deserialized() {
        assert!(serde_yaml::from_str::<Tolerance>("orthonormality: -1.0e-6").is_err());
        assert!(serde_yaml::from_str::<Tolerance>("orthonormality: .nan").is_err());
        assert!(serde_yaml::from_str::<Tolerance>("orthonormality: .inf").is_err());
    }
}
