//! Maps the time-derivative order of a quantity to its `uom` unit.
//!
//! Rates in this crate store SI base-unit components in a `nalgebra` vector and carry their
//! order as a [`typenum`] integer, so a velocity (`N1`, ie length per time) can never be added to
//! an acceleration (`N2`, length per time squared). Positions are always lengths and so have no
//! order parameter.

use std::fmt::Debug;
use typenum::{Integer, N1, N2};
use uom::si::f64::{Acceleration, AngularAcceleration, AngularVelocity, Velocity};
use uom::si::{
    acceleration::meter_per_second_squared, angular_acceleration::radian_per_second_squared,
    angular_velocity::radian_per_second, velocity::meter_per_second,
};

/// A translational order: `N1` for velocities, `N2` for accelerations.
///
/// This trait is sealed, and so cannot be implemented by user code.
pub trait LinearOrder: Integer + private::Sealed {
    /// The `uom` quantity of each component.
    type Quantity: Copy + Debug + PartialEq;
    /// Prefix of the monogram, eg `v` in `v_MSo_E`.
    const MONOGRAM: &'static str;
    /// SI unit symbol used when displaying values.
    const SYMBOL: &'static str;

    #[doc(hidden)]
    fn from_si(value: f64) -> Self::Quantity;
    #[doc(hidden)]
    fn to_si(quantity: Self::Quantity) -> f64;
}

/// A rotational order: `N1` for angular velocities, `N2` for angular accelerations.
///
/// This trait is sealed, and so cannot be implemented by user code.
pub trait AngularOrder: Integer + private::Sealed {
    /// The `uom` quantity of each component.
    type Quantity: Copy + Debug + PartialEq;
    /// Prefix of the monogram, eg `w` in `w_MS_E`.
    const MONOGRAM: &'static str;
    /// SI unit symbol used when displaying values.
    const SYMBOL: &'static str;

    #[doc(hidden)]
    fn from_si(value: f64) -> Self::Quantity;
    #[doc(hidden)]
    fn to_si(quantity: Self::Quantity) -> f64;
}

impl LinearOrder for N1 {
    type Quantity = Velocity;
    const MONOGRAM: &'static str = "v";
    const SYMBOL: &'static str = "m/s";

    fn from_si(value: f64) -> Velocity {
        Velocity::new::<meter_per_second>(value)
    }
    fn to_si(quantity: Velocity) -> f64 {
        quantity.get::<meter_per_second>()
    }
}

impl LinearOrder for N2 {
    type Quantity = Acceleration;
    const MONOGRAM: &'static str = "a";
    const SYMBOL: &'static str = "m/s²";

    fn from_si(value: f64) -> Acceleration {
        Acceleration::new::<meter_per_second_squared>(value)
    }
    fn to_si(quantity: Acceleration) -> f64 {
        quantity.get::<meter_per_second_squared>()
    }
}

impl AngularOrder for N1 {
    type Quantity = AngularVelocity;
    const MONOGRAM: &'static str = "w";
    const SYMBOL: &'static str = "rad/s";

    fn from_si(value: f64) -> AngularVelocity {
        AngularVelocity::new::<radian_per_second>(value)
    }
    fn to_si(quantity: AngularVelocity) -> f64 {
        quantity.get::<radian_per_second>()
    }
}

impl AngularOrder for N2 {
    type Quantity = AngularAcceleration;
    const MONOGRAM: &'static str = "alpha";
    const SYMBOL: &'static str = "rad/s²";

    fn from_si(value: f64) -> AngularAcceleration {
        AngularAcceleration::new::<radian_per_second_squared>(value)
    }
    fn to_si(quantity: AngularAcceleration) -> f64 {
        quantity.get::<radian_per_second_squared>()
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for typenum::N1 {}
    impl Sealed for typenum::N2 {}
}
