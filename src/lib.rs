//! This library provides frame-tagged kinematic quantities for rigid bodies: orientations,
//! angular and translational velocities and accelerations, positions, and the spatial
//! (rotational + translational) pairs built from them.
//!
//! Every quantity carries the frames and points it relates as [`FrameId`] tags, named the way
//! monogram notation names them. `w_MS_E` is the angular velocity of frame `S` measured in frame
//! `M` and expressed in frame `E`, and `v_M_RoSo_E` the velocity of point `So` relative to point
//! `Ro` measured in `M` and expressed in `E`. Operations that combine quantities check those tags
//! before doing any math and return [`Error::FrameMismatch`] when they don't line up. So adding
//! a velocity measured in one frame to one measured in another, or re-expressing with a rotation
//! whose frames are the wrong way round, is caught rather than silently producing garbage.
//!
//! Whether a quantity is a velocity or an acceleration is part of its type instead (see
//! [`AngularVelocity`] vs [`AngularAcceleration`]), so those cannot be mixed up at all.
//!
//! The handles themselves come from a [`FrameRegistry`], which also knows their names so that
//! quantities can be rendered as monograms (see [`Monogram`]).
//!
//! # Examples
//!
//! A turntable `T` spins at 2 rad/s about the vertical axis of the world frame `W`, and is
//! currently turned a quarter turn. Where is a bead at `Tq`, half a meter out along the
//! turntable's x axis, headed?
//!
//! ```
//! use approx::assert_relative_eq;
//! use kinemono::{
//!     AngularVelocity, AngularAcceleration, FrameRegistry, Monogram, PositionVector,
//!     RotationMatrix, TranslationalAcceleration, TranslationalVelocity, Vector3,
//! };
//! use uom::si::f64::{Angle, AngularVelocity as Rate, Length};
//! use uom::si::{angle::degree, angular_velocity::radian_per_second, length::meter};
//!
//! let mut frames = FrameRegistry::new();
//! let (w, t) = (frames.frame("W"), frames.frame("T"));
//! let (wo, to, tq) = (frames.origin(w)?, frames.origin(t)?, frames.point(t, "q")?);
//!
//! // what we know, all in turntable coordinates
//! let w_wt_t = AngularVelocity::build(w, t, t, [0., 0., 2.].map(Rate::new::<radian_per_second>));
//! let p_totq_t = PositionVector::build(to, tq, t, [0.5, 0., 0.].map(Length::new::<meter>));
//! let v_wto_t = TranslationalVelocity::zero(w, wo, to, t);
//! let a_wto_t = TranslationalAcceleration::zero(w, wo, to, t);
//!
//! // the bead moves with the turntable
//! let v_wtq_t = v_wto_t.shift(&w_wt_t, &p_totq_t)?;
//! let a_wtq_t = a_wto_t.shift(&AngularAcceleration::zero(w, t, t), &w_wt_t, &p_totq_t)?;
//! assert_eq!(v_wtq_t.monogram(&frames)?, "v_WTq_T");
//! assert_relative_eq!(v_wtq_t.to_si(), Vector3::new(0., 1., 0.));
//! assert_relative_eq!(a_wtq_t.to_si(), Vector3::new(-2., 0., 0.));
//!
//! // and in world coordinates
//! let r_wt = RotationMatrix::from_tait_bryan_angles(
//!     w,
//!     t,
//!     Angle::new::<degree>(90.), // yaw
//!     Angle::new::<degree>(0.),  // pitch
//!     Angle::new::<degree>(0.),  // roll
//! )
//! .expect("finite angles");
//! let v_wtq = v_wtq_t.reexpress(&r_wt)?;
//! assert_eq!(v_wtq.monogram(&frames)?, "v_WTq");
//! assert_relative_eq!(v_wtq.to_si(), Vector3::new(-1., 0., 0.), epsilon = 1e-12);
//!
//! // re-expressing needs R_WT, not R_TW
//! assert!(v_wtq_t.reexpress(&r_wt.inverse()).is_err());
//! # Ok::<(), kinemono::Error>(())
//! ```

mod angular;
mod config;
mod error;
mod frames;
mod notation;
mod position;
mod rotation;
mod spatial;

#[cfg(test)]
mod testing;

pub mod translational;
pub mod units;

/// Three components in SI units, as returned by the `to_si` methods.
pub type Vector3 = nalgebra::Vector3<f64>;
/// A 3×3 matrix, as accepted by [`RotationMatrix::new`].
pub type Matrix3 = nalgebra::Matrix3<f64>;
/// Six stacked components (rotational first) of a spatial quantity, in SI units.
pub type Vector6 = nalgebra::Vector6<f64>;

pub use angular::{AngularAcceleration, AngularVector, AngularVelocity};
pub use config::Tolerance;
pub use error::{Error, FrameRole, Result};
pub use frames::{FrameId, FrameKind, FrameRegistry};
pub use notation::Monogram;
pub use position::PositionVector;
pub use rotation::{Reexpress, RotationMatrix};
pub use spatial::{SpatialAcceleration, SpatialVelocity};
pub use translational::{TranslationalAcceleration, TranslationalVector, TranslationalVelocity};
pub use units::{AngularOrder, LinearOrder};
