//! Renders quantities in monogram notation.
//!
//! A monogram names a quantity by its symbol followed by its frames and points, eg `w_MS_E` for
//! the angular velocity of `S` measured in `M` and expressed in `E`. The usual shorthands apply:
//!
//! - the expressed-in frame is left out when it is the measured-in frame (`w_MS` for `w_MS_M`);
//! - a translational rate relative to the origin of its measured-in frame is written as an
//!   absolute one (`v_MSo` for `v_M_MoSo`);
//! - a spatial quantity of a body's origin is named after the body (`V_MS` rather than `V_MSo`).
//!
//! A spatial monogram only names the point, so that point has to be fixed on the rotating body.
//! A spatial velocity pairing `w_WL` with the velocity of a point of another body has no
//! monogram, and asking for one is an [`Error::FrameMismatch`].
//!
//! Rendering needs the [`FrameRegistry`] the handles came from, since quantities only carry
//! [`FrameId`]s.

use crate::angular::AngularVector;
use crate::error::{Error, FrameRole, Result};
use crate::frames::{FrameId, FrameRegistry};
use crate::position::PositionVector;
use crate::rotation::RotationMatrix;
use crate::spatial::{SpatialAcceleration, SpatialVelocity};
use crate::translational::TranslationalVector;
use crate::units::{AngularOrder, LinearOrder};
use std::fmt::Display;

/// A quantity that has a name in monogram notation.
///
/// ```rust
/// use kinemono::{AngularVelocity, FrameRegistry, Monogram};
/// use uom::si::{angular_velocity::radian_per_second, f64::AngularVelocity as Rate};
///
/// let mut frames = FrameRegistry::new();
/// let (m, s, e) = (frames.frame("M"), frames.frame("S"), frames.frame("E"));
///
/// let w_ms_e = AngularVelocity::build(m, s, e, [1., 0., 0.].map(Rate::new::<radian_per_second>));
/// assert_eq!(w_ms_e.monogram(&frames)?, "w_MS_E");
/// assert_eq!(w_ms_e.labelled(&frames)?, "w_MS_E = (1, 0, 0) rad/s");
/// # Ok::<(), kinemono::Error>(())
/// ```
pub trait Monogram {
    /// Returns the monogram, eg `w_MS_E`.
    ///
    /// Returns [`Error::UnknownFrame`] if any of the quantity's handles were not interned by
    /// `frames`.
    fn monogram(&self, frames: &FrameRegistry) -> Result<String>;

    /// Returns the monogram followed by the value, eg `w_MS_E = (1, 0, 0) rad/s`.
    fn labelled(&self, frames: &FrameRegistry) -> Result<String>
    where
        Self: Display,
    {
        Ok(format!("{} = {self}", self.monogram(frames)?))
    }
}

/// Appends `_E` unless the expressed-in frame is the measured-in frame.
fn with_expressed_in(
    frames: &FrameRegistry,
    mut monogram: String,
    measured_in: FrameId,
    expressed_in: FrameId,
) -> Result<String> {
    if expressed_in != measured_in {
        monogram.push('_');
        monogram.push_str(frames.require_name(expressed_in)?);
    }
    Ok(monogram)
}

/// The `M_RoSo` or `MSo` part of a translational monogram.
fn measured_between(
    frames: &FrameRegistry,
    measured_in: FrameId,
    from: FrameId,
    to: &str,
) -> Result<String> {
    let m = frames.require_name(measured_in)?;
    if frames.is_origin_of(from, measured_in) {
        Ok(format!("{m}{to}"))
    } else {
        Ok(format!("{m}_{}{to}", frames.require_name(from)?))
    }
}

impl Monogram for RotationMatrix {
    fn monogram(&self, frames: &FrameRegistry) -> Result<String> {
        Ok(format!(
            "R_{}{}",
            frames.require_name(self.in_frame())?,
            frames.require_name(self.of_frame())?
        ))
    }
}

impl<Time: AngularOrder> Monogram for AngularVector<Time> {
    fn monogram(&self, frames: &FrameRegistry) -> Result<String> {
        let monogram = format!(
            "{}_{}{}",
            Time::MONOGRAM,
            frames.require_name(self.measured_in())?,
            frames.require_name(self.of())?
        );
        with_expressed_in(frames, monogram, self.measured_in(), self.expressed_in())
    }
}

impl Monogram for PositionVector {
    fn monogram(&self, frames: &FrameRegistry) -> Result<String> {
        Ok(format!(
            "p_{}{}_{}",
            frames.require_name(self.from())?,
            frames.require_name(self.to())?,
            frames.require_name(self.expressed_in())?
        ))
    }
}

impl<Time: LinearOrder> Monogram for TranslationalVector<Time> {
    fn monogram(&self, frames: &FrameRegistry) -> Result<String> {
        let between = measured_between(
            frames,
            self.measured_in(),
            self.from(),
            frames.require_name(self.to())?,
        )?;
        with_expressed_in(
            frames,
            format!("{}_{between}", Time::MONOGRAM),
            self.measured_in(),
            self.expressed_in(),
        )
    }
}

/// Shared by both spatial quantities, which differ only in their symbol.
fn spatial_monogram(
    frames: &FrameRegistry,
    symbol: &str,
    rotational: (FrameId, FrameId),
    translational: (FrameId, FrameId, FrameId),
    expressed_in: FrameId,
) -> Result<String> {
    let (rotational_measured_in, body) = rotational;
    let (measured_in, from, to) = translational;

    let on = frames.body_of(to).ok_or(Error::UnknownFrame { id: to })?;
    if on != body {
        tracing::debug!(?body, ?to, ?on, "no monogram for a point off the rotating body");
        return Err(Error::FrameMismatch {
            operation: "monogram",
            role: FrameRole::To,
            expected: body,
            found: on,
        });
    }

    // a body's origin goes by the body's name
    let to = if to != body && frames.is_origin_of(to, body) {
        frames.require_name(body)?
    } else {
        frames.require_name(to)?
    };
    let between = if rotational_measured_in == measured_in {
        measured_between(frames, measured_in, from, to)?
    } else {
        format!(
            "{}_{}{to}",
            frames.require_name(measured_in)?,
            frames.require_name(from)?
        )
    };
    with_expressed_in(
        frames,
        format!("{symbol}_{between}"),
        measured_in,
        expressed_in,
    )
}

impl Monogram for SpatialVelocity {
    fn monogram(&self, frames: &FrameRegistry) -> Result<String> {
        let (w, v) = (self.rotational(), self.translational());
        spatial_monogram(
            frames,
            "V",
            (w.measured_in(), w.of()),
            (v.measured_in(), v.from(), v.to()),
            self.expressed_in(),
        )
    }
}

impl Monogram for SpatialAcceleration {
    fn monogram(&self, frames: &FrameRegistry) -> Result<String> {
        let (alpha, a) = (self.rotational(), self.translational());
        spatial_monogram(
            frames,
            "A",
            (alpha.measured_in(), alpha.of()),
            (a.measured_in(), a.from(), a.to()),
            self.expressed_in(),
        )
    }
}
