//! `quickcheck` generators shared by the unit tests.

use crate::{FrameId, RotationMatrix};
use quickcheck::{Arbitrary, Gen};
use std::f64::consts::{PI, TAU};
use uom::si::angle::radian;
use uom::si::f64::Angle;

fn normal(g: &mut Gen) -> f64 {
    // quickcheck will give us awkward f64 values -- we ignore those
    loop {
        match f64::arbitrary(g) {
            0. => break 0.,
            f if f.is_normal() => break f,
            _ => {}
        }
    }
}

/// Three components in `[-100, 100)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Triple(pub(crate) [f64; 3]);

impl Arbitrary for Triple {
    fn arbitrary(g: &mut Gen) -> Self {
        Self([(); 3].map(|()| normal(g).rem_euclid(200.) - 100.))
    }
}

/// Yaw-pitch-roll angles, each in `[-π, π)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Angles {
    yaw: f64,
    pitch: f64,
    roll: f64,
}

impl Angles {
    pub(crate) fn rotation(&self, in_frame: FrameId, of_frame: FrameId) -> RotationMatrix {
        RotationMatrix::from_tait_bryan_angles(
            in_frame,
            of_frame,
            Angle::new::<radian>(self.yaw),
            Angle::new::<radian>(self.pitch),
            Angle::new::<radian>(self.roll),
        )
        .expect("generated angles are finite")
    }
}

impl Arbitrary for Angles {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut angle = || normal(g).rem_euclid(TAU) - PI;
        Self {
            yaw: angle(),
            pitch: angle(),
            roll: angle(),
        }
    }
}
