use crate::frames::{FrameId, FrameKind};
use std::fmt::{self, Display, Formatter};

/// Shorthand for results whose error is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Which tag of an operand violated an operation's precondition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRole {
    /// The basis the vector's components are written in.
    ExpressedIn,
    /// The frame a rate of change is taken in.
    MeasuredIn,
    /// The frame whose rotation a rotational quantity describes.
    Of,
    /// The point (or frame) an offset or relative quantity starts at.
    From,
    /// The point (or frame) an offset or relative quantity ends at.
    To,
}

impl Display for FrameRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FrameRole::ExpressedIn => "expressed-in frame",
            FrameRole::MeasuredIn => "measured-in frame",
            FrameRole::Of => "rotating frame",
            FrameRole::From => "start point",
            FrameRole::To => "end point",
        })
    }
}

/// Errors produced when combining or constructing kinematic quantities.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// An operand's frame tags don't satisfy the operation's precondition, eg composing angular
    /// velocities expressed in different frames.
    #[error("{operation}: {role} mismatch (expected {expected}, found {found})")]
    FrameMismatch {
        operation: &'static str,
        role: FrameRole,
        expected: FrameId,
        found: FrameId,
    },

    /// A matrix failed the orthonormality check required of a rotation matrix.
    #[error(
        "not a rotation matrix: |RᵀR - I| = {orthogonality_error:e}, det(R) = {determinant} \
         (tolerance {tolerance:e})"
    )]
    Domain {
        determinant: f64,
        orthogonality_error: f64,
        tolerance: f64,
    },

    /// A frame handle was looked up in a registry that didn't intern it.
    #[error("frame {id} is not known to this registry")]
    UnknownFrame { id: FrameId },

    /// A name was interned again as a different kind of thing, eg asking for the point `So` when
    /// `So` was already interned as a frame.
    #[error("kind mismatch for {id}: interned as {existing}, requested as {requested}")]
    KindMismatch {
        id: FrameId,
        requested: FrameKind,
        existing: FrameKind,
    },

    /// A validation tolerance was not a finite, non-negative number.
    #[error("orthonormality tolerance must be finite and non-negative, not {orthonormality}")]
    InvalidTolerance { orthonormality: f64 },
}

/// Checks a single tag, logging and returning [`Error::FrameMismatch`] if it's off.
pub(crate) fn ensure_frame(
    operation: &'static str,
    role: FrameRole,
    expected: FrameId,
    found: FrameId,
) -> Result<()> {
    if expected == found {
        return Ok(());
    }
    tracing::debug!(
        operation,
        %role,
        ?expected,
        ?found,
        "rejected operands with mismatching frames"
    );
    Err(Error::FrameMismatch {
        operation,
        role,
        expected,
        found,
    })
}

/// Checks that every operand is expressed in `expected`.
pub(crate) fn ensure_expressed_in(
    operation: &'static str,
    expected: FrameId,
    found: impl IntoIterator<Item = FrameId>,
) -> Result<()> {
    found
        .into_iter()
        .try_for_each(|found| ensure_frame(operation, FrameRole::ExpressedIn, expected, found))
}
