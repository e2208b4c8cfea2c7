//! Game-specific error types.
//!
//! Only [`GameError::InvalidLevelId`] ever propagates to a caller; the other
//! variants describe recoverable conditions that are logged (or silently
//! ignored) without aborting the frame loop.

use std::fmt;

/// Top-level error enum for the simulation core.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A level ordinal outside the defined range was requested. No partial
    /// level load happens; the caller decides what to do.
    InvalidLevelId {
        /// The ordinal that was requested.
        requested: usize,
        /// Highest defined level ordinal.
        max: usize,
    },

    /// A launch was requested while a projectile is still in flight.
    /// Rejected as a no-op, never fatal.
    DuplicateLaunch,

    /// A rigid body's position became non-finite after an extreme impulse.
    /// The body is force-removed rather than propagating NaNs into rendering.
    NumericInstability {
        /// Which kind of body was removed.
        body: &'static str,
    },

    /// A drag gesture ended below the minimum-pull threshold. Treated as a
    /// cancelled gesture, not a failure.
    EmptyDragCancelled,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidLevelId { requested, max } => {
                write!(f, "level {} does not exist (levels 0..={})", requested, max)
            }
            GameError::DuplicateLaunch => {
                write!(f, "launch rejected: a projectile is already in flight")
            }
            GameError::NumericInstability { body } => {
                write!(f, "{} position became non-finite; body force-removed", body)
            }
            GameError::EmptyDragCancelled => {
                write!(f, "drag released below minimum pull; gesture cancelled")
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
