//! Translation control module
//!
//! Drives the robot a commanded distance using the drivetrain's
//! position-hold servo mode, with an optional heading hold (steering the
//! wheel pairs differentially while driving) and an optional wall-standoff
//! hold (biasing the held heading to keep the range sensor on a target
//! distance).

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_targets;
mod cmd;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use calc_targets::*;
pub use cmd::*;
pub use params::*;
pub use state::*;

use util::params::LoadError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during TransCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum TransCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(LoadError),

    #[error("Expected there to be a move command but couldn't find one")]
    NoMoveCmd,

    #[error("Recieved an invalid move command: {0:#?}")]
    InvalidMoveCmd(MoveCmd),

    /// A move is already running. To replace it the current move must first
    /// run to a terminal status.
    #[error("Attempted to start a move while one is already active")]
    MoveAlreadyActive,
}
