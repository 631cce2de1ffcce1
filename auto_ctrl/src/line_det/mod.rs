//! Line detection module
//!
//! Drives the robot slowly forward (or backward) until the floor
//! reflectance sensor sees a white marking, braking on the spot so the
//! robot stops on the line. A timeout bounds the search when no line is
//! found.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

use util::params::LoadError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during LineDet operation.
#[derive(Debug, thiserror::Error)]
pub enum LineDetError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(LoadError),

    #[error("Expected there to be a find command but couldn't find one")]
    NoFindCmd,

    #[error("Recieved an invalid find command: {0:#?}")]
    InvalidFindCmd(FindCmd),

    #[error("Attempted to start a line find while one is already active")]
    FindAlreadyActive,
}
