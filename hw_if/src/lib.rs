//! # Hardware interface library
//!
//! This library defines the abstract hardware collaborators consumed by the
//! control modules in `auto_ctrl`. The concrete implementations are owned by
//! the hardware bring-up layer (or by the simulation when running on a host
//! machine) and are borrowed by the control modules for the duration of a
//! single call.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Match clock - elapsed time source used for cooperative timeouts
pub mod clock;

/// Drivetrain equipment - the four independently addressable wheel actuators
pub mod drivetrain;

/// Executive probe - cooperative yield and cancellation checks
pub mod exec;

/// Sensor equipment - heading, range, reflectance and colour sensors
pub mod sensors;

/// Simulated hardware model
#[cfg(feature = "sim")]
pub mod sim;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use clock::Clock;
pub use drivetrain::{Drivetrain, RunMode, StopMode, WheelId};
pub use exec::Exec;
pub use sensors::{ColorSample, ColorSensor, HeadingSensor, RangeSensor, ReflectanceSensor};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The full hardware context available to a control module.
///
/// All equipment is exclusively owned by whichever module currently holds the
/// mutable borrow, so no locking is required (the control flow is a single
/// logical thread).
pub trait Hw:
    Drivetrain + HeadingSensor + RangeSensor + ReflectanceSensor + ColorSensor + Clock + Exec
{
}

impl<T> Hw for T where
    T: Drivetrain + HeadingSensor + RangeSensor + ReflectanceSensor + ColorSensor + Clock + Exec
{
}
