//! # Drivetrain equipment interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The number of drive wheels on the robot.
pub const NUM_WHEELS: usize = 4;

/// All wheels, in `[WheelId]` declaration order.
pub const ALL_WHEELS: [WheelId; NUM_WHEELS] = [
    WheelId::DrvFL,
    WheelId::DrvRL,
    WheelId::DrvFR,
    WheelId::DrvRR,
];

/// The left wheel pair. Both wheels of a pair always receive the same demand.
pub const LEFT_WHEELS: [WheelId; 2] = [WheelId::DrvFL, WheelId::DrvRL];

/// The right wheel pair.
pub const RIGHT_WHEELS: [WheelId; 2] = [WheelId::DrvFR, WheelId::DrvRR];

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of the drive wheels.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum WheelId {
    DrvFL,
    DrvRL,
    DrvFR,
    DrvRR,
}

/// Servo mode of the drivetrain controller.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub enum RunMode {
    /// Zero all encoders. The drivetrain shall not move in this mode.
    ResetEncoders,

    /// Hold the commanded power as a wheel velocity (the default mode).
    VelocityHold,

    /// Servo each wheel to its target encoder position, treating the
    /// commanded power as a speed magnitude.
    PositionHold,
}

/// Behaviour of a wheel when commanded to zero power.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub enum StopMode {
    /// Actively brake to a halt.
    Brake,

    /// Coast to a halt.
    Coast,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The four independently addressable wheel actuators.
///
/// Implementors shall clip all power demands into [-1, +1].
pub trait Drivetrain {
    /// Current encoder position of the given wheel in counts.
    fn position(&self, wheel: WheelId) -> i32;

    /// Set the absolute encoder target of the given wheel. Only meaningful in
    /// [`RunMode::PositionHold`].
    fn set_target_position(&mut self, wheel: WheelId, counts: i32);

    /// True while the given wheel has not yet reached its target position.
    fn is_busy(&self, wheel: WheelId) -> bool;

    /// Set the power demand of the given wheel, in [-1, +1].
    fn set_power(&mut self, wheel: WheelId, power: f64);

    /// Set the servo mode of all wheels.
    fn set_run_mode(&mut self, mode: RunMode);

    /// Set the zero-power behaviour of all wheels.
    fn set_stop_mode(&mut self, mode: StopMode);

    /// Set the same power on each wheel of the left and right pairs.
    fn set_side_power(&mut self, left: f64, right: f64) {
        for wheel in LEFT_WHEELS.iter() {
            self.set_power(*wheel, left);
        }
        for wheel in RIGHT_WHEELS.iter() {
            self.set_power(*wheel, right);
        }
    }

    /// Set the same power on all four wheels.
    fn set_all_power(&mut self, power: f64) {
        self.set_side_power(power, power);
    }

    /// True while every wheel is still busy.
    fn all_busy(&self) -> bool {
        ALL_WHEELS.iter().all(|wheel| self.is_busy(*wheel))
    }
}
