//! # Simulated hardware model
//!
//! [`SimHw`] is a deterministic kinematic model of the robot used to run the
//! control modules on a host machine. The model only advances when
//! [`Exec::cooperative_yield`] is called, so a test drives the simulation by
//! feeding synthetic control cycles.
//!
//! The drivetrain model is deliberately simple: each wheel moves at a rate
//! proportional to its commanded power, either towards its encoder target
//! (position hold) or freely (velocity hold), and the robot heading is
//! integrated from the differential wheel rates over the track width.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::trace;

// Internal
use crate::clock::Clock;
use crate::drivetrain::{Drivetrain, RunMode, StopMode, WheelId, ALL_WHEELS, NUM_WHEELS};
use crate::exec::Exec;
use crate::sensors::{ColorSample, ColorSensor, HeadingSensor, RangeSensor, ReflectanceSensor};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Position error below which a position-hold wheel reports not busy, in
/// encoder counts.
const BUSY_TOLERANCE_COUNTS: f64 = 8.0;

/// Brightness reported by the reflectance model over the white floor marking.
const WHITE_BRIGHTNESS: f64 = 3.0;

/// Brightness reported by the reflectance model over plain floor.
const FLOOR_BRIGHTNESS: f64 = 0.2;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Simulated robot hardware implementing every equipment trait.
pub struct SimHw {
    // ---- DRIVETRAIN ----
    run_mode: RunMode,
    stop_mode: StopMode,
    pos_counts: [f64; NUM_WHEELS],
    target_counts: [i32; NUM_WHEELS],
    power: [f64; NUM_WHEELS],

    // ---- WORLD ----
    /// True heading of the robot in degrees, unwrapped.
    pub heading_deg: f64,

    /// Fixed offset between the raw orientation sensor and the true heading.
    pub mount_bias_deg: f64,

    /// Distance reported by the range sensor.
    pub range_cm: f64,

    /// Channels reported by the colour sensor.
    pub channels: ColorSample,

    /// Travel distance at which the floor carries a white marking, or `None`
    /// for an unmarked floor.
    pub line_at_in: Option<f64>,

    /// State of the reflectance sensor illumination.
    pub illumination_on: bool,

    // ---- MODEL CONFIG ----
    /// Encoder counts per inch of wheel travel.
    pub counts_per_inch: f64,

    /// Distance between the left and right wheel pairs in inches.
    pub track_width_in: f64,

    /// Wheel surface speed at full power, in inches/second.
    pub max_speed_ips: f64,

    /// Simulated duration of one control cycle in seconds.
    pub dt_s: f64,

    // ---- EXECUTIVE ----
    clock_s: f64,
    active: bool,
    cancel_after: Option<u32>,

    /// Absolute distance travelled by the robot body since construction, in
    /// inches. Drives the reflectance model.
    travel_in: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimHw {
    /// Create a new simulation with the robot at rest.
    pub fn new() -> Self {
        Self {
            run_mode: RunMode::VelocityHold,
            stop_mode: StopMode::Coast,
            pos_counts: [0.0; NUM_WHEELS],
            target_counts: [0; NUM_WHEELS],
            power: [0.0; NUM_WHEELS],
            heading_deg: 0.0,
            mount_bias_deg: 0.0,
            range_cm: 20.0,
            channels: ColorSample::default(),
            line_at_in: None,
            illumination_on: false,
            counts_per_inch: 89.1,
            track_width_in: 16.0,
            max_speed_ips: 30.0,
            dt_s: 0.02,
            clock_s: 0.0,
            active: true,
            cancel_after: None,
            travel_in: 0.0,
        }
    }

    /// Cancel the executive after the given number of further yields.
    pub fn cancel_after(&mut self, cycles: u32) {
        self.cancel_after = Some(cycles);
    }

    /// The commanded power of a wheel, as last set by a control module.
    pub fn wheel_power(&self, wheel: WheelId) -> f64 {
        self.power[Self::idx(wheel)]
    }

    /// The encoder target of a wheel, as last set by a control module.
    pub fn wheel_target(&self, wheel: WheelId) -> i32 {
        self.target_counts[Self::idx(wheel)]
    }

    /// The current run mode of the drivetrain.
    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    /// The current stop mode of the drivetrain.
    pub fn stop_mode(&self) -> StopMode {
        self.stop_mode
    }

    fn idx(wheel: WheelId) -> usize {
        match wheel {
            WheelId::DrvFL => 0,
            WheelId::DrvRL => 1,
            WheelId::DrvFR => 2,
            WheelId::DrvRR => 3,
        }
    }

    /// Advance the world model by one cycle's duration.
    fn step_world(&mut self) {
        let mut delta_in = [0.0f64; NUM_WHEELS];

        for i in 0..NUM_WHEELS {
            let delta_counts = match self.run_mode {
                RunMode::ResetEncoders => {
                    self.pos_counts[i] = 0.0;
                    0.0
                }
                RunMode::VelocityHold => {
                    self.power[i] * self.max_speed_ips * self.counts_per_inch * self.dt_s
                }
                RunMode::PositionHold => {
                    // Servo towards the target at a rate set by the power
                    // magnitude, without overshooting
                    let err = self.target_counts[i] as f64 - self.pos_counts[i];
                    let step =
                        self.power[i].abs() * self.max_speed_ips * self.counts_per_inch * self.dt_s;
                    err.max(-step).min(step)
                }
            };

            self.pos_counts[i] += delta_counts;
            delta_in[i] = delta_counts / self.counts_per_inch;
        }

        // Differential drive kinematics over the wheel pairs
        let left_in = 0.5 * (delta_in[0] + delta_in[1]);
        let right_in = 0.5 * (delta_in[2] + delta_in[3]);

        self.heading_deg +=
            (right_in - left_in) / self.track_width_in * (180.0 / std::f64::consts::PI);
        self.travel_in += (0.5 * (left_in + right_in)).abs();

        self.clock_s += self.dt_s;

        trace!(
            "SimHw step: pos {:?}, heading {:.2} deg, travel {:.2} in",
            self.pos_counts,
            self.heading_deg,
            self.travel_in
        );
    }
}

impl Default for SimHw {
    fn default() -> Self {
        Self::new()
    }
}

impl Drivetrain for SimHw {
    fn position(&self, wheel: WheelId) -> i32 {
        self.pos_counts[Self::idx(wheel)] as i32
    }

    fn set_target_position(&mut self, wheel: WheelId, counts: i32) {
        self.target_counts[Self::idx(wheel)] = counts;
    }

    fn is_busy(&self, wheel: WheelId) -> bool {
        let i = Self::idx(wheel);
        self.run_mode == RunMode::PositionHold
            && (self.target_counts[i] as f64 - self.pos_counts[i]).abs() > BUSY_TOLERANCE_COUNTS
    }

    fn set_power(&mut self, wheel: WheelId, power: f64) {
        self.power[Self::idx(wheel)] = power.max(-1.0).min(1.0);
    }

    fn set_run_mode(&mut self, mode: RunMode) {
        self.run_mode = mode;

        if mode == RunMode::ResetEncoders {
            self.pos_counts = [0.0; NUM_WHEELS];
            for wheel in ALL_WHEELS.iter() {
                self.set_target_position(*wheel, 0);
            }
        }
    }

    fn set_stop_mode(&mut self, mode: StopMode) {
        self.stop_mode = mode;
    }
}

impl HeadingSensor for SimHw {
    fn absolute_heading_deg(&self) -> f64 {
        self.heading_deg + self.mount_bias_deg
    }
}

impl RangeSensor for SimHw {
    fn distance_cm(&self) -> f64 {
        self.range_cm
    }
}

impl ReflectanceSensor for SimHw {
    fn brightness(&self) -> f64 {
        match self.line_at_in {
            Some(line_in) if self.travel_in >= line_in.abs() => WHITE_BRIGHTNESS,
            _ => FLOOR_BRIGHTNESS,
        }
    }

    fn set_illumination(&mut self, on: bool) {
        self.illumination_on = on;
    }
}

impl ColorSensor for SimHw {
    fn read_channels(&self) -> ColorSample {
        self.channels
    }
}

impl Clock for SimHw {
    fn elapsed_s(&self) -> f64 {
        self.clock_s
    }

    fn reset(&mut self) {
        self.clock_s = 0.0;
    }
}

impl Exec for SimHw {
    fn cooperative_yield(&mut self) {
        self.step_world();

        if let Some(cycles) = self.cancel_after {
            if cycles == 0 {
                self.active = false;
            } else {
                self.cancel_after = Some(cycles - 1);
            }
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
