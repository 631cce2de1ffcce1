//! Implementations for the HeadCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use serde::Serialize;

// Internal
use super::{heading_error, steer, HeadCtrlError, Params};
use crate::head_est::HeadingEst;
use hw_if::{Drivetrain, Exec, Hw};
use util::{
    module::{State, StepStatus},
    params,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Heading control module state
#[derive(Default)]
pub struct HeadCtrl {
    params: Params,

    /// The currently executing turn, or `None` when idle.
    current_cmd: Option<TurnCmd>,

    /// Heading estimate captured for the current turn.
    head_est: HeadingEst,

    report: StatusReport,
}

/// A command to spin on the robot's central axis to a new heading.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TurnCmd {
    /// Turn speed magnitude, in (0, 1].
    pub speed: f64,

    /// Absolute target heading in degrees relative to the last calibration.
    /// 0 = forward at calibration, positive is CCW from forward.
    pub target_deg: f64,
}

/// Status report for HeadCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Heading at the start of the cycle, degrees.
    pub heading_deg: f64,

    /// Error to the target heading, degrees.
    pub error_deg: f64,

    /// Steering demand applied this cycle.
    pub steer: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TurnCmd {
    /// Determine if the command is valid.
    pub fn is_valid(&self) -> bool {
        self.speed > 0.0 && self.speed <= 1.0 && self.target_deg.is_finite()
    }
}

impl HeadCtrl {
    /// Create a new instance of the module from the given parameters.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Begin executing a turn command.
    ///
    /// Execution happens over the following calls to `proc`, one control
    /// cycle per call, until the heading error drops below the threshold.
    /// There is no timeout: turns are expected to always converge, and
    /// cancellation through the executive probe is the only external stop.
    pub fn begin_turn(
        &mut self,
        head_est: HeadingEst,
        cmd: TurnCmd,
    ) -> Result<(), HeadCtrlError> {
        if self.current_cmd.is_some() {
            return Err(HeadCtrlError::TurnAlreadyActive);
        }

        if !cmd.is_valid() {
            return Err(HeadCtrlError::InvalidTurnCmd(cmd));
        }

        self.head_est = head_est;
        self.current_cmd = Some(cmd);

        info!(
            "HeadCtrl turn start: speed {:.2}, target {:.1} deg",
            cmd.speed, cmd.target_deg
        );

        Ok(())
    }
}

impl State for HeadCtrl {
    type InitData = &'static str;
    type InitError = HeadCtrlError;

    type Hw = dyn Hw;
    type StatusReport = StatusReport;
    type ProcError = HeadCtrlError;

    /// Initialise the HeadCtrl module.
    ///
    /// Expected init data is the path to the parameter file.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        self.params = match params::load(init_data) {
            Ok(p) => p,
            Err(e) => return Err(HeadCtrlError::ParamLoadError(e)),
        };

        Ok(())
    }

    /// Perform one cycle of closed-loop heading control.
    fn proc(
        &mut self,
        hw: &mut Self::Hw,
    ) -> Result<(StepStatus, Self::StatusReport), Self::ProcError> {
        let cmd = match self.current_cmd {
            Some(c) => c,
            None => return Err(HeadCtrlError::NoTurnCmd),
        };

        self.report = StatusReport::default();

        // Cancellation zeroes the actuators and returns on the same cycle
        if !hw.is_active() {
            hw.set_side_power(0.0, 0.0);
            self.current_cmd = None;

            info!("HeadCtrl turn cancelled");
            return Ok((StepStatus::Cancelled, self.report));
        }

        let heading_deg = self.head_est.read(&*hw);
        let error_deg = heading_error(cmd.target_deg, heading_deg);

        self.report.heading_deg = heading_deg;
        self.report.error_deg = error_deg;

        if error_deg.abs() <= self.params.heading_threshold_deg {
            // Close enough so no need to move
            hw.set_side_power(0.0, 0.0);
            self.current_cmd = None;

            info!("HeadCtrl turn done: heading {:.2} deg", heading_deg);
            return Ok((StepStatus::Done, self.report));
        }

        // Positive steer turns the robot left, so the right side leads
        let steer = steer(error_deg, self.params.turn_gain);
        let right = cmd.speed * steer;

        self.report.steer = steer;

        hw.set_side_power(-right, right);

        debug!(
            "HeadCtrl cycle: heading {:.2} deg, error {:.2} deg, steer {:.3}",
            heading_deg, error_deg, steer
        );

        Ok((StepStatus::Running, self.report))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
