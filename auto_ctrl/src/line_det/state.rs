//! Implementations for the LineDet state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use serde::Serialize;

// Internal
use super::{LineDetError, Params};
use hw_if::{Clock, Drivetrain, Exec, Hw, ReflectanceSensor, StopMode};
use util::{
    module::{State, StepStatus},
    params,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Line detection module state
#[derive(Default)]
pub struct LineDet {
    params: Params,

    /// The currently executing find, or `None` when idle.
    current_cmd: Option<FindCmd>,

    report: StatusReport,
}

/// A command to drive until a white floor marking is detected.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FindCmd {
    /// Signed drive speed in [-1, 0) or (0, 1]. Negative searches backwards.
    pub speed: f64,

    /// Maximum duration of the search in seconds.
    pub timeout_s: f64,
}

/// Status report for LineDet processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// True once the marking has been detected.
    pub found: bool,

    /// Reflectance brightness read this cycle.
    pub brightness: f64,

    /// Time spent searching, seconds.
    pub elapsed_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FindCmd {
    /// Determine if the command is valid.
    pub fn is_valid(&self) -> bool {
        self.speed != 0.0 && self.speed.abs() <= 1.0 && self.timeout_s > 0.0
    }
}

impl LineDet {
    /// Create a new instance of the module from the given parameters.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Begin executing a find command.
    ///
    /// The drivetrain is put into brake mode so the robot stops on the
    /// marking rather than coasting over it, and the reflectance
    /// illumination is switched on. The illumination is left on afterwards
    /// so a following module can keep using the sensor.
    pub fn begin_find(&mut self, hw: &mut dyn Hw, cmd: FindCmd) -> Result<(), LineDetError> {
        if self.current_cmd.is_some() {
            return Err(LineDetError::FindAlreadyActive);
        }

        if !cmd.is_valid() {
            return Err(LineDetError::InvalidFindCmd(cmd));
        }

        hw.set_stop_mode(StopMode::Brake);
        hw.set_illumination(true);
        hw.reset();

        self.current_cmd = Some(cmd);

        info!(
            "LineDet find start: speed {:.2}, timeout {:.2} s",
            cmd.speed, cmd.timeout_s
        );

        Ok(())
    }

    /// Brake the drivetrain and restore the coast stop mode.
    fn stop(&mut self, hw: &mut dyn Hw) {
        hw.set_all_power(0.0);
        hw.set_stop_mode(StopMode::Coast);
        self.current_cmd = None;
    }
}

impl State for LineDet {
    type InitData = &'static str;
    type InitError = LineDetError;

    type Hw = dyn Hw;
    type StatusReport = StatusReport;
    type ProcError = LineDetError;

    /// Initialise the LineDet module.
    ///
    /// Expected init data is the path to the parameter file.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        self.params = match params::load(init_data) {
            Ok(p) => p,
            Err(e) => return Err(LineDetError::ParamLoadError(e)),
        };

        Ok(())
    }

    /// Perform one cycle of the line search.
    fn proc(
        &mut self,
        hw: &mut Self::Hw,
    ) -> Result<(StepStatus, Self::StatusReport), Self::ProcError> {
        let cmd = match self.current_cmd {
            Some(c) => c,
            None => return Err(LineDetError::NoFindCmd),
        };

        // Read before the terminal checks so timed-out and cancelled cycles
        // still report the brightness they saw
        self.report = StatusReport {
            brightness: hw.brightness(),
            elapsed_s: hw.elapsed_s(),
            ..Default::default()
        };

        if !hw.is_active() {
            self.stop(hw);

            info!("LineDet find cancelled");
            return Ok((StepStatus::Cancelled, self.report));
        }

        if hw.elapsed_s() >= cmd.timeout_s {
            self.stop(hw);

            warn!("LineDet find timed out after {:.2} s", cmd.timeout_s);
            return Ok((StepStatus::TimedOut, self.report));
        }

        if self.report.brightness >= self.params.white_threshold {
            self.stop(hw);
            self.report.found = true;

            info!(
                "LineDet found marking: brightness {:.2} after {:.2} s",
                self.report.brightness, self.report.elapsed_s
            );
            return Ok((StepStatus::Done, self.report));
        }

        hw.set_all_power(cmd.speed);

        debug!(
            "LineDet cycle: brightness {:.2}, elapsed {:.2} s",
            self.report.brightness, self.report.elapsed_s
        );

        Ok((StepStatus::Running, self.report))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use hw_if::{drivetrain::ALL_WHEELS, sim::SimHw};

    fn test_params() -> Params {
        Params {
            white_threshold: 2.0,
        }
    }

    #[test]
    fn test_begin_brakes_and_illuminates() {
        let mut sim = SimHw::new();
        let mut det = LineDet::new(test_params());

        det.begin_find(
            &mut sim,
            FindCmd {
                speed: 0.5,
                timeout_s: 5.0,
            },
        )
        .unwrap();

        assert_eq!(sim.stop_mode(), StopMode::Brake);
        assert!(sim.illumination_on);
        assert_eq!(sim.elapsed_s(), 0.0);
    }

    #[test]
    fn test_find_stops_on_the_marking() {
        let mut sim = SimHw::new();
        sim.line_at_in = Some(5.0);

        let mut det = LineDet::new(test_params());
        det.begin_find(
            &mut sim,
            FindCmd {
                speed: 0.5,
                timeout_s: 5.0,
            },
        )
        .unwrap();

        let mut last = (StepStatus::Running, StatusReport::default());
        for _ in 0..100 {
            last = det.proc(&mut sim).unwrap();
            if last.0.is_terminal() {
                break;
            }
            sim.cooperative_yield();
        }

        assert_eq!(last.0, StepStatus::Done);
        assert!(last.1.found);
        assert!(last.1.brightness >= 2.0);

        // Brake released once stopped
        assert_eq!(sim.stop_mode(), StopMode::Coast);
        for wheel in ALL_WHEELS.iter() {
            assert_eq!(sim.wheel_power(*wheel), 0.0);
        }

        // Illumination is deliberately left on
        assert!(sim.illumination_on);
    }

    #[test]
    fn test_find_times_out_on_plain_floor() {
        let mut sim = SimHw::new();
        sim.line_at_in = None;

        let mut det = LineDet::new(test_params());
        det.begin_find(
            &mut sim,
            FindCmd {
                speed: 0.5,
                timeout_s: 0.1,
            },
        )
        .unwrap();

        let mut last = (StepStatus::Running, StatusReport::default());
        for _ in 0..100 {
            last = det.proc(&mut sim).unwrap();
            if last.0.is_terminal() {
                break;
            }
            sim.cooperative_yield();
        }

        assert_eq!(last.0, StepStatus::TimedOut);
        assert!(!last.1.found);
        assert_eq!(sim.stop_mode(), StopMode::Coast);

        // The timed-out cycle still reports the plain-floor brightness it
        // observed, not a zeroed field
        assert!(last.1.brightness > 0.0);
        assert!(last.1.brightness < 2.0);
    }

    #[test]
    fn test_invalid_cmd_rejected() {
        let mut sim = SimHw::new();
        let mut det = LineDet::new(test_params());

        assert!(matches!(
            det.begin_find(
                &mut sim,
                FindCmd {
                    speed: 0.0,
                    timeout_s: 5.0
                }
            ),
            Err(LineDetError::InvalidFindCmd(_))
        ));

        assert!(matches!(
            det.begin_find(
                &mut sim,
                FindCmd {
                    speed: -1.5,
                    timeout_s: 5.0
                }
            ),
            Err(LineDetError::InvalidFindCmd(_))
        ));
    }
}
