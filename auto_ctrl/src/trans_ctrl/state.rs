//! Implementations for the TransCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use serde::Serialize;

// Internal
use super::{calc_side_distances, MoveCmd, Params, TransCtrlError};
use crate::head_ctrl::{heading_error, steer};
use crate::head_est::HeadingEst;
use hw_if::{
    drivetrain::{ALL_WHEELS, NUM_WHEELS},
    Clock, Drivetrain, Exec, Hw, RangeSensor, RunMode,
};
use util::{
    module::{State, StepStatus},
    params,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Translation control module state
#[derive(Default)]
pub struct TransCtrl {
    params: Params,

    /// The currently executing move, or `None` when idle.
    current_cmd: Option<MoveCmd>,

    /// Heading estimate captured for the current move.
    head_est: HeadingEst,

    /// Encoder targets set at the start of the move, in [`ALL_WHEELS`] order.
    target_counts: [i32; NUM_WHEELS],

    /// Speed currently demanded, ramping up from the minimum to the
    /// commanded speed.
    ramped_speed: f64,

    report: StatusReport,
}

/// Status report for TransCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Encoder targets of the move, in [`ALL_WHEELS`] order.
    pub target_counts: [i32; NUM_WHEELS],

    /// Speed demanded this cycle after ramping.
    pub ramped_speed: f64,

    /// Heading target after any range-hold bias, degrees.
    pub effective_target_deg: f64,

    /// Error to the effective heading target, degrees.
    pub heading_error_deg: f64,

    /// Error to the range-hold target, centimetres. Zero when no range hold
    /// is commanded.
    pub range_error_cm: f64,

    /// Power demanded on the left wheel pair this cycle.
    pub left_power: f64,

    /// Power demanded on the right wheel pair this cycle.
    pub right_power: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TransCtrl {
    /// Create a new instance of the module from the given parameters.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Begin executing a move command.
    ///
    /// The encoder targets are computed once here from the positions at the
    /// start of the move, then the drivetrain servos onto them over the
    /// following calls to `proc`.
    pub fn begin_move(
        &mut self,
        hw: &mut dyn Hw,
        head_est: HeadingEst,
        cmd: MoveCmd,
    ) -> Result<(), TransCtrlError> {
        if self.current_cmd.is_some() {
            return Err(TransCtrlError::MoveAlreadyActive);
        }

        if !cmd.is_valid() {
            return Err(TransCtrlError::InvalidMoveCmd(cmd));
        }

        // When holding a heading the side distances are compensated for any
        // initial heading error, so the robot comes back on target over the
        // move instead of finishing short
        let (left_in, right_in) = match cmd.heading_hold {
            Some(hold) => calc_side_distances(
                cmd.distance_in,
                hold.target_deg,
                head_est.read(&*hw),
                self.params.wheelbase_radius_in,
                self.params.turn_comp_threshold_deg,
            ),
            None => (cmd.distance_in, cmd.distance_in),
        };

        let side_in = [left_in, left_in, right_in, right_in];
        for (i, wheel) in ALL_WHEELS.iter().enumerate() {
            let target =
                hw.position(*wheel) + (side_in[i] * self.params.counts_per_inch) as i32;
            hw.set_target_position(*wheel, target);
            self.target_counts[i] = target;
        }

        hw.set_run_mode(RunMode::PositionHold);
        hw.reset();

        self.ramped_speed = self.params.ramp_min_speed.min(cmd.speed);
        hw.set_all_power(self.ramped_speed.abs());

        self.head_est = head_est;
        self.current_cmd = Some(cmd);

        info!(
            "TransCtrl move start: {:.1} in at speed {:.2}, sides ({:.2}, {:.2}) in",
            cmd.distance_in, cmd.speed, left_in, right_in
        );

        Ok(())
    }

    /// Stop the drivetrain and return it to velocity-hold mode.
    fn finish(&mut self, hw: &mut dyn Hw) {
        hw.set_all_power(0.0);
        hw.set_run_mode(RunMode::VelocityHold);
        self.current_cmd = None;
    }
}

impl State for TransCtrl {
    type InitData = &'static str;
    type InitError = TransCtrlError;

    type Hw = dyn Hw;
    type StatusReport = StatusReport;
    type ProcError = TransCtrlError;

    /// Initialise the TransCtrl module.
    ///
    /// Expected init data is the path to the parameter file.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        self.params = match params::load(init_data) {
            Ok(p) => p,
            Err(e) => return Err(TransCtrlError::ParamLoadError(e)),
        };

        Ok(())
    }

    /// Perform one cycle of translation control.
    fn proc(
        &mut self,
        hw: &mut Self::Hw,
    ) -> Result<(StepStatus, Self::StatusReport), Self::ProcError> {
        let cmd = match self.current_cmd {
            Some(c) => c,
            None => return Err(TransCtrlError::NoMoveCmd),
        };

        // Terminal exits return this report as-is, so it carries the last
        // ramped speed rather than a zero
        self.report = StatusReport {
            target_counts: self.target_counts,
            ramped_speed: self.ramped_speed,
            ..Default::default()
        };

        if !hw.is_active() {
            self.finish(hw);

            info!("TransCtrl move cancelled");
            return Ok((StepStatus::Cancelled, self.report));
        }

        if hw.elapsed_s() >= cmd.timeout_s {
            self.finish(hw);

            warn!("TransCtrl move timed out after {:.2} s", cmd.timeout_s);
            return Ok((StepStatus::TimedOut, self.report));
        }

        if !hw.all_busy() {
            self.finish(hw);

            info!("TransCtrl move done");
            return Ok((StepStatus::Done, self.report));
        }

        // Ramp towards the commanded speed to limit wheel slip at pull-away
        self.ramped_speed = (self.ramped_speed + self.params.ramp_increment).min(cmd.speed);
        self.report.ramped_speed = self.ramped_speed;

        let mut steer_demand = 0.0;

        if let Some(hold) = cmd.heading_hold {
            let mut target_deg = hold.target_deg;

            if let Some(range) = cmd.range_hold {
                let range_error_cm = hw.distance_cm() - range.target_cm;
                self.report.range_error_cm = range_error_cm;

                // Bias the held heading towards the wall-standoff target. The
                // bias flips with travel direction so the correction always
                // closes the range error.
                if range_error_cm.abs() >= self.params.range_threshold_cm {
                    target_deg -= cmd.distance_in.signum()
                        * range_error_cm
                        * self.params.range_gain_deg_cm;
                }
            }

            let heading_deg = self.head_est.read(&*hw);
            let error_deg = heading_error(target_deg, heading_deg);

            let gain = if hold.aggressive {
                self.params.drive_gain_aggressive
            } else {
                self.params.drive_gain
            };

            steer_demand = steer(error_deg, gain);

            // Driving backwards mirrors the steering sense
            if cmd.distance_in < 0.0 {
                steer_demand = -steer_demand;
            }

            self.report.effective_target_deg = target_deg;
            self.report.heading_error_deg = error_deg;
        }

        let mut left = self.ramped_speed - steer_demand;
        let mut right = self.ramped_speed + steer_demand;

        // Preserve the steering ratio if either side saturates
        let max = left.abs().max(right.abs());
        if max > 1.0 {
            left /= max;
            right /= max;
        }

        // In position hold the power is a speed magnitude, direction comes
        // from the encoder targets
        hw.set_side_power(left.abs(), right.abs());

        self.report.left_power = left.abs();
        self.report.right_power = right.abs();

        debug!(
            "TransCtrl cycle: speed {:.3}, steer {:.3}, powers ({:.3}, {:.3})",
            self.ramped_speed,
            steer_demand,
            left.abs(),
            right.abs()
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
    use crate::trans_ctrl::{HeadingHold, RangeHold};
    use hw_if::{sim::SimHw, WheelId};

    fn test_params() -> Params {
        Params {
            counts_per_inch: 89.1,
            wheelbase_radius_in: 8.0,
            ramp_min_speed: 0.30,
            ramp_increment: 0.015,
            turn_comp_threshold_deg: 5.0,
            drive_gain: 0.03,
            drive_gain_aggressive: 0.05,
            range_threshold_cm: 1.0,
            range_gain_deg_cm: 1.25,
        }
    }

    fn base_cmd() -> MoveCmd {
        MoveCmd {
            speed: 0.8,
            distance_in: 24.0,
            timeout_s: 5.0,
            heading_hold: None,
            range_hold: None,
        }
    }

    #[test]
    fn test_begin_sets_targets_and_pull_away() {
        let mut sim = SimHw::new();
        let mut ctrl = TransCtrl::new(test_params());

        ctrl.begin_move(&mut sim, HeadingEst::default(), base_cmd())
            .unwrap();

        // 24 in at 89.1 counts/in, truncated
        for wheel in ALL_WHEELS.iter() {
            assert_eq!(sim.wheel_target(*wheel), 2138);
        }

        assert_eq!(sim.run_mode(), RunMode::PositionHold);
        assert_eq!(sim.elapsed_s(), 0.0);

        // Pull-away is at the ramp minimum, not the commanded speed
        for wheel in ALL_WHEELS.iter() {
            assert!((sim.wheel_power(*wheel) - 0.30).abs() < 1e-12);
        }
    }

    #[test]
    fn test_speed_ramps_towards_commanded() {
        let mut sim = SimHw::new();
        let mut ctrl = TransCtrl::new(test_params());

        ctrl.begin_move(&mut sim, HeadingEst::default(), base_cmd())
            .unwrap();

        let (status, report) = ctrl.proc(&mut sim).unwrap();
        assert_eq!(status, StepStatus::Running);
        assert!((report.ramped_speed - 0.315).abs() < 1e-12);

        let (_, report) = ctrl.proc(&mut sim).unwrap();
        assert!((report.ramped_speed - 0.330).abs() < 1e-12);

        // The ramp never passes the commanded speed
        for _ in 0..200 {
            ctrl.proc(&mut sim).unwrap();
        }
        let (_, report) = ctrl.proc(&mut sim).unwrap();
        assert_eq!(report.ramped_speed, 0.8);
    }

    #[test]
    fn test_steer_blend_preserves_ratio_when_saturated() {
        let mut sim = SimHw::new();
        let mut ctrl = TransCtrl::new(Params {
            ramp_min_speed: 1.0,
            ..test_params()
        });

        ctrl.begin_move(
            &mut sim,
            HeadingEst::default(),
            MoveCmd {
                speed: 1.0,
                heading_hold: Some(HeadingHold {
                    target_deg: 5.0,
                    aggressive: true,
                }),
                ..base_cmd()
            },
        )
        .unwrap();

        // Error 5 deg at gain 0.05 gives steer 0.25, so 0.75/1.25 rescaled
        // to 0.6/1.0
        let (_, report) = ctrl.proc(&mut sim).unwrap();
        assert!((report.left_power - 0.6).abs() < 1e-9);
        assert!((report.right_power - 1.0).abs() < 1e-9);

        assert!((sim.wheel_power(WheelId::DrvFL) - 0.6).abs() < 1e-9);
        assert!((sim.wheel_power(WheelId::DrvFR) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_moves_mirror_the_steer() {
        let mut sim = SimHw::new();
        let mut ctrl = TransCtrl::new(Params {
            ramp_min_speed: 1.0,
            ..test_params()
        });

        ctrl.begin_move(
            &mut sim,
            HeadingEst::default(),
            MoveCmd {
                speed: 1.0,
                distance_in: -24.0,
                heading_hold: Some(HeadingHold {
                    target_deg: 5.0,
                    aggressive: true,
                }),
                ..base_cmd()
            },
        )
        .unwrap();

        let (_, report) = ctrl.proc(&mut sim).unwrap();
        assert!((report.left_power - 1.0).abs() < 1e-9);
        assert!((report.right_power - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_range_hold_biases_the_heading_target() {
        let mut sim = SimHw::new();
        sim.range_cm = 13.0;

        let mut ctrl = TransCtrl::new(test_params());

        ctrl.begin_move(
            &mut sim,
            HeadingEst::default(),
            MoveCmd {
                heading_hold: Some(HeadingHold {
                    target_deg: 0.0,
                    aggressive: false,
                }),
                range_hold: Some(RangeHold { target_cm: 10.0 }),
                ..base_cmd()
            },
        )
        .unwrap();

        // 3 cm too far from the wall at 1.25 deg/cm biases the target by
        // -3.75 deg, steering the forward-driving robot towards the wall
        let (_, report) = ctrl.proc(&mut sim).unwrap();
        assert!((report.range_error_cm - 3.0).abs() < 1e-9);
        assert!((report.effective_target_deg + 3.75).abs() < 1e-9);
    }

    #[test]
    fn test_range_hold_dead_band() {
        let mut sim = SimHw::new();
        sim.range_cm = 10.5;

        let mut ctrl = TransCtrl::new(test_params());

        ctrl.begin_move(
            &mut sim,
            HeadingEst::default(),
            MoveCmd {
                heading_hold: Some(HeadingHold {
                    target_deg: 0.0,
                    aggressive: false,
                }),
                range_hold: Some(RangeHold { target_cm: 10.0 }),
                ..base_cmd()
            },
        )
        .unwrap();

        let (_, report) = ctrl.proc(&mut sim).unwrap();
        assert_eq!(report.effective_target_deg, 0.0);
    }

    #[test]
    fn test_timeout_restores_velocity_hold() {
        let mut sim = SimHw::new();
        let mut ctrl = TransCtrl::new(test_params());

        ctrl.begin_move(
            &mut sim,
            HeadingEst::default(),
            MoveCmd {
                timeout_s: 0.05,
                ..base_cmd()
            },
        )
        .unwrap();

        // Three 0.02 s cycles pass the 0.05 s timeout
        for _ in 0..3 {
            sim.cooperative_yield();
        }

        let (status, report) = ctrl.proc(&mut sim).unwrap();
        assert_eq!(status, StepStatus::TimedOut);
        assert_eq!(sim.run_mode(), RunMode::VelocityHold);

        // The terminal report carries the last demanded speed, here still
        // the pull-away minimum as no full cycle ran
        assert!((report.ramped_speed - 0.30).abs() < 1e-12);

        for wheel in ALL_WHEELS.iter() {
            assert_eq!(sim.wheel_power(*wheel), 0.0);
        }
    }

    #[test]
    fn test_done_when_targets_reached() {
        let mut sim = SimHw::new();
        let mut ctrl = TransCtrl::new(test_params());

        // 0.05 in is about 4 counts, inside the busy tolerance from the off
        ctrl.begin_move(
            &mut sim,
            HeadingEst::default(),
            MoveCmd {
                distance_in: 0.05,
                ..base_cmd()
            },
        )
        .unwrap();

        let (status, _) = ctrl.proc(&mut sim).unwrap();
        assert_eq!(status, StepStatus::Done);
        assert_eq!(sim.run_mode(), RunMode::VelocityHold);

        assert!(matches!(
            ctrl.proc(&mut sim),
            Err(TransCtrlError::NoMoveCmd)
        ));
    }

    #[test]
    fn test_cancel_stops_the_move() {
        let mut sim = SimHw::new();
        let mut ctrl = TransCtrl::new(test_params());

        ctrl.begin_move(&mut sim, HeadingEst::default(), base_cmd())
            .unwrap();

        // One full cycle ramps the speed before the cancellation lands
        let (status, report) = ctrl.proc(&mut sim).unwrap();
        assert_eq!(status, StepStatus::Running);
        assert!((report.ramped_speed - 0.315).abs() < 1e-12);

        sim.cancel_after(0);
        sim.cooperative_yield();

        let (status, report) = ctrl.proc(&mut sim).unwrap();
        assert_eq!(status, StepStatus::Cancelled);

        // The cancelled cycle reports the speed demanded when it was cut
        assert!((report.ramped_speed - 0.315).abs() < 1e-12);

        for wheel in ALL_WHEELS.iter() {
            assert_eq!(sim.wheel_power(*wheel), 0.0);
        }
    }
}
