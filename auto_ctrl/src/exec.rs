//! # Cycle driver
//!
//! Control modules advance one cycle per call to
//! [`State::proc`][util::module::State::proc], so something has to call them
//! repeatedly. On the robot that is the hosting executive's main loop; for
//! scripted sequences and tests [`drive_to_completion`] runs a module until
//! it reports a terminal status, yielding to the hardware layer between
//! cycles.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::{Exec, Hw};
use util::module::{State, StepStatus};

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Run a control module until it reaches a terminal status.
///
/// The caller must have armed the module with a command first, otherwise the
/// module's "no command" error is returned on the first cycle.
pub fn drive_to_completion<S>(
    module: &mut S,
    hw: &mut (dyn Hw + 'static),
) -> Result<(StepStatus, S::StatusReport), S::ProcError>
where
    S: State<Hw = dyn Hw>,
{
    loop {
        let (status, report) = module.proc(hw)?;

        if status.is_terminal() {
            return Ok((status, report));
        }

        hw.cooperative_yield();
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::head_ctrl::{HeadCtrl, HeadCtrlError, Params, TurnCmd};
    use crate::head_est::HeadingEst;
    use hw_if::sim::SimHw;

    #[test]
    fn test_unarmed_module_errors_immediately() {
        let mut sim = SimHw::new();
        let mut ctrl = HeadCtrl::new(Params {
            heading_threshold_deg: 2.0,
            turn_gain: 0.010,
        });

        assert!(matches!(
            drive_to_completion(&mut ctrl, &mut sim),
            Err(HeadCtrlError::NoTurnCmd)
        ));
    }

    #[test]
    fn test_runs_a_turn_to_done() {
        let mut sim = SimHw::new();
        let mut ctrl = HeadCtrl::new(Params {
            heading_threshold_deg: 2.0,
            turn_gain: 0.010,
        });

        let est = HeadingEst::calibrate(&sim);
        ctrl.begin_turn(
            est,
            TurnCmd {
                speed: 0.5,
                target_deg: 45.0,
            },
        )
        .unwrap();

        let (status, report) = drive_to_completion(&mut ctrl, &mut sim).unwrap();

        assert_eq!(status, StepStatus::Done);
        assert!(report.error_deg.abs() <= 2.0);
    }
}
