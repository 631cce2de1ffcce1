//! Simulated autonomous routine executable entry point.
//!
//! Runs a short scripted routine against the simulated hardware model:
//!
//!     - Initialise all modules
//!     - Calibrate the heading estimate
//!     - Turn onto the cross-field heading
//!     - Drive towards the marked zone holding the new heading
//!     - Creep forward until the floor marking is found
//!     - Classify the beacon colour
//!
//! This is a host-side demonstration of the control modules, driven by the
//! same cycle loop the robot-side executive uses. The `AUTO_SW_ROOT`
//! environment variable must point at the software checkout so the parameter
//! files and session directory can be found.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::info;

// Internal
use auto_ctrl::{
    beacon::BeaconClassifier,
    exec::drive_to_completion,
    head_ctrl::{HeadCtrl, TurnCmd},
    head_est::HeadingEst,
    line_det::{FindCmd, LineDet},
    trans_ctrl::{HeadingHold, MoveCmd, TransCtrl},
};
use hw_if::{sim::SimHw, ColorSample};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    // Initialise session
    let session = Session::new("sim_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution
    info!("Autonomous Control Simulation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- MODULE INITIALISATION ----

    let mut head_ctrl = HeadCtrl::default();
    head_ctrl
        .init("head_ctrl.toml")
        .wrap_err("Failed to initialise HeadCtrl")?;

    let mut trans_ctrl = TransCtrl::default();
    trans_ctrl
        .init("trans_ctrl.toml")
        .wrap_err("Failed to initialise TransCtrl")?;

    let mut line_det = LineDet::default();
    line_det
        .init("line_det.toml")
        .wrap_err("Failed to initialise LineDet")?;

    let beacon = BeaconClassifier::init("beacon.toml").wrap_err("Failed to initialise Beacon")?;

    info!("All modules initialised\n");

    // ---- WORLD SETUP ----

    let mut sim = SimHw::new();

    // A marked zone 30 inches into the run, with a blue beacon beside it
    sim.line_at_in = Some(30.0);
    sim.channels = ColorSample {
        red: 40.0,
        green: 60.0,
        blue: 700.0,
        alpha: 180.0,
    };

    let head_est = HeadingEst::calibrate(&sim);

    // ---- ROUTINE ----

    head_ctrl.begin_turn(
        head_est,
        TurnCmd {
            speed: 0.5,
            target_deg: 90.0,
        },
    )?;
    let (status, report) = drive_to_completion(&mut head_ctrl, &mut sim)?;
    info!(
        "Turn finished with {:?}: heading {:.2} deg\n",
        status, report.heading_deg
    );

    trans_ctrl.begin_move(
        &mut sim,
        head_est,
        MoveCmd {
            speed: 0.8,
            distance_in: 24.0,
            timeout_s: 10.0,
            heading_hold: Some(HeadingHold {
                target_deg: 90.0,
                aggressive: false,
            }),
            range_hold: None,
        },
    )?;
    let (status, report) = drive_to_completion(&mut trans_ctrl, &mut sim)?;
    info!(
        "Drive finished with {:?}: heading error {:.2} deg\n",
        status, report.heading_error_deg
    );

    line_det.begin_find(
        &mut sim,
        FindCmd {
            speed: 0.2,
            timeout_s: 10.0,
        },
    )?;
    let (status, report) = drive_to_completion(&mut line_det, &mut sim)?;
    info!(
        "Line find finished with {:?}: found {}, brightness {:.2}\n",
        status, report.found, report.brightness
    );

    let classification = beacon.read_and_classify(&sim);
    info!(
        "Beacon classified as {:?} (hue {:.1} deg, alpha {:.0})\n",
        classification.color, classification.hue_deg, classification.alpha
    );

    info!("Routine complete");

    Ok(())
}
