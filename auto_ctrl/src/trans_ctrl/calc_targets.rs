//! Encoder target calculation for moves

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::head_ctrl::heading_error;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the per-side travel distances for a move.
///
/// Both sides travel the commanded distance. When the robot's heading at the
/// start of the move is more than `comp_threshold_deg` away from the hold
/// target, the leading side's distance is extended by the arc the robot must
/// sweep to come back on target, so the move settles on the held heading
/// rather than short of the distance.
///
/// Returns `(left_in, right_in)`.
pub fn calc_side_distances(
    distance_in: f64,
    hold_target_deg: f64,
    current_deg: f64,
    wheelbase_radius_in: f64,
    comp_threshold_deg: f64,
) -> (f64, f64) {
    let mut left_in = distance_in;
    let mut right_in = distance_in;

    let delta_deg = heading_error(hold_target_deg, current_deg);

    if delta_deg.abs() > comp_threshold_deg {
        // Arc length the outer side sweeps turning through delta about the
        // central axis
        let arc_in = 2.0 * std::f64::consts::PI * wheelbase_radius_in * delta_deg / 360.0;

        if delta_deg > 0.0 {
            right_in += arc_in;
        } else {
            left_in -= arc_in;
        }
    }

    (left_in, right_in)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
