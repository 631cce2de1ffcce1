//! # Autonomous control library.
//!
//! This library converts high-level motion intents (turn to a heading, drive
//! a distance while holding a heading, drive until a floor marking is seen,
//! classify a beacon colour) into per-cycle actuator commands, fusing
//! encoder, gyroscopic-heading, optical-reflectance and colour-sensor
//! feedback.
//!
//! Each control module runs as a sequence of discrete control cycles driven
//! by an external tick loop (see [`exec`]), borrowing the hardware context
//! for one cycle at a time. Hardware bring-up, the match script and teleop
//! mapping are owned by the hosting executive, not by this library.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Beacon classification module - converts colour sensor reads into a beacon colour
pub mod beacon;

/// Cycle driver - runs a control module to completion with cooperative yields
pub mod exec;

/// Heading control module - proportional turn-in-place to an absolute heading
pub mod head_ctrl;

/// Heading estimation module - calibrated heading reads from the raw orientation sensor
pub mod head_est;

/// Line detection module - drives until a floor marking is seen or a timeout elapses
pub mod line_det;

/// Translation control module - drives to a relative encoder-distance target with
/// optional heading and wall-standoff holds
pub mod trans_ctrl;
