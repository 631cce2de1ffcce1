//! # Match clock interface

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Elapsed time source used for cooperative timeouts.
///
/// Timeouts are checked once per control cycle, not preemptively, so real
/// elapsed time may exceed a nominal timeout by up to one cycle's duration.
pub trait Clock {
    /// Seconds elapsed since the last [`Clock::reset`].
    fn elapsed_s(&self) -> f64;

    /// Restart the clock from zero.
    fn reset(&mut self);
}
