//! Module interfaces
//!
//! Each control module in `auto_ctrl` shall implement all the items in this
//! module. A module is driven as a sequence of discrete control cycles: the
//! owner calls `proc` once per cycle with a borrowed hardware context, and
//! the returned [`StepStatus`] says whether another cycle is required.

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Outcome of one control cycle.
///
/// Every value other than `Running` is terminal for the current command.
/// Timeouts and cancellations are normal termination paths, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum StepStatus {
    /// The command has not completed, another cycle is required.
    Running,

    /// The command completed successfully.
    Done,

    /// The command ran out of time before completing.
    TimedOut,

    /// The command was cancelled by the external activity probe.
    Cancelled
}

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// The module's internal state.
pub trait State {
    /// Data required during initialisation
    type InitData;
    /// An error which can occur during initialisation.
    type InitError;

    /// The hardware context borrowed for the duration of each cycle.
    type Hw: ?Sized;
    /// A report on the status of the cyclic processing.
    type StatusReport;
    /// An error which can occur during cyclic processing.
    type ProcError;

    /// Initialise the module.
    ///
    /// # Inputs
    /// - `init_data`: The input data required by the module.
    ///
    /// # Outputs
    /// - On success `Ok(())`.
    /// - On error an `InitError` instance.
    fn init(&mut self, init_data: Self::InitData)
        -> Result<(), Self::InitError>;

    /// Execute one control cycle of the module.
    ///
    /// # Inputs
    /// - `hw`: The hardware context, borrowed for this cycle only.
    ///
    /// # Outputs
    /// - On success a tuple of the step status and status report.
    /// - On error a `ProcError` instance.
    fn proc(&mut self, hw: &mut Self::Hw)
        -> Result<(StepStatus, Self::StatusReport), Self::ProcError>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StepStatus {
    /// True for any status which ends the current command.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepStatus::Running)
    }
}
