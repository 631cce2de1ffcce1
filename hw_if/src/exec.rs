//! # Executive probe interface

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Cooperative scheduling hooks provided by the hosting runtime.
pub trait Exec {
    /// Yield control to the hosting scheduler between control cycles.
    fn cooperative_yield(&mut self);

    /// True while the current command is still allowed to run. Once this
    /// returns false the running module shall zero its actuators and return
    /// on the same cycle.
    fn is_active(&self) -> bool;
}
