//! Commands for the MVU core.
//!
//! Commands are outputs from the update function - they represent side
//! effects to be executed by the runtime.

use std::time::Duration;

/// Output commands from the update function.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Arm the single-shot preparation delay; fires `InfusionDue(generation)`.
    ScheduleInfusion { generation: u64, delay: Duration },

    /// Start the one-second countdown ticker.
    StartCountdown,

    /// Stop the countdown ticker if one is running.
    StopCountdown,

    /// Persist the tea store wholesale (spawns an async save).
    SaveTeas,

    // App lifecycle
    Quit,
}
