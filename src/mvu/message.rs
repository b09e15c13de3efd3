//! Messages for the MVU core.
//!
//! Messages are inputs to the update function - they come from keyboard
//! events, timer callbacks, or command completion callbacks.

use crossterm::event::KeyEvent;

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    Resize(u16, u16),

    // Timer callbacks
    /// The preparation delay after a tea selection has elapsed. Carries the
    /// generation it was armed with; stale generations are ignored.
    InfusionDue(u64),
    /// One second of steeping has passed.
    Tick,

    // Store persistence callbacks
    TeasSaved,
    TeasSaveFailed(String),
}
