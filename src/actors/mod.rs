//! Actor system for background timers.
//!
//! Each actor is an independent tokio task that communicates with the
//! logic loop via message passing. The countdown ticker is the only
//! long-lived actor; the single-shot preparation delay is a plain
//! spawned sleep carrying a generation counter.
//!
//! NOTE: Keyboard input is handled synchronously in the logic thread,
//! not via an actor, for minimum latency.

pub mod countdown;

use tokio_util::sync::CancellationToken;

pub use countdown::CountdownActor;

/// Handle to a running actor, used for graceful shutdown.
pub struct ActorHandle {
    cancel: CancellationToken,
}

impl ActorHandle {
    /// Create a new actor handle with a cancellation token.
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Signal the actor to shut down gracefully.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Check if shutdown has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
