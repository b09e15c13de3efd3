//! Countdown actor: the one-second tick source driving an infusion.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::mvu::Message;
use crate::slog_debug;

use super::ActorHandle;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Actor that sends [`Message::Tick`] once per second until cancelled.
///
/// The update function runs the first countdown step itself when the
/// infusion starts, so the first tick here fires a full interval later.
pub struct CountdownActor {
    msg_tx: mpsc::UnboundedSender<Message>,
    interval: Duration,
}

impl CountdownActor {
    pub fn new(msg_tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            msg_tx,
            interval: TICK_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn spawn(self) -> ActorHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        slog_debug!("CountdownActor::spawn interval={:?}", self.interval);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            // The first interval tick completes immediately; consume it so
            // ticks land a full second apart from the infusion start.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = cancel_clone.cancelled() => {
                        slog_debug!("CountdownActor cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        if self.msg_tx.send(Message::Tick).is_err() {
                            slog_debug!("CountdownActor: message channel closed");
                            break;
                        }
                    }
                }
            }
        });

        ActorHandle::new(cancel)
    }
}
