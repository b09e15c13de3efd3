use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::actors::{ActorHandle, CountdownActor};
use crate::config::Config;
use crate::mvu::{update, Command, Message, Model};
use crate::render::RenderState;
use crate::theme::Theme;
use crate::{slog_debug, slog_error, Result};

const MAX_BG_MESSAGES: usize = 50;

/// The logic half of the decoupled loop: owns the model, consumes
/// keyboard events and timer messages, executes commands, and pushes
/// immutable snapshots to the render thread.
pub struct LogicThread;

impl LogicThread {
    pub fn run(
        config: Config,
        theme: Theme,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, theme, state_tx, shutdown))
    }

    async fn run_async(
        config: Config,
        theme: Theme,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        slog_debug!(
            "LogicThread::run_async prep_delay={:?}",
            config.prep_delay()
        );
        let mut model = Model::load(config, theme).await?;
        slog_debug!("Model loaded: {} teas", model.store.teas.len());

        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();
        // Handle to the running countdown ticker, owned by the runtime so
        // the model stays free of infrastructure.
        let mut ticker: Option<ActorHandle> = None;

        send_state(&state_tx, &model);

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Keyboard input (priority)
            while event::poll(Duration::ZERO)? {
                let msg = match event::read()? {
                    Event::Key(key) => Message::Key(key),
                    Event::Resize(w, h) => Message::Resize(w, h),
                    _ => continue,
                };
                for cmd in update(&mut model, msg) {
                    if execute_command(&model, cmd, &msg_tx, &mut ticker) {
                        shutdown.store(true, Ordering::Relaxed);
                        stop_ticker(&mut ticker);
                        return Ok(());
                    }
                }

                if model.dirty {
                    send_state(&state_tx, &model);
                    model.dirty = false;
                }
            }

            // Timer and persistence messages (bounded)
            for _ in 0..MAX_BG_MESSAGES {
                let Ok(msg) = msg_rx.try_recv() else { break };
                for cmd in update(&mut model, msg) {
                    if execute_command(&model, cmd, &msg_tx, &mut ticker) {
                        shutdown.store(true, Ordering::Relaxed);
                        stop_ticker(&mut ticker);
                        return Ok(());
                    }
                }
            }

            if model.dirty {
                send_state(&state_tx, &model);
                model.dirty = false;
            }

            tokio::time::sleep(Duration::from_micros(500)).await;
        }

        stop_ticker(&mut ticker);
        Ok(())
    }
}

/// Execute one side effect. Returns true when the app should quit.
fn execute_command(
    model: &Model,
    cmd: Command,
    msg_tx: &mpsc::UnboundedSender<Message>,
    ticker: &mut Option<ActorHandle>,
) -> bool {
    match cmd {
        Command::ScheduleInfusion { generation, delay } => {
            slog_debug!(
                "Command::ScheduleInfusion generation={} delay={:?}",
                generation,
                delay
            );
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(Message::InfusionDue(generation));
            });
        }

        Command::StartCountdown => {
            slog_debug!("Command::StartCountdown");
            stop_ticker(ticker);
            *ticker = Some(CountdownActor::new(msg_tx.clone()).spawn());
        }

        Command::StopCountdown => {
            slog_debug!("Command::StopCountdown");
            stop_ticker(ticker);
        }

        Command::SaveTeas => {
            slog_debug!("Command::SaveTeas teas={}", model.store.teas.len());
            let store = model.store.clone();
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                match store.save().await {
                    Ok(()) => {
                        let _ = tx.send(Message::TeasSaved);
                    }
                    Err(e) => {
                        slog_error!("Tea store save failed: {}", e);
                        let _ = tx.send(Message::TeasSaveFailed(e.to_string()));
                    }
                }
            });
        }

        Command::Quit => {
            slog_debug!("Command::Quit");
            return true;
        }
    }

    false
}

fn stop_ticker(ticker: &mut Option<ActorHandle>) {
    if let Some(handle) = ticker.take() {
        handle.shutdown();
    }
}

fn send_state(state_tx: &Sender<RenderState>, model: &Model) {
    let _ = state_tx.try_send(model.snapshot());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    /// The state channel (bounded(1) with try_send) must never block;
    /// this keeps the logic loop decoupled from the render thread.
    #[test]
    fn test_state_channel_never_blocks() {
        let (tx, _rx) = crossbeam_channel::bounded::<RenderState>(1);

        // Fill the channel
        let _ = tx.try_send(RenderState::default());

        let start = Instant::now();
        let result = tx.try_send(RenderState::default());
        let elapsed = start.elapsed();

        assert!(
            elapsed.as_millis() < 1,
            "try_send blocked for {:?} - this breaks the decoupled loop",
            elapsed
        );
        assert!(result.is_err());
    }

    /// When the logic loop outruns the renderer, old snapshots are drained
    /// and only the latest is received.
    #[test]
    fn test_latest_wins_pattern() {
        let (tx, rx) = crossbeam_channel::bounded::<RenderState>(1);

        for i in 0..5 {
            let mut state = RenderState::default();
            state.cycle = i;
            let _ = rx.try_recv();
            let _ = tx.try_send(state);
        }

        let received = rx.try_recv().unwrap();
        assert_eq!(received.cycle, 4, "Should receive the latest state");
    }

    #[test]
    fn test_channel_capacity_is_one() {
        let (tx, rx) = crossbeam_channel::bounded::<RenderState>(1);

        assert!(tx.try_send(RenderState::default()).is_ok());
        assert!(tx.try_send(RenderState::default()).is_err());

        let _ = rx.try_recv();
        assert!(tx.try_send(RenderState::default()).is_ok());
    }

    #[test]
    fn test_snapshot_versions_increase() {
        use crate::render::next_version;

        let v1 = next_version();
        let v2 = next_version();
        let v3 = next_version();

        assert!(v2 > v1, "Version should increase: {} > {}", v2, v1);
        assert!(v3 > v2, "Version should increase: {} > {}", v3, v2);
    }
}
