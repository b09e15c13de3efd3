//! Pure update function for the MVU core.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute. All I/O happens via the
//! returned commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::infusion::{advance_cycle, format_mmss};
use crate::{slog_debug, slog_warn};

use super::command::Command;
use super::message::Message;
use super::model::{
    BrewPhase, MenuForm, Mode, Model, Notification, NotificationLevel, INFO_FINISHED, INFO_RESET,
};

/// Helper to set an error notification and mark model as dirty.
fn set_error(model: &mut Model, message: String) {
    slog_warn!("UI Error: {}", message);
    model.notification = Some(Notification {
        level: NotificationLevel::Error,
        message,
    });
    model.dirty = true;
}

/// Pure update function: Model + Message → Commands
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            model.notification = None; // Clear notification on any key press
            model.dirty = true; // Keyboard input always triggers render
            match model.mode {
                Mode::Brew => update_brew_mode(model, key, &mut cmds),
                Mode::Menu => update_menu_mode(model, key, &mut cmds),
            }
        }

        Message::Resize(_, _) => {
            model.dirty = true; // Resize triggers re-render
        }

        Message::InfusionDue(generation) => {
            if generation != model.prep_generation || model.phase != BrewPhase::Preparing {
                slog_debug!(
                    "Message::InfusionDue stale generation={} current={}",
                    generation,
                    model.prep_generation
                );
                return cmds;
            }
            slog_debug!("Message::InfusionDue generation={}", generation);
            model.phase = BrewPhase::Steeping;
            // First step runs right away; the ticker drives the rest.
            countdown_step(model, &mut cmds);
            cmds.push(Command::StartCountdown);
        }

        Message::Tick => {
            if model.phase == BrewPhase::Steeping {
                countdown_step(model, &mut cmds);
            }
        }

        Message::TeasSaved => {
            slog_debug!("Message::TeasSaved");
        }

        Message::TeasSaveFailed(err) => {
            slog_warn!("Message::TeasSaveFailed err={}", err);
            set_error(model, format!("Failed to save teas: {}", err));
        }
    }

    cmds
}

/// One countdown beat: show the remaining time, decrement, fade the
/// background; at zero, stop ticking and celebrate.
fn countdown_step(model: &mut Model, cmds: &mut Vec<Command>) {
    if model.remaining != 0 {
        model.timer_text = format_mmss(model.remaining);
        model.remaining -= 1;
        model.fade.step();
    } else {
        slog_debug!("Countdown finished");
        cmds.push(Command::StopCountdown);
        model.phase = BrewPhase::Finished;
        model.info = INFO_FINISHED.to_string();
    }
    model.dirty = true;
}

fn update_brew_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => cmds.push(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            cmds.push(Command::Quit)
        }

        KeyCode::Char('1') => select_tea(model, 0, cmds),
        KeyCode::Char('2') => select_tea(model, 1, cmds),

        KeyCode::Char('r') => reset(model, cmds),

        KeyCode::Char('m') => {
            // The menu only opens from the resting leaves screen.
            if model.phase == BrewPhase::Idle {
                slog_debug!("Opening tea menu");
                model.menu = MenuForm::from_store(&model.store);
                model.mode = Mode::Menu;
            }
        }

        _ => {}
    }
}

/// Apply the cycle-advance rule and arm the preparation delay. Only
/// reachable while the tea buttons are visible (Idle or Preparing).
fn select_tea(model: &mut Model, index: usize, cmds: &mut Vec<Command>) {
    if !matches!(model.phase, BrewPhase::Idle | BrewPhase::Preparing) {
        return;
    }
    let Some(tea) = model.store.teas.get(index) else {
        return;
    };

    let same_tea = model.selected == Some(index);
    model.cycle = advance_cycle(model.cycle, same_tea);
    model.selected = Some(index);

    model.remaining = tea.duration_for_cycle(model.cycle);
    model.timer_text = format_mmss(model.remaining);
    model.info = format!("{} - Cycle {}", tea.display_name(), model.cycle);
    model.fade.arm(model.theme.end, model.remaining);
    model.phase = BrewPhase::Preparing;

    // Re-arm the single-shot delay; any in-flight one becomes stale.
    model.prep_generation += 1;
    slog_debug!(
        "Selected tea={} cycle={} remaining={} generation={}",
        tea.display_name(),
        model.cycle,
        model.remaining,
        model.prep_generation
    );
    cmds.push(Command::ScheduleInfusion {
        generation: model.prep_generation,
        delay: model.config.prep_delay(),
    });
}

/// Zero the cycle, stop ticking, restore the start color. The selected
/// tea is retained, so re-selecting it starts over at cycle 1.
fn reset(model: &mut Model, cmds: &mut Vec<Command>) {
    slog_debug!("Reset");
    model.cycle = 0;
    model.remaining = 0;
    model.prep_generation += 1; // Invalidate any pending prep delay
    model.fade.reset();
    model.phase = BrewPhase::Idle;
    model.timer_text = format_mmss(0);
    model.info = INFO_RESET.to_string();
    cmds.push(Command::StopCountdown);
}

fn update_menu_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Enter => match model.menu.apply(&mut model.store) {
            Ok(()) => {
                slog_debug!("Tea menu confirmed");
                model.mode = Mode::Brew;
                cmds.push(Command::SaveTeas);
            }
            Err(e) => set_error(model, e.to_string()),
        },

        KeyCode::Esc => {
            slog_debug!("Tea menu cancelled");
            model.mode = Mode::Brew;
        }

        KeyCode::Tab | KeyCode::Down => model.menu.focus_next(),
        KeyCode::BackTab | KeyCode::Up => model.menu.focus_prev(),

        KeyCode::Backspace => model.menu.backspace(),

        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            cmds.push(Command::Quit)
        }
        KeyCode::Char(c) => model.menu.push_char(c),

        _ => {}
    }
}
