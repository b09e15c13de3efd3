//! Shared fixtures for the integration suite.

use crossterm::event::{KeyCode, KeyEvent};

use steep::config::Config;
use steep::mvu::{update, Command, Message, Model};
use steep::store::TeaStore;
use steep::theme::Theme;

/// A model over the default two-tea store with a default theme.
pub fn default_model() -> Model {
    model_with(TeaStore::default())
}

/// A model over a caller-provided store.
pub fn model_with(store: TeaStore) -> Model {
    Model::new(store, Config::default(), Theme::default())
}

/// Feed one key press through the update function.
pub fn press(model: &mut Model, code: KeyCode) -> Vec<Command> {
    update(model, Message::Key(KeyEvent::from(code)))
}

/// Type a string into the focused menu field.
pub fn type_text(model: &mut Model, text: &str) {
    for c in text.chars() {
        press(model, KeyCode::Char(c));
    }
}

/// Clear the focused menu field.
pub fn clear_field(model: &mut Model) {
    for _ in 0..25 {
        press(model, KeyCode::Backspace);
    }
}

/// Select a tea and deliver its prep callback, entering Steeping.
/// Returns the duration the countdown started from.
pub fn brew(model: &mut Model, key: char) -> u32 {
    let cmds = press(model, KeyCode::Char(key));
    let generation = cmds
        .iter()
        .find_map(|c| match c {
            Command::ScheduleInfusion { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("selection should schedule an infusion");
    let started_from = model.remaining;
    update(model, Message::InfusionDue(generation));
    started_from
}

/// Deliver `n` countdown ticks.
pub fn tick(model: &mut Model, n: u32) -> Vec<Command> {
    let mut last = Vec::new();
    for _ in 0..n {
        last = update(model, Message::Tick);
    }
    last
}
