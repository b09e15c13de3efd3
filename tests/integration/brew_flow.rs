//! End-to-end brewing flows through the MVU core.

use crossterm::event::KeyCode;

use steep::infusion::format_mmss;
use steep::mvu::{update, BrewPhase, Command, Message, Mode};
use steep::store::{Tea, TeaStore};
use steep::theme::Theme;

use crate::fixtures::{brew, clear_field, default_model, model_with, press, tick, type_text};

fn quick_store() -> TeaStore {
    let mut store = TeaStore::default();
    store.teas = vec![
        Tea::new("Quick", [3, 2, 4]),
        Tea::new("Other", [5, 6, 7]),
    ];
    store
}

#[test]
fn full_infusion_runs_to_finish() {
    let mut model = model_with(quick_store());

    assert_eq!(brew(&mut model, '1'), 3);
    assert_eq!(model.phase, BrewPhase::Steeping);
    assert_eq!(model.timer_text, "00:03");

    // Two more ticks count down, the third finishes.
    tick(&mut model, 2);
    assert_eq!(model.timer_text, "00:01");
    let cmds = tick(&mut model, 1);

    assert_eq!(model.phase, BrewPhase::Finished);
    assert_eq!(model.info, "Get your tea on!");
    assert!(cmds.contains(&Command::StopCountdown));
}

#[test]
fn three_selections_walk_the_cycle_durations_then_wrap() {
    let mut model = model_with(quick_store());

    // Repeated presses while preparing pick a later cycle: [3, 2, 4].
    let mut starts = Vec::new();
    for _ in 0..4 {
        press(&mut model, KeyCode::Char('1'));
        starts.push(model.remaining);
    }
    assert_eq!(starts, vec![3, 2, 4, 3]);
}

#[test]
fn switching_tea_restarts_at_its_first_duration() {
    let mut model = model_with(quick_store());
    press(&mut model, KeyCode::Char('1'));
    press(&mut model, KeyCode::Char('1'));
    assert_eq!(model.cycle, 2);

    press(&mut model, KeyCode::Char('2'));
    assert_eq!(model.cycle, 1);
    assert_eq!(model.remaining, 5);
    assert_eq!(model.info, "Other - Cycle 1");
}

#[test]
fn background_fades_to_end_color_over_one_infusion() {
    let mut model = model_with(quick_store());
    let theme = Theme::default();

    let duration = brew(&mut model, '1');
    // One fade step already ran with the first countdown step.
    tick(&mut model, duration - 1);

    assert_eq!(model.fade.color(), theme.end);
    assert_eq!(model.remaining, 0);

    // The finishing tick does not step the fade past the end color.
    tick(&mut model, 1);
    assert_eq!(model.phase, BrewPhase::Finished);
    assert_eq!(model.fade.color(), theme.end);
}

#[test]
fn reset_returns_to_idle_and_start_color() {
    let mut model = model_with(quick_store());
    brew(&mut model, '1');
    tick(&mut model, 1);

    let cmds = press(&mut model, KeyCode::Char('r'));
    assert!(cmds.contains(&Command::StopCountdown));
    assert_eq!(model.phase, BrewPhase::Idle);
    assert_eq!(model.cycle, 0);
    assert_eq!(model.fade.color(), Theme::default().start);
    assert_eq!(model.info, "No tea selected");
    assert_eq!(model.timer_text, format_mmss(0));
}

#[test]
fn finished_state_requires_reset_before_next_brew() {
    let mut model = model_with(quick_store());
    let duration = brew(&mut model, '1');
    tick(&mut model, duration);
    assert_eq!(model.phase, BrewPhase::Finished);

    // Selections are ignored until reset.
    press(&mut model, KeyCode::Char('2'));
    assert_eq!(model.phase, BrewPhase::Finished);

    press(&mut model, KeyCode::Char('r'));
    press(&mut model, KeyCode::Char('2'));
    assert_eq!(model.phase, BrewPhase::Preparing);
    assert_eq!(model.remaining, 5);
}

#[test]
fn abandoned_prep_never_starts_a_countdown() {
    let mut model = model_with(quick_store());
    let cmds = press(&mut model, KeyCode::Char('1'));
    let generation = cmds
        .iter()
        .find_map(|c| match c {
            Command::ScheduleInfusion { generation, .. } => Some(*generation),
            _ => None,
        })
        .unwrap();

    // Reset lands before the prep delay fires.
    press(&mut model, KeyCode::Char('r'));
    let cmds = update(&mut model, Message::InfusionDue(generation));

    assert!(cmds.is_empty());
    assert_eq!(model.phase, BrewPhase::Idle);
}

#[test]
fn menu_edit_updates_labels_and_durations() {
    let mut model = default_model();
    press(&mut model, KeyCode::Char('m'));
    assert_eq!(model.mode, Mode::Menu);

    // Rename tea one and shorten its first cycle.
    clear_field(&mut model);
    type_text(&mut model, "Kukicha");
    press(&mut model, KeyCode::Tab);
    clear_field(&mut model);
    type_text(&mut model, "00:45");

    let cmds = press(&mut model, KeyCode::Enter);
    assert!(cmds.contains(&Command::SaveTeas));
    assert_eq!(model.mode, Mode::Brew);
    assert_eq!(model.store.teas[0].name, "Kukicha");
    assert_eq!(model.store.teas[0].infusion_times[0], 45);

    // The new values drive the next brew.
    assert_eq!(brew(&mut model, '1'), 45);
    assert_eq!(model.info, "Kukicha - Cycle 1");
}

#[test]
fn snapshot_tracks_countdown_display() {
    let mut model = model_with(quick_store());
    brew(&mut model, '1');

    let before = model.snapshot();
    tick(&mut model, 1);
    let after = model.snapshot();

    assert!(after.version > before.version);
    assert_eq!(before.timer_text, "00:03");
    assert_eq!(after.timer_text, "00:02");
    assert_eq!(after.phase, BrewPhase::Steeping);
}
