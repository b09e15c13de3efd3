//! Persistence flows: the tea store on disk and the required theme file.

use tempfile::TempDir;

use steep::mvu::Mode;
use steep::store::TeaStore;
use steep::theme::Theme;
use steep::Error;

use crate::fixtures::{clear_field, default_model, press, type_text};
use crossterm::event::KeyCode;

#[test]
fn missing_store_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let store = TeaStore::load_from(&dir.path().join("teas.json")).unwrap();

    assert_eq!(store.teas.len(), 2);
    assert_eq!(store.teas[0].display_name(), "Premium Sencha");
    assert_eq!(store.teas[1].display_name(), "Premium Bancha");
}

#[test]
fn menu_confirm_roundtrips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("teas.json");

    // Edit in the menu, then persist the resulting store wholesale.
    let mut model = default_model();
    press(&mut model, KeyCode::Char('m'));
    clear_field(&mut model);
    type_text(&mut model, "Iron Goddess Oolong");
    press(&mut model, KeyCode::Enter);
    assert_eq!(model.mode, Mode::Brew);
    model.store.save_to(&path).unwrap();

    let reloaded = TeaStore::load_from(&path).unwrap();
    assert_eq!(reloaded, model.store);
    // Long names come back wrapped for the narrow display.
    assert_eq!(reloaded.teas[0].name, "Iron Goddess\nOolong");
    assert_eq!(reloaded.teas[0].display_name(), "Iron Goddess Oolong");
}

#[test]
fn repeated_saves_keep_a_backup_of_the_previous_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("teas.json");

    TeaStore::default().save_to(&path).unwrap();

    let mut second = TeaStore::default();
    second.teas[0].name = "Shincha".to_string();
    second.save_to(&path).unwrap();

    let mut third = TeaStore::default();
    third.teas[0].name = "Kabusecha".to_string();
    third.save_to(&path).unwrap();

    // The backup always holds the immediately previous generation.
    let backup = TeaStore::load_from(&path.with_extension("json.bak")).unwrap();
    assert_eq!(backup, second);
    assert_eq!(TeaStore::load_from(&path).unwrap(), third);
}

#[test]
fn theme_is_required_but_init_provides_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("theme.toml");

    // Startup without a theme fails hard.
    assert!(matches!(
        Theme::load_from(&path).unwrap_err(),
        Error::ThemeMissing(_)
    ));

    // After writing the default (what `steep init` does), startup works
    // and the fade endpoints match the built-in palette.
    Theme::write_default(&path, false).unwrap();
    let theme = Theme::load_from(&path).unwrap();
    assert_eq!(theme, Theme::default());
    assert_eq!(theme.start.to_string(), "#f5ffce");
    assert_eq!(theme.end.to_string(), "#c9f621");
}

#[test]
fn name_cap_in_menu_limits_stored_length() {
    let mut model = default_model();
    press(&mut model, KeyCode::Char('m'));
    clear_field(&mut model);
    type_text(&mut model, "An Exceedingly Long Tea Name Indeed");
    press(&mut model, KeyCode::Enter);

    // The edit buffer caps at 20 characters before wrapping.
    assert!(model.store.teas[0].display_name().chars().count() <= 20);
}
