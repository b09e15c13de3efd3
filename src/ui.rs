//! Terminal UI rendering for steep.
//!
//! Design philosophy: minimal chrome. No box drawing around the main
//! display; whitespace and color carry the hierarchy. The background is
//! painted in the current fade color, the middle of the screen shows
//! either the leaves or the countdown, and the bottom line is a
//! context-sensitive keymap.
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state. This enables the decoupled loop. The
//! `pulse` flag comes from the render loop's animation cadence and dims
//! the middle display on alternating intervals.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::mvu::{BrewPhase, MenuForm, Mode, Notification, NotificationLevel};
use crate::render::RenderState;
use crate::theme::Theme;

// Layout constants
const BOTTOM_HEIGHT: u16 = 7;
const GLYPH_ROWS: usize = 5;

/// Leaves shown while idle and after a finished infusion.
const LEAVES: [&str; 7] = [
    r"    ()     ",
    r"   ()()    ",
    r"  ()()()   ",
    r"    ||     ",
    r"    ||     ",
    r"   \||/    ",
    r"    \/     ",
];

/// Main render function - entry point for all UI drawing.
/// Takes an immutable RenderState snapshot.
pub fn draw(frame: &mut Frame, state: &RenderState, pulse: bool) {
    let area = frame.area();

    // Paint the faded background across the whole frame.
    let background = Block::default().style(Style::default().bg(state.background.into()));
    frame.render_widget(background, area);

    if area.height < 4 {
        render_statusbar(frame, state, area);
        return;
    }

    let bottom_height = BOTTOM_HEIGHT.min(area.height.saturating_sub(3));
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(bottom_height),
        Constraint::Length(1),
    ])
    .split(area);

    if let Some(ref notification) = state.notification {
        render_notification(frame, notification, &state.theme, chunks[0]);
    }
    render_middle(frame, state, pulse, chunks[1]);
    render_info(frame, state, chunks[2]);
    render_bottom(frame, state, chunks[3]);
    render_statusbar(frame, state, chunks[4]);
}

/// The middle stack: leaves while idle or finished, the countdown while
/// preparing or steeping.
fn render_middle(frame: &mut Frame, state: &RenderState, pulse: bool, area: Rect) {
    let mut style = Style::default().fg(state.theme.text.into());
    if pulse && state.phase.is_animated() {
        style = style.add_modifier(Modifier::DIM);
    }

    let rows: Vec<String> = match state.phase {
        BrewPhase::Idle | BrewPhase::Finished => {
            LEAVES.iter().map(|row| row.to_string()).collect()
        }
        BrewPhase::Preparing | BrewPhase::Steeping => big_text(&state.timer_text),
    };

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect();

    // Center the block vertically inside the available space.
    let pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let padded: Vec<Line> = std::iter::repeat_with(Line::default)
        .take(pad as usize)
        .chain(lines)
        .collect();

    frame.render_widget(Paragraph::new(padded).alignment(Alignment::Center), area);
}

fn render_info(frame: &mut Frame, state: &RenderState, area: Rect) {
    let style = Style::default()
        .fg(state.theme.accent.into())
        .add_modifier(Modifier::BOLD);
    let line = Line::from(Span::styled(state.info_text.clone(), style));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// The bottom stack: tea buttons, the reset hint, or the tea menu.
fn render_bottom(frame: &mut Frame, state: &RenderState, area: Rect) {
    match state.mode {
        Mode::Menu => render_menu(frame, state, area),
        Mode::Brew => match state.phase {
            BrewPhase::Idle | BrewPhase::Preparing => render_tea_buttons(frame, state, area),
            BrewPhase::Steeping | BrewPhase::Finished => render_reset_hint(frame, state, area),
        },
    }
}

fn render_tea_buttons(frame: &mut Frame, state: &RenderState, area: Rect) {
    let plain = Style::default().fg(state.theme.text.into());
    let active = Style::default()
        .fg(state.theme.accent.into())
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    for (i, label) in state.tea_labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("    "));
        }
        let style = if state.selected == Some(i) { active } else { plain };
        spans.push(Span::styled(format!("[{}] {}", i + 1, label), style));
    }

    let pad = area.height.saturating_sub(1) / 2;
    let lines: Vec<Line> = std::iter::repeat_with(Line::default)
        .take(pad as usize)
        .chain(std::iter::once(Line::from(spans)))
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_reset_hint(frame: &mut Frame, state: &RenderState, area: Rect) {
    let style = Style::default().fg(state.theme.text.into());
    let pad = area.height.saturating_sub(1) / 2;
    let lines: Vec<Line> = std::iter::repeat_with(Line::default)
        .take(pad as usize)
        .chain(std::iter::once(Line::from(Span::styled(
            "[r] Reset", style,
        ))))
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Two side-by-side edit columns, one per tea: name on top, the three
/// cycle durations beneath. The focused field is painted in the accent
/// color.
fn render_menu(frame: &mut Frame, state: &RenderState, area: Rect) {
    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (tea, column) in columns.iter().enumerate() {
        render_menu_column(frame, state, &state.menu, tea, *column);
    }
}

fn render_menu_column(
    frame: &mut Frame,
    state: &RenderState,
    menu: &MenuForm,
    tea: usize,
    area: Rect,
) {
    let muted = Style::default()
        .fg(state.theme.text.into())
        .add_modifier(Modifier::DIM);
    let base = tea * 4;

    let field = |index: usize| {
        let focused = menu.focus == index;
        let style = if focused {
            Style::default()
                .fg(state.background.into())
                .bg(state.theme.accent.into())
        } else {
            Style::default().fg(state.theme.text.into())
        };
        // A trailing caret marks the focused buffer.
        let text = if focused {
            format!(" {}_ ", menu.fields[index])
        } else {
            format!(" {} ", menu.fields[index])
        };
        Span::styled(text, style)
    };

    let mut durations = Vec::new();
    for cycle in 0..3 {
        if cycle > 0 {
            durations.push(Span::raw(" "));
        }
        durations.push(field(base + 1 + cycle));
    }

    let lines = vec![
        Line::from(Span::styled("Tea name", muted)),
        Line::from(field(base)),
        Line::default(),
        Line::from(Span::styled("Cycle times", muted)),
        Line::from(durations),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_notification(
    frame: &mut Frame,
    notification: &Notification,
    theme: &Theme,
    area: Rect,
) {
    let (style, text) = match notification.level {
        NotificationLevel::Error => (
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            format!("Error: {}", notification.message),
        ),
        NotificationLevel::Info => (
            Style::default().fg(theme.accent.into()),
            notification.message.clone(),
        ),
    };
    let line = Line::from(Span::styled(text, style));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

// -----------------------------------------------------------------------------
// Context-sensitive keymap system
// -----------------------------------------------------------------------------

/// Context for determining which keybindings to display.
/// Derived from RenderState - this is the "view model" for the statusbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    /// Tea buttons active, nothing brewing yet.
    Idle,
    /// Prep delay running; further presses pick a later cycle.
    Preparing,
    /// Countdown running or finished; only reset applies.
    Brewing,
    /// Editing the tea menu.
    Menu,
}

impl KeymapContext {
    /// Derive keymap context from render state.
    pub fn from_render_state(state: &RenderState) -> Self {
        match (state.mode, state.phase) {
            (Mode::Menu, _) => KeymapContext::Menu,
            (Mode::Brew, BrewPhase::Idle) => KeymapContext::Idle,
            (Mode::Brew, BrewPhase::Preparing) => KeymapContext::Preparing,
            (Mode::Brew, _) => KeymapContext::Brewing,
        }
    }
}

/// A single keybinding entry for display.
struct Keybinding(&'static str, &'static str);

/// Get keybindings for a given context.
fn keybindings_for_context(ctx: KeymapContext) -> Vec<Keybinding> {
    match ctx {
        KeymapContext::Idle => vec![
            Keybinding("1/2", "steep"),
            Keybinding("m", "teas"),
            Keybinding("q", "quit"),
        ],
        KeymapContext::Preparing => vec![
            Keybinding("1/2", "cycle"),
            Keybinding("r", "reset"),
            Keybinding("q", "quit"),
        ],
        KeymapContext::Brewing => vec![Keybinding("r", "reset"), Keybinding("q", "quit")],
        KeymapContext::Menu => vec![
            Keybinding("Tab", "next"),
            Keybinding("Enter", "save"),
            Keybinding("Esc", "cancel"),
        ],
    }
}

fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    let key_style = Style::default()
        .fg(state.theme.accent.into())
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default()
        .fg(state.theme.text.into())
        .add_modifier(Modifier::DIM);

    let ctx = KeymapContext::from_render_state(state);
    let mut spans = Vec::new();
    for (i, Keybinding(key, label)) in keybindings_for_context(ctx).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", label_style));
        }
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {}", label), label_style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

// -----------------------------------------------------------------------------
// Block-digit countdown face
// -----------------------------------------------------------------------------

const GLYPH_BLANK: [&str; GLYPH_ROWS] = ["   "; GLYPH_ROWS];
const GLYPH_COLON: [&str; GLYPH_ROWS] = ["   ", " █ ", "   ", " █ ", "   "];

const GLYPH_DIGITS: [[&str; GLYPH_ROWS]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"], // 0
    ["  █", "  █", "  █", "  █", "  █"], // 1
    ["███", "  █", "███", "█  ", "███"], // 2
    ["███", "  █", "███", "  █", "███"], // 3
    ["█ █", "█ █", "███", "  █", "  █"], // 4
    ["███", "█  ", "███", "  █", "███"], // 5
    ["███", "█  ", "███", "█ █", "███"], // 6
    ["███", "  █", "  █", "  █", "  █"], // 7
    ["███", "█ █", "███", "█ █", "███"], // 8
    ["███", "█ █", "███", "  █", "███"], // 9
];

fn glyph_for(c: char) -> [&'static str; GLYPH_ROWS] {
    match c {
        '0'..='9' => GLYPH_DIGITS[c as usize - '0' as usize],
        ':' => GLYPH_COLON,
        _ => GLYPH_BLANK,
    }
}

/// Render a `mm:ss` string as rows of block glyphs.
fn big_text(text: &str) -> Vec<String> {
    (0..GLYPH_ROWS)
        .map(|row| {
            text.chars()
                .map(|c| glyph_for(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
