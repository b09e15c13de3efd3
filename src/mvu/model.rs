//! Model for the MVU core.
//!
//! The Model is pure application state - no channels, no actor handles,
//! no runtime infrastructure.

use crate::config::Config;
use crate::fade::BackgroundFade;
use crate::infusion::{format_mmss, parse_duration, MAX_CYCLES};
use crate::render::{next_version, RenderState};
use crate::store::{wrap_name, TeaStore};
use crate::theme::Theme;
use crate::Result;

/// Prompt shown before any tea has been selected.
pub const INFO_SELECT: &str = "Select your tea";
/// Prompt shown after a manual reset.
pub const INFO_RESET: &str = "No tea selected";
/// Celebration line when the countdown completes.
pub const INFO_FINISHED: &str = "Get your tea on!";

/// Level of a notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Error notification - displayed in red with "Error:" prefix
    Error,
    /// Informational notification - displayed in the accent color
    Info,
}

/// A notification message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Application UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The brewing screen: tea buttons, countdown, reset.
    #[default]
    Brew,
    /// The tea menu: editing stored names and cycle durations.
    Menu,
}

/// Where the brewing screen is in an infusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrewPhase {
    /// Leaves shown, tea buttons active.
    #[default]
    Idle,
    /// A tea was selected; the prep delay is running and further selections
    /// may still adjust the cycle.
    Preparing,
    /// The countdown is ticking.
    Steeping,
    /// The countdown hit zero; leaves pulse until reset.
    Finished,
}

impl BrewPhase {
    /// Phases whose display pulses.
    pub fn is_animated(&self) -> bool {
        matches!(self, BrewPhase::Preparing | BrewPhase::Finished)
    }
}

/// Number of edit fields in the tea menu: per tea, one name plus one
/// duration per cycle.
pub const MENU_FIELDS: usize = 2 * (1 + MAX_CYCLES);

const NAME_MAX_LEN: usize = 20;
const DURATION_MAX_LEN: usize = 5;

/// Edit buffers for the tea menu, seeded from the store when the menu
/// opens and applied back wholesale on confirm.
///
/// Field layout per tea `t`: index `t * 4` is the name, `t * 4 + 1 ..=
/// t * 4 + 3` are the three cycle durations as `mm:ss` text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuForm {
    pub fields: [String; MENU_FIELDS],
    pub focus: usize,
}

impl MenuForm {
    pub fn from_store(store: &TeaStore) -> Self {
        let mut fields: [String; MENU_FIELDS] = Default::default();
        for (t, tea) in store.teas.iter().take(2).enumerate() {
            fields[t * 4] = tea.display_name();
            for (c, secs) in tea.infusion_times.iter().enumerate() {
                fields[t * 4 + 1 + c] = format_mmss(*secs);
            }
        }
        Self { fields, focus: 0 }
    }

    /// Whether the focused field holds a tea name (as opposed to a duration).
    pub fn focus_is_name(&self) -> bool {
        self.focus % 4 == 0
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % MENU_FIELDS;
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + MENU_FIELDS - 1) % MENU_FIELDS;
    }

    pub fn push_char(&mut self, c: char) {
        let max = if self.focus_is_name() {
            NAME_MAX_LEN
        } else {
            DURATION_MAX_LEN
        };
        let field = &mut self.fields[self.focus];
        if field.chars().count() < max {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].pop();
    }

    /// Parse every buffer and copy the values into the store wholesale.
    /// Nothing is written if any duration fails to parse.
    pub fn apply(&self, store: &mut TeaStore) -> Result<()> {
        let mut parsed = [[0u32; MAX_CYCLES]; 2];
        for (t, durations) in parsed.iter_mut().enumerate() {
            for (c, duration) in durations.iter_mut().enumerate() {
                *duration = parse_duration(&self.fields[t * 4 + 1 + c])?;
            }
        }

        for (t, tea) in store.teas.iter_mut().take(2).enumerate() {
            tea.name = wrap_name(&self.fields[t * 4]);
            tea.infusion_times = parsed[t];
        }
        Ok(())
    }
}

/// Pure application state - the single source of truth.
pub struct Model {
    // Core state
    pub store: TeaStore,
    pub selected: Option<usize>,
    pub cycle: u8,
    pub remaining: u32,
    pub phase: BrewPhase,
    pub mode: Mode,
    pub fade: BackgroundFade,

    // Display state
    pub timer_text: String,
    pub info: String,
    pub notification: Option<Notification>,

    // Menu state (meaningful while mode == Menu)
    pub menu: MenuForm,

    /// Invalidates in-flight prep delays: an `InfusionDue` carrying an
    /// older generation is stale and ignored.
    pub prep_generation: u64,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    // Config and theme (immutable after init)
    pub config: Config,
    pub theme: Theme,
}

impl Model {
    pub fn new(store: TeaStore, config: Config, theme: Theme) -> Self {
        let fade = BackgroundFade::new(theme.start);
        Self {
            store,
            selected: None,
            cycle: 0,
            remaining: 0,
            phase: BrewPhase::default(),
            mode: Mode::default(),
            fade,
            timer_text: format_mmss(0),
            info: INFO_SELECT.to_string(),
            notification: None,
            menu: MenuForm::default(),
            prep_generation: 0,
            dirty: true,
            config,
            theme,
        }
    }

    /// Load the model from the persisted tea store.
    pub async fn load(config: Config, theme: Theme) -> Result<Self> {
        let store = TeaStore::load().await?;
        Ok(Self::new(store, config, theme))
    }

    pub fn selected_tea(&self) -> Option<&crate::store::Tea> {
        self.selected.and_then(|i| self.store.teas.get(i))
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Each snapshot gets a monotonically increasing version number,
    /// enabling the render thread to detect state changes and skip
    /// redundant renders.
    pub fn snapshot(&self) -> RenderState {
        let label = |i: usize| {
            self.store
                .teas
                .get(i)
                .map(|t| t.display_name())
                .unwrap_or_default()
        };

        RenderState {
            version: next_version(),
            phase: self.phase,
            mode: self.mode,
            timer_text: self.timer_text.clone(),
            info_text: self.info.clone(),
            tea_labels: [label(0), label(1)],
            selected: self.selected,
            cycle: self.cycle,
            background: self.fade.color(),
            theme: self.theme,
            menu: self.menu.clone(),
            notification: self.notification.clone(),
        }
    }
}
