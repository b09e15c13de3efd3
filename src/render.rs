use std::sync::atomic::{AtomicU64, Ordering};

use crate::infusion::format_mmss;
use crate::mvu::{BrewPhase, MenuForm, Mode, Notification};
use crate::theme::{Rgb, Theme};

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Immutable snapshot of everything the render thread needs for one frame.
///
/// Built by [`crate::mvu::Model::snapshot`] and sent over a bounded(1)
/// channel with latest-wins semantics; the render thread never touches
/// application state directly.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub phase: BrewPhase,
    pub mode: Mode,
    /// Countdown display, already formatted `mm:ss`.
    pub timer_text: String,
    /// Status line under the middle display.
    pub info_text: String,
    /// Single-line labels for the two tea buttons.
    pub tea_labels: [String; 2],
    /// Index of the currently selected tea, if any.
    pub selected: Option<usize>,
    /// Current infusion cycle, 0 when idle.
    pub cycle: u8,
    /// Faded background color for this frame.
    pub background: Rgb,
    pub theme: Theme,
    /// Edit buffers for the tea menu (meaningful in [`Mode::Menu`]).
    pub menu: MenuForm,
    pub notification: Option<Notification>,
}

impl Default for RenderState {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            version: 0,
            phase: BrewPhase::default(),
            mode: Mode::default(),
            timer_text: format_mmss(0),
            info_text: String::new(),
            tea_labels: [String::new(), String::new()],
            selected: None,
            cycle: 0,
            background: theme.start,
            theme,
            menu: MenuForm::default(),
            notification: None,
        }
    }
}
