use serde::{Deserialize, Serialize};

use crate::core::{CategoryFilter, EventCategory, PriceScaleMode};
use crate::interaction::BrushState;

/// Read-only state snapshot handed to observers with each command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommandContext {
    pub full_domain: (f64, f64),
    pub focus_domain: (f64, f64),
    pub value_domain: (f64, f64),
    pub scale_mode: PriceScaleMode,
    pub active_filter: CategoryFilter,
    pub brush_state: BrushState,
    pub visible_len: usize,
}

/// Commands emitted by the core for the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartCommand {
    BrushChanged {
        state: BrushState,
        focus_start: f64,
        focus_end: f64,
    },
    ScaleModeChanged {
        mode: PriceScaleMode,
    },
    FilterChanged {
        filter: CategoryFilter,
    },
    LanguageChanged {
        language: String,
    },
    /// A marker or timeline row was clicked or activated from the keyboard.
    EventActivated {
        index: usize,
        time: f64,
        category: EventCategory,
        title: String,
    },
    EventHighlighted {
        time: f64,
        highlighted: bool,
    },
}

/// Hook for UI code reacting to chart commands.
///
/// Observers see commands and context only; they cannot reach into the core.
pub trait ChartObserver {
    fn id(&self) -> &str;
    fn on_command(&mut self, command: &ChartCommand, context: &CommandContext);
}
