use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::core::{CategoryFilter, LanguageCode, PriceScaleMode, StatsSummary};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{
    ChartCommand, MarkerPlacementContext, PlacedEventMarker, classify, place_event_markers,
};
use crate::render::{FrameTransition, Renderer};

use super::ChartCore;

impl<R: Renderer> ChartCore<R> {
    /// Switches the value-axis mode. Recomputes both value scales and the
    /// cached context line, then redraws with the mode-change animation.
    pub fn set_scale_mode(&mut self, mode: PriceScaleMode) -> ChartResult<()> {
        if mode == self.model.state.scale_mode {
            return Ok(());
        }
        self.model.scales.set_mode(self.model.series.points(), mode)?;
        self.model.context_path =
            super::frame_builder::context_path(&self.model.series, &self.model.scales)?;
        self.model.state.scale_mode = mode;
        self.refresh_hover_snap();
        self.emit_command(ChartCommand::ScaleModeChanged { mode });
        self.redraw(FrameTransition::Animated {
            duration_ms: self.model.config.transitions.mode_change_ms,
        })
    }

    pub fn toggle_scale_mode(&mut self) -> ChartResult<()> {
        self.set_scale_mode(self.model.state.scale_mode.toggled())
    }

    /// Changes which event categories are emphasized. Zoom is untouched.
    pub fn set_filter(&mut self, filter: CategoryFilter) -> ChartResult<()> {
        self.model.state.active_filter = filter;
        debug!(?filter, "event filter changed");
        self.emit_command(ChartCommand::FilterChanged { filter });
        self.redraw(FrameTransition::Animated {
            duration_ms: self.model.config.transitions.filter_change_ms,
        })
    }

    /// Switches the language used to resolve marker titles.
    pub fn set_language(&mut self, language: impl Into<LanguageCode>) -> ChartResult<()> {
        let language = language.into();
        if language.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "language must not be empty".to_owned(),
            ));
        }
        if !self.model.events.is_empty() && !self.event_languages().contains(language.as_str()) {
            warn!(
                language = %language,
                fallback = %self.model.config.default_language,
                "no event titles in language, falling back"
            );
        }
        self.model.state.language = language.clone();
        self.emit_command(ChartCommand::LanguageChanged { language });
        self.redraw(FrameTransition::Animated {
            duration_ms: self.model.config.transitions.mode_change_ms,
        })
    }

    /// Languages that carry at least one event title, in first-seen order.
    #[must_use]
    pub fn event_languages(&self) -> IndexSet<&str> {
        self.model
            .events
            .iter()
            .flat_map(|event| event.title.languages())
            .collect()
    }

    /// Emphasis flag per event under the active filter, in event order.
    #[must_use]
    pub fn emphasis(&self) -> Vec<bool> {
        classify(&self.model.events, self.model.state.active_filter)
    }

    /// Projects every event onto the focus pane.
    pub fn markers(&self) -> ChartResult<Vec<PlacedEventMarker>> {
        let scales = &self.model.scales;
        let emphasis = self.emphasis();
        place_event_markers(
            &self.model.events,
            self.model.series.points(),
            scales.time_scale(),
            scales.focus_value_scale(),
            scales.focus_viewport(),
            MarkerPlacementContext {
                language: &self.model.state.language,
                fallback_language: &self.model.config.default_language,
                emphasis: &emphasis,
                highlighted_time: self.highlighted_time,
            },
            self.model.config.markers,
        )
    }

    /// Reports a marker or timeline activation to observers.
    pub fn activate_event(&mut self, index: usize) -> ChartResult<()> {
        let event = self.model.events.get(index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "event index {index} out of range (len {})",
                self.model.events.len()
            ))
        })?;
        let command = ChartCommand::EventActivated {
            index,
            time: event.time,
            category: event.category,
            title: event
                .title
                .resolve(&self.model.state.language, &self.model.config.default_language)
                .to_owned(),
        };
        self.emit_command(command);
        Ok(())
    }

    /// Flags markers dated `time` while a timeline row is hovered.
    ///
    /// Turning off a highlight that is not the current one is ignored.
    pub fn highlight_event(&mut self, time: f64, highlighted: bool) -> ChartResult<()> {
        if !time.is_finite() {
            return Err(ChartError::InvalidData(
                "highlight time must be finite".to_owned(),
            ));
        }
        if highlighted {
            self.highlighted_time = Some(time);
        } else if self.highlighted_time == Some(time) {
            self.highlighted_time = None;
        } else {
            return Ok(());
        }
        self.emit_command(ChartCommand::EventHighlighted { time, highlighted });
        self.redraw(FrameTransition::Immediate)
    }

    /// Headline stats over real samples.
    #[must_use]
    pub fn stats(&self, live_price: Option<f64>, today: chrono::NaiveDate) -> Option<StatsSummary> {
        StatsSummary::from_series(&self.model.series, live_price, today)
    }
}
