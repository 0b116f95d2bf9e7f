use tracing::debug;

use crate::core::{
    CategoryFilter, Event, MarketCycle, PixelPoint, PricePoint, PriceScaleMode,
    Series, earliest_event_time, slice_window,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartCommand, ChartObserver, CommandContext};
use crate::interaction::{BrushController, BrushState, HoverState};
use crate::render::{ChartFrame, FrameTransition, Renderer};

use super::{ChartCoreConfig, ChartState, ScaleManager};

/// Everything `ChartCore` owns apart from the renderer.
///
/// Building it is the only fallible part of initialization, which lets the
/// bootstrap path keep the renderer when loading fails.
pub(super) struct CoreModel {
    pub(super) config: ChartCoreConfig,
    pub(super) series: Series,
    pub(super) padded: bool,
    pub(super) events: Vec<Event>,
    pub(super) cycles: Vec<MarketCycle>,
    pub(super) scales: ScaleManager,
    pub(super) state: ChartState,
    pub(super) context_path: Vec<PixelPoint>,
}

impl CoreModel {
    pub(super) fn build(
        config: ChartCoreConfig,
        raw_prices: Vec<(f64, f64)>,
        events: Vec<Event>,
        cycles: Vec<MarketCycle>,
    ) -> ChartResult<Self> {
        config.validate()?;
        let loaded = Series::load(raw_prices, earliest_event_time(&events), config.series)?;
        let scales = ScaleManager::new(
            loaded.series.points(),
            config.initial_scale_mode,
            config.time_domain,
            config.value_domain,
            config.focus_viewport,
            config.context_viewport,
        )?;
        let context_path = super::frame_builder::context_path(&loaded.series, &scales)?;
        let state = ChartState {
            scale_mode: config.initial_scale_mode,
            active_filter: CategoryFilter::All,
            focus_domain: scales.focus_domain(),
            language: config.default_language.clone(),
        };
        debug!(
            points = loaded.series.len(),
            padded = loaded.padded,
            dropped_rows = loaded.dropped_rows,
            events = events.len(),
            cycles = cycles.len(),
            "chart core initialized"
        );

        Ok(Self {
            config,
            series: loaded.series,
            padded: loaded.padded,
            events,
            cycles,
            scales,
            state,
            context_path,
        })
    }
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartCore` owns the series, scales, brush and pointer state, and hands
/// the renderer a fresh `ChartFrame` after every state change.
pub struct ChartCore<R: Renderer> {
    pub(super) renderer: R,
    pub(super) model: CoreModel,
    pub(super) brush: BrushController,
    pub(super) hover: HoverState,
    pub(super) highlighted_time: Option<f64>,
    pub(super) observers: Vec<Box<dyn ChartObserver>>,
    pub(super) last_frame: Option<ChartFrame>,
}

impl<R: Renderer> ChartCore<R> {
    /// Ingests the series and builds the static structure once: scales,
    /// context line and cycle list. Nothing is drawn until [`Self::render`].
    pub fn initialize(
        renderer: R,
        config: ChartCoreConfig,
        raw_prices: Vec<(f64, f64)>,
        events: Vec<Event>,
        cycles: Vec<MarketCycle>,
    ) -> ChartResult<Self> {
        let model = CoreModel::build(config, raw_prices, events, cycles)?;
        Ok(Self::from_model(renderer, model))
    }

    pub(super) fn from_model(renderer: R, model: CoreModel) -> Self {
        let brush = BrushController::new(model.config.brush_min_selection_px);
        Self {
            renderer,
            model,
            brush,
            hover: HoverState::default(),
            highlighted_time: None,
            observers: Vec::new(),
            last_frame: None,
        }
    }

    /// Redraws without animation.
    pub fn render(&mut self) -> ChartResult<()> {
        self.redraw(FrameTransition::Immediate)
    }

    pub(super) fn redraw(&mut self, transition: FrameTransition) -> ChartResult<()> {
        let frame = self.build_frame(transition)?;
        self.renderer.render(&frame)?;
        self.last_frame = Some(frame);
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &ChartCoreConfig {
        &self.model.config
    }

    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.model.state
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.model.series
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.model.events
    }

    #[must_use]
    pub fn cycles(&self) -> &[MarketCycle] {
        &self.model.cycles
    }

    #[must_use]
    pub fn scales(&self) -> &ScaleManager {
        &self.model.scales
    }

    /// Whether synthetic lead-in points were added (legend visibility).
    #[must_use]
    pub fn is_padded(&self) -> bool {
        self.model.padded
    }

    #[must_use]
    pub fn scale_mode(&self) -> PriceScaleMode {
        self.model.state.scale_mode
    }

    #[must_use]
    pub fn active_filter(&self) -> CategoryFilter {
        self.model.state.active_filter
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.model.state.language
    }

    #[must_use]
    pub fn full_domain(&self) -> (f64, f64) {
        self.model.scales.full_domain()
    }

    #[must_use]
    pub fn focus_domain(&self) -> (f64, f64) {
        self.model.state.focus_domain
    }

    #[must_use]
    pub fn value_domain(&self) -> (f64, f64) {
        self.model.scales.value_domain()
    }

    #[must_use]
    pub fn brush_state(&self) -> BrushState {
        self.brush.state()
    }

    #[must_use]
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn highlighted_time(&self) -> Option<f64> {
        self.highlighted_time
    }

    /// Series points covering the focus domain, one sample of overhang each
    /// side.
    #[must_use]
    pub fn visible_points(&self) -> &[PricePoint] {
        let (start, end) = self.model.state.focus_domain;
        slice_window(self.model.series.points(), start, end)
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&ChartFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Registers an observer with a unique identifier.
    pub fn add_observer(&mut self, observer: Box<dyn ChartObserver>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.iter().any(|entry| entry.id() == observer_id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Removes an observer by id. Returns `true` when removed.
    pub fn remove_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub(super) fn command_context(&self) -> CommandContext {
        CommandContext {
            full_domain: self.full_domain(),
            focus_domain: self.focus_domain(),
            value_domain: self.value_domain(),
            scale_mode: self.scale_mode(),
            active_filter: self.active_filter(),
            brush_state: self.brush.state(),
            visible_len: self.visible_points().len(),
        }
    }

    pub(super) fn emit_command(&mut self, command: ChartCommand) {
        let context = self.command_context();
        for observer in &mut self.observers {
            observer.on_command(&command, &context);
        }
    }
}
