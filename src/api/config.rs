use serde::{Deserialize, Serialize};

use crate::core::{
    LanguageCode, PriceScaleMode, SeriesTuning, TimeDomainTuning, ValueDomainTuning, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::MarkerPlacementConfig;

/// Animation lengths for redraws triggered by state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTuning {
    /// Scale-mode and language changes.
    pub mode_change_ms: u64,
    pub filter_change_ms: u64,
}

impl Default for TransitionTuning {
    fn default() -> Self {
        Self {
            mode_change_ms: 750,
            filter_change_ms: 400,
        }
    }
}

/// Public core bootstrap configuration.
///
/// Serializable so hosts can ship chart setup alongside their feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartCoreConfig {
    #[serde(default = "default_focus_viewport")]
    pub focus_viewport: Viewport,
    #[serde(default = "default_context_viewport")]
    pub context_viewport: Viewport,
    #[serde(default)]
    pub time_domain: TimeDomainTuning,
    #[serde(default)]
    pub value_domain: ValueDomainTuning,
    #[serde(default)]
    pub series: SeriesTuning,
    #[serde(default)]
    pub transitions: TransitionTuning,
    #[serde(default)]
    pub markers: MarkerPlacementConfig,
    #[serde(default)]
    pub initial_scale_mode: PriceScaleMode,
    #[serde(default = "default_language")]
    pub default_language: LanguageCode,
    #[serde(default = "default_brush_min_selection_px")]
    pub brush_min_selection_px: f64,
}

impl Default for ChartCoreConfig {
    fn default() -> Self {
        Self {
            focus_viewport: default_focus_viewport(),
            context_viewport: default_context_viewport(),
            time_domain: TimeDomainTuning::default(),
            value_domain: ValueDomainTuning::default(),
            series: SeriesTuning::default(),
            transitions: TransitionTuning::default(),
            markers: MarkerPlacementConfig::default(),
            initial_scale_mode: PriceScaleMode::default(),
            default_language: default_language(),
            brush_min_selection_px: default_brush_min_selection_px(),
        }
    }
}

impl ChartCoreConfig {
    #[must_use]
    pub fn with_viewports(mut self, focus: Viewport, context: Viewport) -> Self {
        self.focus_viewport = focus;
        self.context_viewport = context;
        self
    }

    #[must_use]
    pub fn with_initial_scale_mode(mut self, mode: PriceScaleMode) -> Self {
        self.initial_scale_mode = mode;
        self
    }

    #[must_use]
    pub fn with_default_language(mut self, language: impl Into<LanguageCode>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for viewport in [self.focus_viewport, self.context_viewport] {
            if !viewport.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }
        self.time_domain.validate()?;
        let value_domain = self.value_domain.validate()?;
        let series = self.series.validate()?;
        if series.synthetic_floor <= value_domain.log_floor {
            return Err(ChartError::InvalidData(format!(
                "synthetic floor {} must exceed log floor {}",
                series.synthetic_floor, value_domain.log_floor
            )));
        }
        self.markers.validate()?;
        if self.default_language.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "default language must not be empty".to_owned(),
            ));
        }
        if !self.brush_min_selection_px.is_finite() || self.brush_min_selection_px < 0.0 {
            return Err(ChartError::InvalidData(
                "brush min selection must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Parses and validates a config. Missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_focus_viewport() -> Viewport {
    Viewport::new(840, 360)
}

fn default_context_viewport() -> Viewport {
    Viewport::new(840, 20)
}

fn default_language() -> LanguageCode {
    "en".to_owned()
}

fn default_brush_min_selection_px() -> f64 {
    1.0
}
