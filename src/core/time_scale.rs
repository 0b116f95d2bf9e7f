use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, PricePoint, Viewport};
use crate::error::{ChartError, ChartResult};

/// Tuning for the padded full time domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeDomainTuning {
    /// Fraction of the data span added on each side.
    pub padding_ratio: f64,
    /// Span used when the data has no extent (single sample), in ms.
    pub min_span_ms: f64,
}

impl Default for TimeDomainTuning {
    fn default() -> Self {
        Self {
            padding_ratio: 0.02,
            min_span_ms: 86_400_000.0,
        }
    }
}

impl TimeDomainTuning {
    pub(crate) fn validate(self) -> ChartResult<Self> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "time padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_span_ms.is_finite() || self.min_span_ms <= 0.0 {
            return Err(ChartError::InvalidData(
                "time min span must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Padded time extent of `points`.
///
/// The data extent is widened by `padding_ratio` of its span on both sides so
/// that boundary samples never sit flush against the pane edge.
pub fn compute_time_domain(points: &[PricePoint], tuning: TimeDomainTuning) -> ChartResult<(f64, f64)> {
    let tuning = tuning.validate()?;
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(ChartError::EmptySeries);
    };
    if !first.time.is_finite() || !last.time.is_finite() {
        return Err(ChartError::InvalidData(
            "time values must be finite".to_owned(),
        ));
    }

    let (start, end) = normalize_range(first.time, last.time, tuning.min_span_ms);
    let padding = (end - start) * tuning.padding_ratio;
    Ok((start - padding, end + padding))
}

/// Linked time axes for the two panes.
///
/// `full_*` is the padded data domain shown by the context pane; `focus_*` is
/// the zoom window shown by the focus pane and always lies inside the full
/// domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    full_start: f64,
    full_end: f64,
    focus_start: f64,
    focus_end: f64,
}

impl TimeScale {
    /// Creates a scale whose focus window equals the full domain.
    pub fn new(full_start: f64, full_end: f64) -> ChartResult<Self> {
        LinearScale::new(full_start, full_end)?;
        let (full_start, full_end) = (full_start.min(full_end), full_start.max(full_end));
        Ok(Self {
            full_start,
            full_end,
            focus_start: full_start,
            focus_end: full_end,
        })
    }

    pub fn from_points(points: &[PricePoint], tuning: TimeDomainTuning) -> ChartResult<Self> {
        let (start, end) = compute_time_domain(points, tuning)?;
        Self::new(start, end)
    }

    #[must_use]
    pub fn full_range(self) -> (f64, f64) {
        (self.full_start, self.full_end)
    }

    #[must_use]
    pub fn focus_range(self) -> (f64, f64) {
        (self.focus_start, self.focus_end)
    }

    #[must_use]
    pub fn is_focus_full(self) -> bool {
        self.focus_start == self.full_start && self.focus_end == self.full_end
    }

    /// Narrows the focus window. Bounds are ordered and clamped to the full
    /// domain; a window that collapses to zero width is rejected.
    pub fn set_focus_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidData(
                "focus range must be finite".to_owned(),
            ));
        }
        let lo = start.min(end).clamp(self.full_start, self.full_end);
        let hi = start.max(end).clamp(self.full_start, self.full_end);
        if lo == hi {
            return Err(ChartError::InvalidData(
                "focus range must have a non-zero span".to_owned(),
            ));
        }
        self.focus_start = lo;
        self.focus_end = hi;
        Ok(())
    }

    pub fn reset_focus_to_full(&mut self) {
        self.focus_start = self.full_start;
        self.focus_end = self.full_end;
    }

    /// Focus-pane x for `time`.
    pub fn time_to_pixel(self, time: f64, viewport: Viewport) -> ChartResult<f64> {
        self.focus_linear()?
            .domain_to_pixel(time, checked_width(viewport)?)
    }

    pub fn pixel_to_time(self, pixel: f64, viewport: Viewport) -> ChartResult<f64> {
        self.focus_linear()?
            .pixel_to_domain(pixel, checked_width(viewport)?)
    }

    /// Context-pane x for `time`.
    pub fn full_time_to_pixel(self, time: f64, viewport: Viewport) -> ChartResult<f64> {
        self.full_linear()?
            .domain_to_pixel(time, checked_width(viewport)?)
    }

    pub fn full_pixel_to_time(self, pixel: f64, viewport: Viewport) -> ChartResult<f64> {
        self.full_linear()?
            .pixel_to_domain(pixel, checked_width(viewport)?)
    }

    fn focus_linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.focus_start, self.focus_end)
    }

    fn full_linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.full_start, self.full_end)
    }
}

fn checked_width(viewport: Viewport) -> ChartResult<f64> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(viewport.width_px())
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> (f64, f64) {
    if start == end {
        let half = min_span / 2.0;
        return (start - half, end + half);
    }
    (start.min(end), start.max(end))
}
