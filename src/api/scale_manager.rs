use tracing::debug;

use crate::core::{
    PixelPoint, PricePoint, PriceScale, PriceScaleMode, TimeDomainTuning, TimeScale,
    ValueDomainTuning, Viewport,
};
use crate::error::ChartResult;

/// Owner of the chart's coordinate scales.
///
/// The time scale carries both the full (context) and focus ranges. The two
/// value scales always share one domain and differ only in their viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleManager {
    time: TimeScale,
    focus_value: PriceScale,
    context_value: PriceScale,
    value_tuning: ValueDomainTuning,
    focus_viewport: Viewport,
    context_viewport: Viewport,
}

impl ScaleManager {
    pub fn new(
        points: &[PricePoint],
        mode: PriceScaleMode,
        time_tuning: TimeDomainTuning,
        value_tuning: ValueDomainTuning,
        focus_viewport: Viewport,
        context_viewport: Viewport,
    ) -> ChartResult<Self> {
        let time = TimeScale::from_points(points, time_tuning)?;
        let value = PriceScale::from_points(points, mode, value_tuning)?;
        debug!(
            full_start = time.full_range().0,
            full_end = time.full_range().1,
            value_start = value.domain().0,
            value_end = value.domain().1,
            ?mode,
            "scales initialized"
        );
        Ok(Self {
            time,
            focus_value: value,
            context_value: value,
            value_tuning,
            focus_viewport,
            context_viewport,
        })
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.time
    }

    #[must_use]
    pub fn focus_value_scale(&self) -> PriceScale {
        self.focus_value
    }

    #[must_use]
    pub fn context_value_scale(&self) -> PriceScale {
        self.context_value
    }

    #[must_use]
    pub fn focus_viewport(&self) -> Viewport {
        self.focus_viewport
    }

    #[must_use]
    pub fn context_viewport(&self) -> Viewport {
        self.context_viewport
    }

    #[must_use]
    pub fn mode(&self) -> PriceScaleMode {
        self.focus_value.mode()
    }

    #[must_use]
    pub fn value_domain(&self) -> (f64, f64) {
        self.focus_value.domain()
    }

    #[must_use]
    pub fn full_domain(&self) -> (f64, f64) {
        self.time.full_range()
    }

    #[must_use]
    pub fn focus_domain(&self) -> (f64, f64) {
        self.time.focus_range()
    }

    /// Rebuilds both value scales for `mode` from the series extrema.
    ///
    /// The previous domain is never consulted, so switching back and forth
    /// reproduces identical domains.
    pub fn set_mode(&mut self, points: &[PricePoint], mode: PriceScaleMode) -> ChartResult<()> {
        let value = PriceScale::from_points(points, mode, self.value_tuning)?;
        self.focus_value = value;
        self.context_value = value;
        debug!(
            ?mode,
            value_start = value.domain().0,
            value_end = value.domain().1,
            "value scales recomputed"
        );
        Ok(())
    }

    pub fn set_focus_domain(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.time.set_focus_range(start, end)
    }

    pub fn reset_focus_domain(&mut self) {
        self.time.reset_focus_to_full();
    }

    /// Inverts a context-pane pixel selection into a time interval.
    pub fn context_selection_to_domain(&self, px0: f64, px1: f64) -> ChartResult<(f64, f64)> {
        let start = self.time.full_pixel_to_time(px0, self.context_viewport)?;
        let end = self.time.full_pixel_to_time(px1, self.context_viewport)?;
        Ok((start.min(end), start.max(end)))
    }

    pub fn focus_point(&self, point: &PricePoint) -> ChartResult<PixelPoint> {
        Ok(PixelPoint::new(
            self.time.time_to_pixel(point.time, self.focus_viewport)?,
            self.focus_value
                .price_to_pixel(point.price, self.focus_viewport)?,
        ))
    }

    pub fn context_point(&self, point: &PricePoint) -> ChartResult<PixelPoint> {
        Ok(PixelPoint::new(
            self.time
                .full_time_to_pixel(point.time, self.context_viewport)?,
            self.context_value
                .price_to_pixel(point.price, self.context_viewport)?,
        ))
    }
}
