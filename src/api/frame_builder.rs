use crate::core::{PixelPoint, PricePoint, Series, split_by_provenance};
use crate::error::ChartResult;
use crate::render::{ChartFrame, CycleBand, FrameTransition, Renderer};

use super::{ChartCore, ScaleManager};

const VALUE_TICK_LIMIT: usize = 10;

/// Whole series mapped onto the context pane.
///
/// Depends only on the full time domain and the value mode, so it is built at
/// initialization and rebuilt on mode changes only.
pub(super) fn context_path(series: &Series, scales: &ScaleManager) -> ChartResult<Vec<PixelPoint>> {
    series
        .points()
        .iter()
        .map(|point| scales.context_point(point))
        .collect()
}

fn focus_path(points: &[PricePoint], scales: &ScaleManager) -> ChartResult<Vec<PixelPoint>> {
    points.iter().map(|point| scales.focus_point(point)).collect()
}

impl<R: Renderer> ChartCore<R> {
    /// Materializes the frame for the current state without drawing it.
    pub fn build_frame(&self, transition: FrameTransition) -> ChartResult<ChartFrame> {
        let scales = &self.model.scales;
        let (real, fictitious) = split_by_provenance(self.visible_points());
        let time_scale = scales.time_scale();
        let focus_viewport = scales.focus_viewport();

        let cycle_bands = self
            .model
            .cycles
            .iter()
            .map(|cycle| -> ChartResult<CycleBand> {
                let x = time_scale.time_to_pixel(cycle.start, focus_viewport)?;
                let x_end = time_scale.time_to_pixel(cycle.end, focus_viewport)?;
                Ok(CycleBand {
                    kind: cycle.kind,
                    x,
                    width: (x_end - x).max(0.0),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        Ok(ChartFrame {
            focus_viewport,
            context_viewport: scales.context_viewport(),
            full_domain: scales.full_domain(),
            focus_domain: scales.focus_domain(),
            value_domain: scales.value_domain(),
            scale_mode: scales.mode(),
            value_ticks: scales.focus_value_scale().ticks(VALUE_TICK_LIMIT)?,
            real_path: focus_path(&real, scales)?,
            fictitious_path: focus_path(&fictitious, scales)?,
            context_path: self.model.context_path.clone(),
            markers: self.markers()?,
            cycle_bands,
            hover: self.hover.snap(),
            brush_state: self.brush.state(),
            brush_selection_px: self.brush.selection_px(),
            show_fictitious_legend: self.model.padded,
            transition,
        })
    }
}
