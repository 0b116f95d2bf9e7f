use tracing::trace;

use crate::core::PricePoint;
use crate::error::{ChartError, ChartResult};
use crate::extensions::nearest_sample_index;
use crate::interaction::HoverSnap;
use crate::render::{FrameTransition, Renderer};

use super::ChartCore;

impl<R: Renderer> ChartCore<R> {
    /// Snaps the pointer at focus-pane `x` to the nearest visible sample.
    pub fn pointer_move(&mut self, x: f64) -> ChartResult<Option<HoverSnap>> {
        if !x.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer x must be finite".to_owned(),
            ));
        }
        let snap = self.hover_snap_at(x)?;
        self.hover.on_pointer_move(x, snap);
        trace!(x, snapped = snap.is_some(), "pointer move");
        self.redraw(FrameTransition::Immediate)?;
        Ok(snap)
    }

    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.hover.on_pointer_leave();
        self.redraw(FrameTransition::Immediate)
    }

    fn hover_snap_at(&self, x: f64) -> ChartResult<Option<HoverSnap>> {
        let scales = &self.model.scales;
        let time = scales
            .time_scale()
            .pixel_to_time(x, scales.focus_viewport())?;
        let visible = self.visible_points();
        let Some(index) = nearest_sample_index(visible, time) else {
            return Ok(None);
        };
        let point: &PricePoint = &visible[index];
        let pixel = scales.focus_point(point)?;
        Ok(Some(HoverSnap {
            x: pixel.x,
            y: pixel.y,
            time: point.time,
            price: point.price,
            is_fictitious: point.is_fictitious,
        }))
    }

    /// Re-snaps a live pointer after the scales moved under it.
    pub(super) fn refresh_hover_snap(&mut self) {
        let Some(x) = self.hover.pointer_x() else {
            return;
        };
        let snap = self.hover_snap_at(x).ok().flatten();
        self.hover.set_snap(snap);
    }
}
