use tracing::{debug, warn};

use crate::error::ChartResult;
use crate::extensions::ChartCommand;
use crate::render::{FrameTransition, Renderer};

use super::ChartCore;

impl<R: Renderer> ChartCore<R> {
    /// Applies a context-pane brush selection in context pixels.
    ///
    /// `Some` narrows the focus domain to the inverted selection; `None`, a
    /// selection collapsed below the minimum width, or one the time scale
    /// rejects, restores the full padded domain. Always redraws without
    /// animation.
    pub fn on_brush(&mut self, selection: Option<(f64, f64)>) -> ChartResult<()> {
        let width = self.model.scales.context_viewport().width_px();
        match self.brush.apply(selection, width) {
            Some((px0, px1)) => {
                let applied = self
                    .model
                    .scales
                    .context_selection_to_domain(px0, px1)
                    .and_then(|(start, end)| self.model.scales.set_focus_domain(start, end));
                if let Err(err) = applied {
                    warn!(error = %err, px0, px1, "rejecting brush selection, restoring full domain");
                    self.brush.clear();
                    self.model.scales.reset_focus_domain();
                }
            }
            None => self.model.scales.reset_focus_domain(),
        }

        let (focus_start, focus_end) = self.model.scales.focus_domain();
        self.model.state.focus_domain = (focus_start, focus_end);
        self.refresh_hover_snap();
        debug!(
            state = ?self.brush.state(),
            focus_start,
            focus_end,
            visible = self.visible_points().len(),
            "brush applied"
        );

        self.emit_command(ChartCommand::BrushChanged {
            state: self.brush.state(),
            focus_start,
            focus_end,
        });
        self.redraw(FrameTransition::Immediate)
    }

    /// Clears the brush and drives exactly the `on_brush(None)` path.
    pub fn reset_zoom(&mut self) -> ChartResult<()> {
        self.brush.clear();
        self.on_brush(None)
    }
}
