mod frame;
mod null_renderer;

pub use frame::{ChartFrame, CycleBand, FrameTransition};
pub use null_renderer::NullRenderer;

use crate::error::{ChartError, ChartResult};

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `ChartFrame` so drawing code stays
/// isolated from windowing, scale and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()>;

    /// Called once when the initial load fails; the chart never becomes ready.
    fn render_failure(&mut self, error: &ChartError);
}
