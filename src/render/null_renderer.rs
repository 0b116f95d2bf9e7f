use crate::error::{ChartError, ChartResult};
use crate::render::{ChartFrame, FrameTransition, Renderer};

/// Headless renderer that validates and records what it was handed.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_transition: Option<FrameTransition>,
    pub last_marker_count: usize,
    pub last_visible_len: usize,
    pub failure: Option<String>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_transition = Some(frame.transition);
        self.last_marker_count = frame.markers.len();
        self.last_visible_len = frame.real_path.len() + frame.fictitious_path.len();
        Ok(())
    }

    fn render_failure(&mut self, error: &ChartError) {
        self.failure = Some(error.to_string());
    }
}
