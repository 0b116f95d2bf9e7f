use serde::{Deserialize, Serialize};

use crate::core::{CycleKind, PixelPoint, PriceScaleMode, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::PlacedEventMarker;
use crate::interaction::{BrushState, HoverSnap};

/// How the renderer should move from the previous frame to this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameTransition {
    /// Brush changes and pointer updates redraw without animation.
    #[default]
    Immediate,
    Animated { duration_ms: u64 },
}

/// Market cycle shading in focus-pane pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleBand {
    pub kind: CycleKind,
    pub x: f64,
    /// Never negative, even for cycles whose end precedes their start.
    pub width: f64,
}

/// Everything a backend needs to draw both panes.
///
/// Frames are fully materialized: pixel paths, marker coordinates and
/// resolved titles. Backends never see the series or the scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub focus_viewport: Viewport,
    pub context_viewport: Viewport,
    pub full_domain: (f64, f64),
    pub focus_domain: (f64, f64),
    pub value_domain: (f64, f64),
    pub scale_mode: PriceScaleMode,
    pub value_ticks: Vec<f64>,
    /// Visible real samples, focus pixels.
    pub real_path: Vec<PixelPoint>,
    /// Visible synthetic lead-in samples, focus pixels.
    pub fictitious_path: Vec<PixelPoint>,
    /// Whole series, context pixels.
    pub context_path: Vec<PixelPoint>,
    pub markers: Vec<PlacedEventMarker>,
    pub cycle_bands: Vec<CycleBand>,
    pub hover: Option<HoverSnap>,
    pub brush_state: BrushState,
    pub brush_selection_px: Option<(f64, f64)>,
    pub show_fictitious_legend: bool,
    pub transition: FrameTransition,
}

impl ChartFrame {
    pub fn validate(&self) -> ChartResult<()> {
        for viewport in [self.focus_viewport, self.context_viewport] {
            if !viewport.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }

        let paths = [&self.real_path, &self.fictitious_path, &self.context_path];
        if paths
            .into_iter()
            .flatten()
            .any(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "frame path contains non-finite coordinates".to_owned(),
            ));
        }

        for marker in &self.markers {
            if !marker.x.is_finite() || !marker.y.is_finite() || marker.radius_px < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "marker {} has invalid geometry",
                    marker.index
                )));
            }
        }

        for band in &self.cycle_bands {
            if !band.x.is_finite() || !band.width.is_finite() || band.width < 0.0 {
                return Err(ChartError::InvalidData(
                    "cycle band has invalid geometry".to_owned(),
                ));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn emphasized_marker_count(&self) -> usize {
        self.markers.iter().filter(|marker| marker.emphasized).count()
    }
}
