use serde::{Deserialize, Serialize};

/// Whether the context-pane brush currently holds a selection.
///
/// `Unselected` means the focus pane shows the full padded domain; the host
/// hides its reset-zoom control in that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrushState {
    #[default]
    Unselected,
    Selected,
}

/// Selection rectangle of the context pane, in context pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushController {
    selection_px: Option<(f64, f64)>,
    min_selection_px: f64,
}

impl Default for BrushController {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl BrushController {
    #[must_use]
    pub fn new(min_selection_px: f64) -> Self {
        Self {
            selection_px: None,
            min_selection_px,
        }
    }

    #[must_use]
    pub fn state(self) -> BrushState {
        if self.selection_px.is_some() {
            BrushState::Selected
        } else {
            BrushState::Unselected
        }
    }

    #[must_use]
    pub fn selection_px(self) -> Option<(f64, f64)> {
        self.selection_px
    }

    /// Stores a raw selection and returns the normalized one.
    ///
    /// Bounds are ordered and clamped to `[0, width_px]`. Non-finite bounds,
    /// zero-width selections and selections narrower than the minimum width
    /// count as a cleared brush.
    pub fn apply(&mut self, selection: Option<(f64, f64)>, width_px: f64) -> Option<(f64, f64)> {
        self.selection_px = selection.and_then(|(a, b)| {
            if !a.is_finite() || !b.is_finite() {
                return None;
            }
            let lo = a.min(b).clamp(0.0, width_px);
            let hi = a.max(b).clamp(0.0, width_px);
            let span = hi - lo;
            (span > 0.0 && span >= self.min_selection_px).then_some((lo, hi))
        });
        self.selection_px
    }

    pub fn clear(&mut self) {
        self.selection_px = None;
    }
}

/// Nearest visible sample under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverSnap {
    pub x: f64,
    pub y: f64,
    pub time: f64,
    pub price: f64,
    pub is_fictitious: bool,
}

/// Pointer state over the focus pane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HoverState {
    pointer_x: Option<f64>,
    snap: Option<HoverSnap>,
}

impl HoverState {
    #[must_use]
    pub fn pointer_x(self) -> Option<f64> {
        self.pointer_x
    }

    #[must_use]
    pub fn snap(self) -> Option<HoverSnap> {
        self.snap
    }

    pub fn on_pointer_move(&mut self, x: f64, snap: Option<HoverSnap>) {
        self.pointer_x = Some(x);
        self.snap = snap;
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer_x = None;
        self.snap = None;
    }

    pub(crate) fn set_snap(&mut self, snap: Option<HoverSnap>) {
        self.snap = snap;
    }
}
