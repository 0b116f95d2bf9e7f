use crate::core::PricePoint;

/// Index of the first point whose time is `>= time` (left bisection).
///
/// Points must be sorted by time. Runs in `O(log n)`.
#[must_use]
pub fn bisect_left(points: &[PricePoint], time: f64) -> usize {
    points.partition_point(|point| point.time < time)
}

/// Same as [`bisect_left`] but never returns less than `lo`.
#[must_use]
pub fn bisect_left_from(points: &[PricePoint], time: f64, lo: usize) -> usize {
    let lo = lo.min(points.len());
    lo + bisect_left(&points[lo..], time)
}

/// Inclusive index bounds of the window covering `[start, end]`.
///
/// Each bound is widened by one sample so a line drawn through the slice
/// reaches past both pane edges. Returns `None` for an empty series.
#[must_use]
pub fn window_bounds(points: &[PricePoint], start: f64, end: f64) -> Option<(usize, usize)> {
    if points.is_empty() {
        return None;
    }
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    let last = points.len() - 1;
    let first_index = bisect_left(points, min_t).saturating_sub(1);
    let last_index = bisect_left(points, max_t).min(last);
    Some((first_index.min(last_index), last_index))
}

/// Minimal contiguous run of `points` covering `[start, end]`.
#[must_use]
pub fn slice_window(points: &[PricePoint], start: f64, end: f64) -> &[PricePoint] {
    match window_bounds(points, start, end) {
        Some((first, last)) => &points[first..=last],
        None => &[],
    }
}

/// Real and fictitious sub-sequences of a window, in order.
///
/// The focus pane draws them as two separate paths so the synthetic lead-in
/// never blends into the real price line.
#[must_use]
pub fn split_by_provenance(window: &[PricePoint]) -> (Vec<PricePoint>, Vec<PricePoint>) {
    window.iter().partition(|point| !point.is_fictitious)
}
