use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Event, EventCategory, PricePoint, PriceScale, TimeScale, Viewport, bisect_left_from};
use crate::error::{ChartError, ChartResult};

/// Where an event marker sits vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarkerAnchor {
    /// Nearest series sample to the event date.
    Sample { index: usize, time: f64, price: f64 },
    /// No sample to anchor to (empty series); drawn on the pane's bottom edge.
    Boundary,
}

impl MarkerAnchor {
    #[must_use]
    pub fn price(self) -> Option<f64> {
        match self {
            Self::Sample { price, .. } => Some(price),
            Self::Boundary => None,
        }
    }
}

/// The samples immediately around `time`: the one at or before it (or the
/// first sample when `time` precedes the series) and the one after it.
///
/// Uses a left bisection starting at index 1, so at most two candidates are
/// returned and the first is always present for a non-empty series.
#[must_use]
pub fn bisection_neighbors(points: &[PricePoint], time: f64) -> SmallVec<[usize; 2]> {
    let mut neighbors = SmallVec::new();
    if points.is_empty() {
        return neighbors;
    }
    let index = bisect_left_from(points, time, 1);
    neighbors.push(index - 1);
    if index < points.len() {
        neighbors.push(index);
    }
    neighbors
}

/// Index of the sample chronologically closest to `time`.
///
/// The later neighbour wins only when it is strictly closer, so an exact
/// midpoint resolves to the earlier sample.
#[must_use]
pub fn nearest_sample_index(points: &[PricePoint], time: f64) -> Option<usize> {
    let neighbors = bisection_neighbors(points, time);
    match neighbors.as_slice() {
        [before, after] => {
            let (d0, d1) = (points[*before], points[*after]);
            Some(if time - d0.time > d1.time - time {
                *after
            } else {
                *before
            })
        }
        [only] => Some(*only),
        _ => None,
    }
}

/// Projects an event date onto the series for vertical placement.
#[must_use]
pub fn project_event_anchor(points: &[PricePoint], time: f64) -> MarkerAnchor {
    match nearest_sample_index(points, time) {
        Some(index) => {
            let point = points[index];
            MarkerAnchor::Sample {
                index,
                time: point.time,
                price: point.price,
            }
        }
        None => MarkerAnchor::Boundary,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacementConfig {
    /// Radius of an emphasized marker; suppressed markers collapse to 0.
    pub radius_px: f64,
}

impl Default for MarkerPlacementConfig {
    fn default() -> Self {
        Self { radius_px: 6.0 }
    }
}

impl MarkerPlacementConfig {
    pub(crate) fn validate(self) -> ChartResult<Self> {
        if !self.radius_px.is_finite() || self.radius_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Per-frame inputs that do not come from the scales.
#[derive(Debug, Clone, Copy)]
pub struct MarkerPlacementContext<'a> {
    pub language: &'a str,
    pub fallback_language: &'a str,
    /// One flag per event (see `extensions::filter`).
    pub emphasis: &'a [bool],
    /// Markers whose event time equals this value are flagged highlighted.
    pub highlighted_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedEventMarker {
    /// Index into the event list, stable across frames.
    pub index: usize,
    pub time: f64,
    pub category: EventCategory,
    pub anchor: MarkerAnchor,
    pub x: f64,
    pub y: f64,
    pub radius_px: f64,
    pub emphasized: bool,
    pub highlighted: bool,
    /// Whether `x` falls inside the focus pane.
    pub in_view: bool,
    pub title: String,
}

/// Places every event on the focus pane, preserving event order.
pub fn place_event_markers(
    events: &[Event],
    points: &[PricePoint],
    time_scale: TimeScale,
    price_scale: PriceScale,
    viewport: Viewport,
    context: MarkerPlacementContext<'_>,
    config: MarkerPlacementConfig,
) -> ChartResult<Vec<PlacedEventMarker>> {
    let config = config.validate()?;
    let emphasis = context.emphasis;
    if emphasis.len() != events.len() {
        return Err(ChartError::InvalidData(format!(
            "emphasis flags ({}) must match event count ({})",
            emphasis.len(),
            events.len()
        )));
    }

    let width = viewport.width_px();
    let mut placed = Vec::with_capacity(events.len());
    for (index, (event, emphasized)) in events.iter().zip(emphasis.iter().copied()).enumerate() {
        if !event.time.is_finite() {
            return Err(ChartError::InvalidData(
                "event time must be finite".to_owned(),
            ));
        }
        let anchor = project_event_anchor(points, event.time);
        let x = time_scale.time_to_pixel(event.time, viewport)?;
        let y = match anchor {
            MarkerAnchor::Sample { price, .. } => price_scale.price_to_pixel(price, viewport)?,
            MarkerAnchor::Boundary => viewport.height_px(),
        };

        placed.push(PlacedEventMarker {
            index,
            time: event.time,
            category: event.category,
            anchor,
            x,
            y,
            radius_px: if emphasized { config.radius_px } else { 0.0 },
            emphasized,
            highlighted: context.highlighted_time == Some(event.time),
            in_view: (0.0..=width).contains(&x),
            title: event
                .title
                .resolve(context.language, context.fallback_language)
                .to_owned(),
        });
    }

    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::bisection_neighbors;
    use crate::core::PricePoint;

    #[test]
    fn neighbors_are_clamped_to_first_sample() {
        let points = vec![PricePoint::new(10.0, 1.0), PricePoint::new(20.0, 2.0)];
        assert_eq!(bisection_neighbors(&points, 0.0).as_slice(), &[0, 1]);
        assert_eq!(bisection_neighbors(&points, 15.0).as_slice(), &[0, 1]);
        assert_eq!(bisection_neighbors(&points, 25.0).as_slice(), &[1]);
        assert!(bisection_neighbors(&[], 25.0).is_empty());
    }
}
