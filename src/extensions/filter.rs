use indexmap::IndexMap;

use crate::core::{CategoryFilter, Event, EventCategory};

/// One emphasis flag per event, in event order.
#[must_use]
pub fn classify(events: &[Event], filter: CategoryFilter) -> Vec<bool> {
    events
        .iter()
        .map(|event| filter.admits(event.category))
        .collect()
}

/// Indices of the events that stay in the timeline list under `filter`.
#[must_use]
pub fn emphasized_indices(events: &[Event], filter: CategoryFilter) -> Vec<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(_, event)| filter.admits(event.category))
        .map(|(index, _)| index)
        .collect()
}

/// Event count per category, in first-seen order.
#[must_use]
pub fn category_counts(events: &[Event]) -> IndexMap<EventCategory, usize> {
    let mut counts = IndexMap::new();
    for event in events {
        *counts.entry(event.category).or_insert(0) += 1;
    }
    counts
}
