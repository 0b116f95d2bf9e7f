use serde::Deserialize;

use crate::core::primitives::parse_calendar_date;
use crate::core::{CycleKind, MarketCycle};
use crate::error::{ChartError, ChartResult};

use super::FeedKind;

#[derive(Debug, Deserialize)]
struct RawCycle {
    #[serde(rename = "startDate")]
    start_date: String,
    #[serde(rename = "endDate")]
    end_date: String,
    #[serde(rename = "type")]
    kind: CycleKind,
}

/// Parses `[{ startDate, endDate, type }]`. Overlaps are not checked.
pub fn parse_cycle_feed(json: &str) -> ChartResult<Vec<MarketCycle>> {
    let cycle_error = |reason: String| ChartError::FeedLoad {
        feed: FeedKind::Cycles,
        reason,
    };
    let raw: Vec<RawCycle> = serde_json::from_str(json).map_err(|e| cycle_error(e.to_string()))?;
    raw.into_iter()
        .map(|cycle| {
            let start = parse_calendar_date(&cycle.start_date).map_err(|e| cycle_error(e.to_string()))?;
            let end = parse_calendar_date(&cycle.end_date).map_err(|e| cycle_error(e.to_string()))?;
            MarketCycle::new(start, end, cycle.kind).map_err(|e| cycle_error(e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_cycle_feed;
    use crate::core::CycleKind;

    #[test]
    fn parses_cycle_ranges() {
        let cycles = parse_cycle_feed(
            r#"[{"startDate": "2011-06-08", "endDate": "2011-11-18", "type": "bear"}]"#,
        )
        .expect("feed should parse");
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].kind, CycleKind::Bear);
        assert!(cycles[0].start < cycles[0].end);
    }

    #[test]
    fn bad_date_fails_the_feed() {
        assert!(parse_cycle_feed(r#"[{"startDate": "2011-13-40", "endDate": "2011-11-18", "type": "bull"}]"#).is_err());
    }
}
