use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

/// One sample of the price series. `time` is unix milliseconds.
///
/// Fictitious points bridge the gap between the earliest event and the first
/// real quote. They are drawn, but never count as market data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: f64,
    pub price: f64,
    #[serde(default)]
    pub is_fictitious: bool,
}

impl PricePoint {
    #[must_use]
    pub fn new(time: f64, price: f64) -> Self {
        Self {
            time,
            price,
            is_fictitious: false,
        }
    }

    #[must_use]
    pub fn fictitious(time: f64, price: f64) -> Self {
        Self {
            time,
            price,
            is_fictitious: true,
        }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, price: Decimal) -> ChartResult<Self> {
        let price = decimal_to_f64(price, "price")?;
        if !price.is_finite() || price <= 0.0 {
            return Err(ChartError::InvalidData(
                "price must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self::new(datetime_to_unix_millis(time), price))
    }
}

/// Controls for series ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesTuning {
    /// Price used for the synthetic lead-in floor. Must stay representable on
    /// a log axis, so it has to be strictly positive.
    pub synthetic_floor: f64,
}

impl Default for SeriesTuning {
    fn default() -> Self {
        Self {
            synthetic_floor: 0.01,
        }
    }
}

impl SeriesTuning {
    pub(crate) fn validate(self) -> ChartResult<Self> {
        if !self.synthetic_floor.is_finite() || self.synthetic_floor <= 0.0 {
            return Err(ChartError::InvalidData(
                "series synthetic floor must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Ordered, read-only price series.
///
/// Points are sorted by `time` (non-decreasing). Any synthetic lead-in points
/// sit at the front of the sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    points: Vec<PricePoint>,
    lead_in_len: usize,
}

/// Outcome of [`Series::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSeries {
    pub series: Series,
    /// Whether synthetic lead-in points were prepended (drives the legend).
    pub padded: bool,
    pub dropped_rows: usize,
}

impl Series {
    /// Builds the series from raw `(timestamp_ms, price)` pairs.
    ///
    /// Input is expected pre-sorted; it is never re-sorted. Rows that are not
    /// finite, carry a non-positive price or step backwards in time are
    /// dropped. A row repeating the previous timestamp replaces it.
    ///
    /// When `earliest_event_time` precedes the first real sample, three
    /// fictitious points are prepended forming a floor-then-rise step.
    pub fn load<I>(
        raw_pairs: I,
        earliest_event_time: Option<f64>,
        tuning: SeriesTuning,
    ) -> ChartResult<LoadedSeries>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let tuning = tuning.validate()?;
        let raw_pairs = raw_pairs.into_iter();
        let mut points: Vec<PricePoint> = Vec::with_capacity(raw_pairs.size_hint().0 + 3);
        let mut dropped_rows = 0_usize;

        for (time, price) in raw_pairs {
            if !time.is_finite() || !price.is_finite() || price <= 0.0 {
                dropped_rows += 1;
                continue;
            }
            match points.last_mut() {
                Some(last) if time == last.time => {
                    last.price = price;
                }
                Some(last) if time < last.time => {
                    warn!(time, previous = last.time, "dropping out-of-order price row");
                    dropped_rows += 1;
                }
                _ => points.push(PricePoint::new(time, price)),
            }
        }

        let Some(first_real) = points.first().copied() else {
            return Err(ChartError::EmptySeries);
        };

        let padded = match earliest_event_time {
            Some(event_time) if event_time.is_finite() && event_time < first_real.time => {
                let floor = tuning.synthetic_floor;
                let lead_in = [
                    PricePoint::fictitious(event_time, floor),
                    PricePoint::fictitious(first_real.time, floor),
                    PricePoint::fictitious(first_real.time, first_real.price),
                ];
                points.splice(0..0, lead_in);
                true
            }
            _ => false,
        };

        debug!(
            points = points.len(),
            dropped_rows, padded, "loaded price series"
        );

        Ok(LoadedSeries {
            series: Self {
                points,
                lead_in_len: if padded { 3 } else { 0 },
            },
            padded,
            dropped_rows,
        })
    }

    /// Wraps already-canonical points. Fails when times are not non-decreasing.
    pub fn from_points(points: Vec<PricePoint>) -> ChartResult<Self> {
        if points.windows(2).any(|pair| pair[1].time < pair[0].time) {
            return Err(ChartError::InvalidData(
                "series points must be sorted by time".to_owned(),
            ));
        }
        let lead_in_len = points.iter().take_while(|p| p.is_fictitious).count();
        Ok(Self {
            points,
            lead_in_len,
        })
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Points that carry real market data.
    pub fn real_points(&self) -> impl Iterator<Item = &PricePoint> + '_ {
        self.points.iter().filter(|p| !p.is_fictitious)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn has_lead_in(&self) -> bool {
        self.lead_in_len > 0
    }

    #[must_use]
    pub fn time_extent(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.time, self.points.last()?.time))
    }

    /// Maximum price over the whole series, lead-in included.
    #[must_use]
    pub fn max_price(&self) -> Option<f64> {
        self.points.iter().map(|p| p.price).reduce(f64::max)
    }
}
