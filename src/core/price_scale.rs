use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{LinearScale, PricePoint, Viewport};
use crate::error::{ChartError, ChartResult};

/// Mapping mode for the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PriceScaleMode {
    /// Uniform spacing in natural-log price units (all prices must be > 0).
    #[default]
    Log,
    /// Uniform spacing in raw price units.
    Linear,
}

impl PriceScaleMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Log => Self::Linear,
            Self::Linear => Self::Log,
        }
    }
}

/// Tuning for value-domain derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomainTuning {
    /// Fixed lower bound in log mode. Must stay below every plotted value,
    /// synthetic floor included.
    pub log_floor: f64,
    /// Linear-mode lower bound as a fraction of the maximum price, below zero.
    pub linear_bottom_ratio: f64,
    /// Tick count hint used when rounding the linear domain.
    pub nice_tick_count: usize,
}

impl Default for ValueDomainTuning {
    fn default() -> Self {
        Self {
            log_floor: 0.008,
            linear_bottom_ratio: 0.03,
            nice_tick_count: 10,
        }
    }
}

impl ValueDomainTuning {
    pub(crate) fn validate(self) -> ChartResult<Self> {
        if !self.log_floor.is_finite() || self.log_floor <= 0.0 {
            return Err(ChartError::InvalidData(
                "log floor must be finite and > 0".to_owned(),
            ));
        }
        if !self.linear_bottom_ratio.is_finite() || self.linear_bottom_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "linear bottom ratio must be finite and >= 0".to_owned(),
            ));
        }
        if self.nice_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "nice tick count must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Value domain for `mode`, derived only from the series maximum.
///
/// The maximum is taken over the whole series rather than the visible window
/// so the vertical scale stays put while the focus window moves.
pub fn compute_value_domain(
    points: &[PricePoint],
    mode: PriceScaleMode,
    tuning: ValueDomainTuning,
) -> ChartResult<(f64, f64)> {
    let tuning = tuning.validate()?;
    let max_price = points
        .iter()
        .map(|point| point.price)
        .reduce(f64::max)
        .ok_or(ChartError::EmptySeries)?;
    if !max_price.is_finite() || max_price <= 0.0 {
        return Err(ChartError::InvalidData(
            "series maximum must be finite and > 0".to_owned(),
        ));
    }

    match mode {
        PriceScaleMode::Log => Ok((log_domain_floor(points, max_price, tuning), max_price)),
        PriceScaleMode::Linear => Ok(nice_linear_domain(
            -max_price * tuning.linear_bottom_ratio,
            max_price,
            tuning.nice_tick_count,
        )),
    }
}

/// Lower log bound: the configured floor, or half the smallest positive price
/// when the whole series sits at or below that floor.
fn log_domain_floor(points: &[PricePoint], max_price: f64, tuning: ValueDomainTuning) -> f64 {
    if max_price > tuning.log_floor {
        return tuning.log_floor;
    }
    let min_positive = points
        .iter()
        .map(|point| point.price)
        .filter(|price| price.is_finite() && *price > 0.0)
        .reduce(f64::min)
        .unwrap_or(max_price);
    debug!(
        max_price,
        log_floor = tuning.log_floor,
        "series below log floor, lowering domain floor"
    );
    min_positive * 0.5
}

/// Expands `[start, stop]` outward to multiples of a round tick step.
///
/// Iterates until the step stabilises, as d3's `linear.nice` does.
#[must_use]
pub fn nice_linear_domain(start: f64, stop: f64, tick_count: usize) -> (f64, f64) {
    let (mut lo, mut hi) = (start.min(stop), start.max(stop));
    let mut previous_step = None;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, tick_count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }
    (lo, hi)
}

/// Round tick step for `count` ticks over `[start, stop]`.
///
/// Positive results are the step itself; negative results encode `1 / -step`
/// for sub-unit steps so that multiples stay exact in floating point.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
    const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
    const E2: f64 = std::f64::consts::SQRT_2;

    let step = (stop - start) / count as f64;
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10_f64.powf(power)
    } else {
        -10_f64.powf(-power) / factor
    }
}

/// Value axis mapped onto an inverted pixel range (`height` at the bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    domain_start: f64,
    domain_end: f64,
    mode: PriceScaleMode,
}

impl PriceScale {
    pub fn new(domain_start: f64, domain_end: f64, mode: PriceScaleMode) -> ChartResult<Self> {
        let scale = Self {
            domain_start,
            domain_end,
            mode,
        };
        scale.transformed()?;
        Ok(scale)
    }

    /// Derives the domain from `points` with the given mode.
    pub fn from_points(
        points: &[PricePoint],
        mode: PriceScaleMode,
        tuning: ValueDomainTuning,
    ) -> ChartResult<Self> {
        let (start, end) = compute_value_domain(points, mode, tuning)?;
        Self::new(start, end, mode)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn mode(self) -> PriceScaleMode {
        self.mode
    }

    pub fn price_to_pixel(self, price: f64, viewport: Viewport) -> ChartResult<f64> {
        let height = checked_height(viewport)?;
        let ratio = self
            .transformed()?
            .normalize(to_scale_domain(price, self.mode)?)?;
        Ok(height - ratio * height)
    }

    pub fn pixel_to_price(self, pixel: f64, viewport: Viewport) -> ChartResult<f64> {
        let height = checked_height(viewport)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let transformed = self.transformed()?.denormalize((height - pixel) / height)?;
        from_scale_domain(transformed, self.mode)
    }

    /// Axis ticks in raw price units, ascending.
    ///
    /// Linear mode yields round multiples of the nice step; log mode yields a
    /// 1-2-5 ladder per decade, thinned to at most `max_ticks`.
    pub fn ticks(self, max_ticks: usize) -> ChartResult<Vec<f64>> {
        if max_ticks == 0 {
            return Ok(Vec::new());
        }
        let (lo, hi) = (
            self.domain_start.min(self.domain_end),
            self.domain_start.max(self.domain_end),
        );
        match self.mode {
            PriceScaleMode::Linear => Ok(linear_ticks(lo, hi, max_ticks)),
            PriceScaleMode::Log => {
                let ladder = log_ladder(lo, hi)?;
                Ok(thin_ticks(ladder, max_ticks))
            }
        }
    }

    fn transformed(self) -> ChartResult<LinearScale> {
        LinearScale::new(
            to_scale_domain(self.domain_start, self.mode)?,
            to_scale_domain(self.domain_end, self.mode)?,
        )
    }
}

fn checked_height(viewport: Viewport) -> ChartResult<f64> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(viewport.height_px())
}

fn to_scale_domain(value: f64, mode: PriceScaleMode) -> ChartResult<f64> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData("price must be finite".to_owned()));
    }
    match mode {
        PriceScaleMode::Linear => Ok(value),
        PriceScaleMode::Log => {
            if value <= 0.0 {
                return Err(ChartError::InvalidData(
                    "log price scale requires values > 0".to_owned(),
                ));
            }
            Ok(value.ln())
        }
    }
}

fn from_scale_domain(value: f64, mode: PriceScaleMode) -> ChartResult<f64> {
    match mode {
        PriceScaleMode::Linear => Ok(value),
        PriceScaleMode::Log => {
            let raw = value.exp();
            if !raw.is_finite() || raw <= 0.0 {
                return Err(ChartError::InvalidData(
                    "mapped log price must be finite and > 0".to_owned(),
                ));
            }
            Ok(raw)
        }
    }
}

fn linear_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let step = tick_increment(lo, hi, count);
    if step > 0.0 {
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    } else if step < 0.0 {
        let inverse = -step;
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    } else {
        vec![lo]
    }
}

fn log_ladder(lo: f64, hi: f64) -> ChartResult<Vec<f64>> {
    if lo <= 0.0 {
        return Err(ChartError::InvalidData(
            "log price scale requires values > 0".to_owned(),
        ));
    }
    let min_exp = lo.log10().floor() as i32;
    let max_exp = hi.log10().ceil() as i32;
    let mut ticks = Vec::new();
    for exp in min_exp..=max_exp {
        let decade = 10_f64.powi(exp);
        for multiplier in [1.0, 2.0, 5.0] {
            let candidate = decade * multiplier;
            if candidate >= lo && candidate <= hi {
                ticks.push(candidate);
            }
        }
    }
    Ok(ticks)
}

/// Thins a log ladder to at most `max_ticks`, preferring decade starts.
fn thin_ticks(ticks: Vec<f64>, max_ticks: usize) -> Vec<f64> {
    if ticks.len() <= max_ticks {
        return ticks;
    }
    let decades: Vec<f64> = ticks
        .iter()
        .copied()
        .filter(|tick| (tick.log10() - tick.log10().round()).abs() < 1e-9)
        .collect();
    let source = if decades.is_empty() { ticks } else { decades };
    if source.len() <= max_ticks {
        return source;
    }
    let stride = source.len().div_ceil(max_ticks);
    source.into_iter().step_by(stride).collect()
}
