use crate::error::{ChartError, ChartResult};

/// Affine map between a numeric domain and the unit interval.
///
/// Pixel-facing scales compose this with a pane extent; the inverse exists for
/// every finite input because the domain span is never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Position of `value` inside the domain; 0 at the start, 1 at the end.
    pub fn normalize(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        Ok((value - self.domain_start) / (self.domain_end - self.domain_start))
    }

    pub fn denormalize(self, ratio: f64) -> ChartResult<f64> {
        if !ratio.is_finite() {
            return Err(ChartError::InvalidData("ratio must be finite".to_owned()));
        }
        Ok(self.domain_start + ratio * (self.domain_end - self.domain_start))
    }

    /// Maps `value` onto `[0, extent_px]`.
    pub fn domain_to_pixel(self, value: f64, extent_px: f64) -> ChartResult<f64> {
        validate_extent(extent_px)?;
        Ok(self.normalize(value)? * extent_px)
    }

    pub fn pixel_to_domain(self, pixel: f64, extent_px: f64) -> ChartResult<f64> {
        validate_extent(extent_px)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        self.denormalize(pixel / extent_px)
    }
}

fn validate_extent(extent_px: f64) -> ChartResult<()> {
    if !extent_px.is_finite() || extent_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "pixel extent must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
