use crate::error::{ChartError, ChartResult};

/// Linear mapping from a data domain onto a pixel span.
///
/// Used to place image cells inside an axes. The span start may be greater
/// than the span end, which flips the direction (data `y` grows upwards while
/// pixel rows grow downwards).
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

    pub fn domain_to_pixel(self, value: f64, span_start: f64, span_end: f64) -> ChartResult<f64> {
        validate_span(span_start, span_end)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(span_start + normalized * (span_end - span_start))
    }

    pub fn pixel_to_domain(self, pixel: f64, span_start: f64, span_end: f64) -> ChartResult<f64> {
        validate_span(span_start, span_end)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - span_start) / (span_end - span_start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

fn validate_span(span_start: f64, span_end: f64) -> ChartResult<()> {
    if !span_start.is_finite() || !span_end.is_finite() || span_start == span_end {
        return Err(ChartError::InvalidData(
            "pixel span must be finite and non-zero".to_owned(),
        ));
    }
    Ok(())
}
