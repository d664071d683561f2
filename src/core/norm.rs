use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Linear normalization of data values onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Default for Normalize {
    fn default() -> Self {
        Self {
            vmin: 0.0,
            vmax: 1.0,
        }
    }
}

impl Normalize {
    /// Builds explicit limits. Limits must be finite and `vmin <= vmax`.
    pub fn new(vmin: f64, vmax: f64) -> ChartResult<Self> {
        let norm = Self { vmin, vmax };
        norm.validate()?;
        Ok(norm)
    }

    /// Scales limits to the finite range of `values`, falling back to `(0, 1)`
    /// when no finite sample exists.
    #[must_use]
    pub fn autoscale(values: &[f64]) -> Self {
        values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(None, |range: Option<(f64, f64)>, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
            .map_or_else(Self::default, |(vmin, vmax)| Self { vmin, vmax })
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.vmin.is_finite() || !self.vmax.is_finite() {
            return Err(ChartError::InvalidData(
                "normalization limits must be finite".to_owned(),
            ));
        }
        if self.vmin > self.vmax {
            return Err(ChartError::InvalidData(format!(
                "normalization vmin ({}) must be <= vmax ({})",
                self.vmin, self.vmax
            )));
        }
        Ok(())
    }

    /// Maps `value` linearly; results outside `[0, 1]` are left unclipped.
    ///
    /// Equal limits map every value to `0.0`.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        let half_span = self.vmax * 0.5 - self.vmin * 0.5;
        if half_span == 0.0 {
            return 0.0;
        }
        (value * 0.5 - self.vmin * 0.5) / half_span
    }

    /// Inverse of [`Normalize::normalize`].
    #[must_use]
    pub fn denormalize(self, t: f64) -> f64 {
        self.vmin * (1.0 - t) + self.vmax * t
    }

    /// Limits widened so they never collapse onto one value.
    ///
    /// Equal limits grow by 10% of their magnitude on both sides; around zero
    /// they become `(-0.1, 0.1)`.
    #[must_use]
    pub fn nonsingular(self) -> (f64, f64) {
        const EXPANDER: f64 = 0.1;
        if self.vmin < self.vmax {
            return (self.vmin, self.vmax);
        }
        let value = self.vmin;
        if value == 0.0 {
            return (-EXPANDER, EXPANDER);
        }
        (value - EXPANDER * value.abs(), value + EXPANDER * value.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::Normalize;

    #[test]
    fn autoscale_uses_finite_extremes() {
        let norm = Normalize::autoscale(&[3.0, f64::NAN, -1.0, 7.0]);
        assert_eq!(norm, Normalize::new(-1.0, 7.0).expect("norm"));
        assert_eq!(norm.normalize(3.0), 0.5);
        assert_eq!(norm.denormalize(0.25), 1.0);
    }

    #[test]
    fn autoscale_without_finite_samples_falls_back_to_unit_range() {
        assert_eq!(Normalize::autoscale(&[f64::NAN]), Normalize::default());
    }

    #[test]
    fn reversed_limits_are_rejected() {
        assert!(Normalize::new(2.0, 1.0).is_err());
        assert!(Normalize::new(f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn nonsingular_expands_equal_limits() {
        assert_eq!(Normalize::new(0.0, 0.0).expect("norm").nonsingular(), (-0.1, 0.1));
        assert_eq!(Normalize::new(-5.0, -5.0).expect("norm").nonsingular(), (-5.5, -4.5));
        assert_eq!(Normalize::new(1.0, 2.0).expect("norm").nonsingular(), (1.0, 2.0));
    }
}
