//! Statistical utility functions shared across the framework.
//!
//! This module provides the price-normalization and dispersion helpers used
//! by pair formation and signal generation: min-max scaling with reusable
//! parameters, sample moments, and zero-crossing counts.

use serde::{Deserialize, Serialize};

/// Minimum threshold for a scale denominator to avoid division by zero.
/// Ranges and standard deviations below this threshold are treated as zero.
pub const MIN_SCALE_THRESHOLD: f64 = 1e-10;

/// Min-max scaling parameters fitted on a formation window.
///
/// The parameters are fitted once on formation prices and re-applied to
/// trading prices, so both windows share the same normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleParams {
    /// Minimum of the fitted window.
    pub min: f64,
    /// Maximum of the fitted window.
    pub max: f64,
}

impl ScaleParams {
    /// Whether the fitted window had usable dispersion.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        (self.max - self.min).abs() <= MIN_SCALE_THRESHOLD
    }

    /// Applies the fitted scaling to a slice of values.
    ///
    /// Degenerate parameters (constant fitted window) map everything to zero
    /// rather than dividing by a near-zero range.
    #[must_use]
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        if self.is_degenerate() {
            return vec![0.0; values.len()];
        }
        let range = self.max - self.min;
        values.iter().map(|v| (v - self.min) / range).collect()
    }
}

/// Min-max scales a slice to `[0, 1]` and returns the fitted parameters.
///
/// # Edge Cases
///
/// - Empty input: returns an empty vector with `min = max = NaN`.
/// - Constant input: returns zeros with degenerate parameters.
#[must_use]
pub fn min_max_scale(values: &[f64]) -> (Vec<f64>, ScaleParams) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    if values.is_empty() {
        return (
            Vec::new(),
            ScaleParams {
                min: f64::NAN,
                max: f64::NAN,
            },
        );
    }

    let params = ScaleParams { min, max };
    (params.apply(values), params)
}

/// Sample mean of a slice. Returns NaN for empty input.
#[must_use]
pub fn sample_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation with Bessel's correction (N-1 denominator).
///
/// Returns 0.0 for inputs with fewer than two observations.
#[must_use]
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = sample_mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Counts strict sign changes in a series.
///
/// Exact zeros carry no sign and are skipped, so a series touching zero
/// without changing side does not count as a crossing.
#[must_use]
pub fn zero_crossings(values: &[f64]) -> usize {
    let mut crossings = 0;
    let mut last_sign = 0i8;
    for &v in values {
        let sign = if v > 0.0 {
            1
        } else if v < 0.0 {
            -1
        } else {
            0
        };
        if sign != 0 {
            if last_sign != 0 && sign != last_sign {
                crossings += 1;
            }
            last_sign = sign;
        }
    }
    crossings
}
