//! Multiple-testing correction for Sharpe ratios.
//!
//! When a strategy is the best of `num_trials` backtested variants, part of
//! its observed Sharpe ratio is selection luck. The expected maximum Sharpe
//! ratio across that many independent trials has a closed-form extreme-value
//! approximation; subtracting it from the nominal Sharpe gives a "haircut"
//! estimate of skill that survives the multiple-testing correction.

use statrs::distribution::{ContinuousCDF, Normal};

/// Euler-Mascheroni constant, the weight in the extreme-value approximation.
pub const EULER_MASCHERONI: f64 = 0.577_215_664_9;

/// Expected maximum Sharpe ratio across `num_trials` independent trials
/// drawn from a population with Sharpe mean `mu` and standard deviation
/// `sigma`.
///
/// With a single trial (or fewer) there is no selection effect and the
/// result is exactly `mu`. For `num_trials >= 2` the standard-normal
/// quantile function is evaluated strictly inside `(0, 1)`, so the formula
/// is total over its domain.
///
/// # Example
///
/// ```
/// use ronda_eval::expected_max_sharpe;
///
/// let e_max = expected_max_sharpe(0.0, 1.0, 5);
/// assert!(e_max > 1.0 && e_max < 1.5);
/// ```
#[must_use]
pub fn expected_max_sharpe(mu: f64, sigma: f64, num_trials: i64) -> f64 {
    if num_trials <= 1 {
        return mu;
    }
    let n = num_trials as f64;
    let normal = Normal::new(0.0, 1.0).unwrap();
    let max_z = (1.0 - EULER_MASCHERONI) * normal.inverse_cdf(1.0 - 1.0 / n)
        + EULER_MASCHERONI * normal.inverse_cdf(1.0 - 1.0 / (n * std::f64::consts::E));
    mu + sigma * max_z
}

/// Nominal Sharpe ratio minus the expected maximum under `num_trials`
/// trials, floored at zero.
///
/// The floor means the correction can erase apparent skill but never report
/// negative skill.
#[must_use]
pub fn haircut_sharpe(nominal_sharpe: f64, mu: f64, sigma: f64, num_trials: i64) -> f64 {
    (nominal_sharpe - expected_max_sharpe(mu, sigma, num_trials)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Reference values computed with an independent standard-normal
    // quantile implementation (Python statistics.NormalDist).
    const MAX_Z_5: f64 = 1.192_594_001_0;

    #[test]
    fn test_single_trial_collapses_to_mu() {
        assert_relative_eq!(expected_max_sharpe(0.7, 1.0, 1), 0.7);
        assert_relative_eq!(expected_max_sharpe(0.7, 3.0, 0), 0.7);
        assert_relative_eq!(expected_max_sharpe(-0.2, 5.0, -3), -0.2);
    }

    #[test]
    fn test_five_trials_reference_value() {
        assert_relative_eq!(
            expected_max_sharpe(0.0, 1.0, 5),
            MAX_Z_5,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_known_trial_counts() {
        assert_relative_eq!(expected_max_sharpe(0.0, 1.0, 2), 0.519_755_344_3, epsilon = 1e-6);
        assert_relative_eq!(expected_max_sharpe(0.0, 1.0, 10), 1.574_598_301_3, epsilon = 1e-6);
        assert_relative_eq!(
            expected_max_sharpe(0.0, 1.0, 100),
            2.530_602_893_2,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_monotone_in_trials() {
        let mut previous = expected_max_sharpe(0.0, 1.0, 2);
        for trials in [3, 5, 10, 50, 250, 1000] {
            let current = expected_max_sharpe(0.0, 1.0, trials);
            assert!(current > previous, "not increasing at {trials} trials");
            previous = current;
        }
    }

    #[test]
    fn test_monotone_in_sigma() {
        // max_z is strictly positive past one trial, so more dispersion
        // means a larger expected maximum.
        assert!(expected_max_sharpe(0.1, 2.0, 10) > expected_max_sharpe(0.1, 0.5, 10));
    }

    #[test]
    fn test_mu_sigma_affine() {
        let base = expected_max_sharpe(0.0, 1.0, 5);
        assert_relative_eq!(expected_max_sharpe(0.3, 2.0, 5), 0.3 + 2.0 * base, epsilon = 1e-12);
    }

    #[test]
    fn test_haircut_reference_value() {
        assert_relative_eq!(
            haircut_sharpe(1.95, 0.0, 1.0, 5),
            1.95 - MAX_Z_5,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_haircut_floored_at_zero() {
        assert_relative_eq!(haircut_sharpe(0.5, 0.0, 1.0, 100), 0.0);
        for trials in [1, 2, 5, 50] {
            assert!(haircut_sharpe(-1.0, 0.0, 1.0, trials) >= 0.0);
        }
    }
}
