//! Pair formation over a historical price window.
//!
//! Formation min-max normalizes each symbol's price series, ranks all
//! candidate pairs by the sum of squared deviations (SSD) between the
//! normalized series, then selects pairs according to the configured
//! [`FormationMethod`]. The zero-crossing and variance methods re-rank
//! within a pool of the smallest-SSD candidates, following the idea that a
//! good pair must first be close before oscillation or dispersion can be
//! traded.

use ndarray::Array2;
use ronda_traits::stats::{ScaleParams, min_max_scale, sample_std, zero_crossings};
use ronda_traits::types::DensePrices;
use ronda_traits::{FormationConfig, FormationMethod, Pair, Result, RondaError};

/// A pair selected during formation, with the artifacts needed for trading.
#[derive(Debug, Clone)]
pub struct FormedPair {
    /// The selected pair, legs in symbol-table order.
    pub pair: Pair,
    /// Sum of squared deviations between the normalized formation series.
    pub ssd: f64,
    /// Standard deviation of the formation spread. Trading thresholds are
    /// multiples of this value.
    pub spread_std: f64,
    /// Zero crossings of the formation spread.
    pub crossings: usize,
    /// Min-max parameters fitted on the first leg's formation series.
    pub scale_first: ScaleParams,
    /// Min-max parameters fitted on the second leg's formation series.
    pub scale_second: ScaleParams,
}

/// Candidate pair during ranking, before selection.
struct Candidate {
    first: usize,
    second: usize,
    ssd: f64,
}

/// Selects pairs from a dense formation-price matrix.
///
/// # Errors
///
/// - `InsufficientData` if there are fewer than two symbols or fewer rows
///   than `config.min_observations`.
/// - `InsufficientData` if no candidate pair survives the sector
///   restriction.
pub fn form_pairs(prices: &DensePrices, config: &FormationConfig) -> Result<Vec<FormedPair>> {
    let n_rows = prices.dates.len();
    let n_symbols = prices.symbols.len();

    if n_symbols < 2 {
        return Err(RondaError::InsufficientData(format!(
            "pair formation needs at least 2 symbols, got {n_symbols}"
        )));
    }
    if n_rows < config.min_observations {
        return Err(RondaError::InsufficientData(format!(
            "pair formation needs at least {} observations, got {n_rows}",
            config.min_observations
        )));
    }

    // Normalize every symbol once; parameters are reused on the trading window.
    let mut normalized = Array2::<f64>::zeros((n_rows, n_symbols));
    let mut params = Vec::with_capacity(n_symbols);
    for col in 0..n_symbols {
        let series = prices.values.column(col).to_vec();
        let (scaled, p) = min_max_scale(&series);
        for (row, v) in scaled.into_iter().enumerate() {
            normalized[(row, col)] = v;
        }
        params.push(p);
    }

    let mut candidates = Vec::new();
    for i in 0..n_symbols {
        for j in (i + 1)..n_symbols {
            if let Some(sectors) = &config.sectors {
                let sector_i = sectors.get(&prices.symbols[i]);
                let sector_j = sectors.get(&prices.symbols[j]);
                match (sector_i, sector_j) {
                    (Some(a), Some(b)) if a == b => {}
                    _ => continue,
                }
            }

            let ssd: f64 = (0..n_rows)
                .map(|row| {
                    let d = normalized[(row, i)] - normalized[(row, j)];
                    d * d
                })
                .sum();
            candidates.push(Candidate {
                first: i,
                second: j,
                ssd,
            });
        }
    }

    if candidates.is_empty() {
        return Err(RondaError::InsufficientData(
            "no candidate pairs survive the formation restrictions".to_string(),
        ));
    }

    // Ascending SSD, ties broken by symbol order for determinism.
    candidates.sort_by(|a, b| {
        a.ssd
            .partial_cmp(&b.ssd)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| (a.first, a.second).cmp(&(b.first, b.second)))
    });

    let pool = config.pool_size(candidates.len());
    let selected: Vec<&Candidate> = match config.method {
        FormationMethod::Standard => candidates.iter().take(config.num_top).collect(),
        FormationMethod::ZeroCrossing => {
            let mut ranked: Vec<(&Candidate, usize)> = candidates[..pool]
                .iter()
                .map(|c| {
                    let spread = spread_series(&normalized, c.first, c.second);
                    (c, zero_crossings(&spread))
                })
                .collect();
            ranked.sort_by(|a, b| {
                b.1.cmp(&a.1).then_with(|| {
                    a.0.ssd
                        .partial_cmp(&b.0.ssd)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
            });
            ranked
                .into_iter()
                .take(config.num_top)
                .map(|(c, _)| c)
                .collect()
        }
        FormationMethod::Variance => {
            let mut ranked: Vec<(&Candidate, f64)> = candidates[..pool]
                .iter()
                .map(|c| {
                    let spread = spread_series(&normalized, c.first, c.second);
                    let std = sample_std(&spread);
                    (c, std * std)
                })
                .collect();
            ranked.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| {
                        a.0.ssd
                            .partial_cmp(&b.0.ssd)
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
            });
            ranked
                .into_iter()
                .take(config.num_top)
                .map(|(c, _)| c)
                .collect()
        }
    };

    Ok(selected
        .into_iter()
        .map(|c| {
            let spread = spread_series(&normalized, c.first, c.second);
            FormedPair {
                pair: Pair::new(
                    prices.symbols[c.first].clone(),
                    prices.symbols[c.second].clone(),
                ),
                ssd: c.ssd,
                spread_std: sample_std(&spread),
                crossings: zero_crossings(&spread),
                scale_first: params[c.first],
                scale_second: params[c.second],
            }
        })
        .collect())
}

fn spread_series(normalized: &Array2<f64>, first: usize, second: usize) -> Vec<f64> {
    (0..normalized.nrows())
        .map(|row| normalized[(row, first)] - normalized[(row, second)])
        .collect()
}
