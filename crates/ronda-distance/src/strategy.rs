//! The distance engine behind the [`PairStrategy`] seam.

use std::collections::BTreeMap;

use ronda_traits::{
    Capability, FormationConfig, Pair, PairStrategy, PriceTable, Result, RondaError, SignalTable,
    StrategyProvider,
};

use crate::formation::{FormedPair, form_pairs};
use crate::trading::generate_signals;

/// Registry name of the distance engine.
pub const ENGINE_NAME: &str = "distance";

/// Stateful distance-approach engine.
///
/// Formation artifacts (selected pairs, spread statistics, normalization
/// parameters) are retained between phases so the trading window is scored
/// on formation-window scales only.
#[derive(Debug, Default)]
pub struct DistanceStrategy {
    formed: Vec<FormedPair>,
    pairs: Vec<Pair>,
    crossings: BTreeMap<Pair, usize>,
    signals: Option<SignalTable>,
}

impl DistanceStrategy {
    /// Creates an engine with no formed pairs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Formation artifacts for the selected pairs, in ranking order.
    #[must_use]
    pub fn formed_pairs(&self) -> &[FormedPair] {
        &self.formed
    }
}

impl PairStrategy for DistanceStrategy {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    fn form_pairs(&mut self, prices: &PriceTable, config: &FormationConfig) -> Result<()> {
        let dense = prices.to_dense()?;
        let formed = form_pairs(&dense, config)?;

        self.pairs = formed.iter().map(|fp| fp.pair.clone()).collect();
        self.crossings = formed
            .iter()
            .map(|fp| (fp.pair.clone(), fp.crossings))
            .collect();
        self.formed = formed;
        self.signals = None;
        Ok(())
    }

    fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    fn num_crossings(&self) -> &BTreeMap<Pair, usize> {
        &self.crossings
    }

    fn trade_pairs(&mut self, prices: &PriceTable, divergence: f64) -> Result<()> {
        if self.formed.is_empty() {
            return Err(RondaError::PairsNotFormed(
                "form_pairs must run before trade_pairs".to_string(),
            ));
        }
        let dense = prices.to_dense()?;
        self.signals = Some(generate_signals(&dense, &self.formed, divergence)?);
        Ok(())
    }

    fn signals(&self) -> Result<&SignalTable> {
        self.signals.as_ref().ok_or_else(|| {
            RondaError::SignalsNotReady("trade_pairs has not run".to_string())
        })
    }
}

/// Provider registering the distance engine under [`ENGINE_NAME`].
#[derive(Debug, Default)]
pub struct DistanceProvider;

impl StrategyProvider for DistanceProvider {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    fn description(&self) -> &str {
        "distance approach: SSD pair formation with divergence/zero-crossing trading"
    }

    fn create(&self) -> Box<dyn PairStrategy> {
        Box::new(DistanceStrategy::new())
    }
}

/// Probes a registry for the distance engine.
#[must_use]
pub fn probe(registry: &ronda_traits::ProviderRegistry) -> Capability<Box<dyn PairStrategy>> {
    registry.probe(ENGINE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use ronda_traits::{FormationMethod, ProviderRegistry};
    use std::sync::Arc;

    fn table(dates: &[&str], x: &[f64], y: &[f64], z: &[f64]) -> PriceTable {
        let frame = df! {
            "date" => dates.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            "X" => x.to_vec(),
            "Y" => y.to_vec(),
            "Z" => z.to_vec(),
        }
        .unwrap();
        PriceTable::new(frame)
    }

    fn formation_table() -> PriceTable {
        table(
            &[
                "2024-01-01",
                "2024-01-02",
                "2024-01-03",
                "2024-01-04",
                "2024-01-05",
            ],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[2.0, 4.0, 6.0, 8.0, 10.0],
            &[5.0, 4.0, 3.0, 2.0, 1.0],
        )
    }

    fn trading_table() -> PriceTable {
        table(
            &[
                "2024-02-01",
                "2024-02-02",
                "2024-02-03",
                "2024-02-04",
                "2024-02-05",
            ],
            &[1.0, 5.0, 1.0, 5.0, 1.0],
            &[10.0, 2.0, 10.0, 2.0, 10.0],
            &[3.0, 3.0, 3.0, 3.0, 3.0],
        )
    }

    fn config() -> FormationConfig {
        FormationConfig {
            method: FormationMethod::Standard,
            num_top: 2,
            candidate_pool: None,
            sectors: None,
            min_observations: 5,
        }
    }

    #[test]
    fn test_two_phase_workflow() {
        let mut strategy = DistanceStrategy::new();
        strategy.form_pairs(&formation_table(), &config()).unwrap();

        assert_eq!(strategy.pairs().len(), 2);
        assert_eq!(strategy.pairs()[0], Pair::new("X", "Y"));
        assert!(strategy.num_crossings().contains_key(&Pair::new("X", "Y")));

        strategy.trade_pairs(&trading_table(), 2.0).unwrap();
        let signals = strategy.signals().unwrap();
        assert_eq!(signals.height(), 5);
        assert_eq!(signals.pairs(), strategy.pairs());
    }

    #[test]
    fn test_trade_before_form_fails() {
        let mut strategy = DistanceStrategy::new();
        assert!(matches!(
            strategy.trade_pairs(&trading_table(), 2.0),
            Err(RondaError::PairsNotFormed(_))
        ));
    }

    #[test]
    fn test_signals_cleared_on_reform() {
        let mut strategy = DistanceStrategy::new();
        strategy.form_pairs(&formation_table(), &config()).unwrap();
        strategy.trade_pairs(&trading_table(), 2.0).unwrap();
        assert!(strategy.signals().is_ok());

        strategy.form_pairs(&formation_table(), &config()).unwrap();
        assert!(matches!(
            strategy.signals(),
            Err(RondaError::SignalsNotReady(_))
        ));
    }

    #[test]
    fn test_provider_round_trip() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(DistanceProvider));

        let capability = probe(&registry);
        assert!(capability.is_available());
        let strategy = capability.ok().unwrap();
        assert_eq!(strategy.name(), ENGINE_NAME);
    }
}
