//! Pair strategy trait for formation and signal generation.
//!
//! This module defines the [`PairStrategy`] trait, the seam between the
//! workflow layer and a pairs-trading engine. A strategy is driven in two
//! phases: formation over a historical window, then signal generation over a
//! subsequent trading window. Accessors for phase outputs fail with a typed
//! error until the corresponding phase has run.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::{FormationConfig, Pair, PriceTable, SignalTable};

/// A stateful pairs-trading engine.
///
/// Implementations select tradable pairs from a formation window and emit
/// per-pair position signals over a trading window. Implementations must be
/// thread-safe (`Send + Sync`) so registries can hand them across threads.
///
/// # Phases
///
/// 1. [`form_pairs`](Self::form_pairs) fits the engine on formation prices.
/// 2. [`trade_pairs`](Self::trade_pairs) generates signals on trading prices
///    using only formation-window statistics (no look-ahead).
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{FormationConfig, PairStrategy, PriceTable};
///
/// fn run(strategy: &mut dyn PairStrategy, formation: &PriceTable, trading: &PriceTable)
///     -> ronda_traits::Result<()>
/// {
///     strategy.form_pairs(formation, &FormationConfig::default())?;
///     println!("selected {} pairs", strategy.pairs().len());
///     strategy.trade_pairs(trading, 2.0)?;
///     let signals = strategy.signals()?;
///     println!("net signal: {}", signals.total_signal());
///     Ok(())
/// }
/// ```
pub trait PairStrategy: Send + Sync {
    /// Returns the name of this strategy engine.
    fn name(&self) -> &str;

    /// Selects pairs from a formation-window price table.
    ///
    /// Replaces any previously formed pairs and clears previously generated
    /// signals.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has fewer than two symbols, fewer rows
    /// than `config.min_observations`, or no candidate pairs survive the
    /// configured restrictions.
    fn form_pairs(&mut self, prices: &PriceTable, config: &FormationConfig) -> Result<()>;

    /// Selected pairs in ranking order. Empty before formation has run.
    fn pairs(&self) -> &[Pair];

    /// Formation-window zero-crossing counts for the selected pairs.
    ///
    /// Empty before formation has run.
    fn num_crossings(&self) -> &BTreeMap<Pair, usize>;

    /// Generates position signals over a trading-window price table.
    ///
    /// `divergence` is the entry threshold in formation-spread standard
    /// deviations.
    ///
    /// # Errors
    ///
    /// Returns `PairsNotFormed` if called before [`form_pairs`](Self::form_pairs),
    /// or a data error if a selected symbol is missing from the table.
    fn trade_pairs(&mut self, prices: &PriceTable, divergence: f64) -> Result<()>;

    /// The generated signal table.
    ///
    /// # Errors
    ///
    /// Returns `SignalsNotReady` if called before
    /// [`trade_pairs`](Self::trade_pairs).
    fn signals(&self) -> Result<&SignalTable>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RondaError;
    use crate::types::Date;

    #[derive(Default)]
    struct FixedStrategy {
        pairs: Vec<Pair>,
        crossings: BTreeMap<Pair, usize>,
        signals: Option<SignalTable>,
    }

    impl PairStrategy for FixedStrategy {
        fn name(&self) -> &str {
            "fixed"
        }

        fn form_pairs(&mut self, _prices: &PriceTable, config: &FormationConfig) -> Result<()> {
            let pair = Pair::new("AAA", "BBB");
            self.crossings.insert(pair.clone(), 4);
            self.pairs = vec![pair];
            self.pairs.truncate(config.num_top);
            self.signals = None;
            Ok(())
        }

        fn pairs(&self) -> &[Pair] {
            &self.pairs
        }

        fn num_crossings(&self) -> &BTreeMap<Pair, usize> {
            &self.crossings
        }

        fn trade_pairs(&mut self, _prices: &PriceTable, _divergence: f64) -> Result<()> {
            let dates = vec![Date::from_ymd_opt(2024, 1, 2).unwrap()];
            self.signals = Some(SignalTable::new(dates, self.pairs.clone(), vec![vec![1]])?);
            Ok(())
        }

        fn signals(&self) -> Result<&SignalTable> {
            self.signals
                .as_ref()
                .ok_or_else(|| RondaError::SignalsNotReady("trade_pairs has not run".into()))
        }
    }

    fn empty_table() -> PriceTable {
        PriceTable::new(polars::prelude::DataFrame::default())
    }

    #[test]
    fn test_phase_ordering() {
        let mut strategy = FixedStrategy::default();
        assert!(strategy.signals().is_err());

        strategy
            .form_pairs(&empty_table(), &FormationConfig::default())
            .unwrap();
        assert_eq!(strategy.pairs().len(), 1);
        assert_eq!(strategy.num_crossings()[&Pair::new("AAA", "BBB")], 4);

        strategy.trade_pairs(&empty_table(), 2.0).unwrap();
        assert_eq!(strategy.signals().unwrap().total_signal(), 1);
    }

    #[test]
    fn test_strategy_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PairStrategy>();
        let _boxed: Option<Box<dyn PairStrategy>> = None;
    }
}
