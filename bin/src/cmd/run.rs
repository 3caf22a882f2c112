//! End-to-end distance-approach workflow command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use ronda::data::{load_price_table, load_sector_map, split_price_table, write_equity_curves};
use ronda::distance::ENGINE_NAME;
use ronda::eval::{PerformanceSummary, portfolio_returns};
use ronda::{FormationConfig, FormationMethod, PairStrategy, SectorMap, default_registry};

/// Arguments for the `run` subcommand.
pub(crate) struct RunArgs {
    pub(crate) data: PathBuf,
    pub(crate) sectors: Option<PathBuf>,
    pub(crate) split: String,
    pub(crate) methods: Vec<String>,
    pub(crate) num_top: usize,
    pub(crate) divergence: f64,
    pub(crate) out: PathBuf,
    pub(crate) format: String,
}

/// A formation method as selected on the command line.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Method {
    Basic,
    Industry,
    ZeroCrossing,
    Variance,
}

impl Method {
    fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "basic" | "standard" => Ok(Self::Basic),
            "industry" => Ok(Self::Industry),
            "zero-crossing" | "zero_crossing" => Ok(Self::ZeroCrossing),
            "variance" => Ok(Self::Variance),
            other => bail!(
                "unknown method '{other}' (expected basic, industry, zero-crossing, or variance)"
            ),
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic Method",
            Self::Industry => "Industry Method",
            Self::ZeroCrossing => "Zero Crossings Method",
            Self::Variance => "Variance Method",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Industry => "industry",
            Self::ZeroCrossing => "zero_crossing",
            Self::Variance => "variance",
        }
    }

    fn config(self, num_top: usize, sectors: Option<&SectorMap>) -> FormationConfig {
        let method = match self {
            Self::Basic | Self::Industry => FormationMethod::Standard,
            Self::ZeroCrossing => FormationMethod::ZeroCrossing,
            Self::Variance => FormationMethod::Variance,
        };
        // Only the basic method ranks across the whole universe; industry,
        // zero-crossing, and variance all restrict candidates to same-sector
        // pairs when a sector map is supplied.
        let sectors = match self {
            Self::Basic => None,
            Self::Industry | Self::ZeroCrossing | Self::Variance => sectors.cloned(),
        };
        FormationConfig {
            method,
            num_top,
            sectors,
            ..FormationConfig::default()
        }
    }
}


fn banner(text: bool, title: &str) {
    if text {
        println!("\n{}", "=".repeat(70));
        println!("{title}");
        println!("{}", "=".repeat(70));
    }
}

/// Runs formation, signal generation, return calculation, output, and
/// summary for every requested method.
pub(crate) fn run_workflow(args: &RunArgs) -> Result<()> {
    let text = match args.format.as_str() {
        "text" => true,
        "json" => false,
        other => bail!("unknown format '{other}' (expected text or json)"),
    };

    let methods = args
        .methods
        .iter()
        .map(|m| Method::parse(m))
        .collect::<Result<Vec<_>>>()?;

    let sectors = match &args.sectors {
        Some(path) => Some(
            load_sector_map(path)
                .with_context(|| format!("loading sector map {}", path.display()))?,
        ),
        None => None,
    };
    if methods.contains(&Method::Industry) && sectors.is_none() {
        bail!("the industry method needs a sector map; pass --sectors");
    }

    // Step 1: load and split data.
    banner(text, "STEP 1: Load Price Data");
    let prices = load_price_table(&args.data)
        .with_context(|| format!("loading price table {}", args.data.display()))?;
    let split_date = NaiveDate::parse_from_str(&args.split, "%Y-%m-%d")
        .with_context(|| format!("parsing split date '{}'", args.split))?;
    let (formation, trading) = split_price_table(&prices, split_date)?;
    if text {
        println!("Loaded {} symbols, {} rows", prices.symbols().len(), prices.len());
        println!(
            "Formation window: {} rows | Trading window: {} rows (split {split_date})",
            formation.len(),
            trading.len()
        );
    }

    // Step 2: pair formation.
    banner(text, "STEP 2: Pair Formation");
    let registry = default_registry();
    let mut strategies: Vec<(Method, Box<dyn PairStrategy>)> = Vec::with_capacity(methods.len());
    for &method in &methods {
        let mut strategy = registry.probe(ENGINE_NAME).ok()?;
        let config = method.config(args.num_top, sectors.as_ref());
        strategy.form_pairs(&formation, &config)?;
        if text {
            let preview: Vec<String> = strategy
                .pairs()
                .iter()
                .take(3)
                .map(ToString::to_string)
                .collect();
            println!(
                "{:<22} {} pairs, top: {}",
                method.label(),
                strategy.pairs().len(),
                preview.join(" ")
            );
        }
        strategies.push((method, strategy));
    }

    // Step 3: signal generation.
    banner(text, "STEP 3: Trading Signal Generation");
    if text {
        println!("Threshold: {} standard deviations\n", args.divergence);
    }
    for (method, strategy) in &mut strategies {
        strategy.trade_pairs(&trading, args.divergence)?;
        if text {
            let signals = strategy.signals()?;
            println!(
                "{:<22} {} pairs, {} total signals",
                method.label(),
                signals.pairs().len(),
                signals.total_signal()
            );
        }
    }

    // Step 4: portfolio returns.
    banner(text, "STEP 4: Calculate Portfolio Returns");
    let trading_dense = trading.to_dense()?;
    let mut curves = Vec::with_capacity(strategies.len());
    for (method, strategy) in &strategies {
        let portfolio = portfolio_returns(&trading_dense, strategy.signals()?)?;
        if text {
            println!(
                "{:<22} Final Return: {:.4}",
                method.label(),
                portfolio.final_return()
            );
        }
        curves.push((method.key().to_string(), portfolio));
    }

    // Step 5: write equity curves.
    banner(text, "STEP 5: Write Results");
    let (comparison, individual) = write_equity_curves(&args.out, &curves)?;
    if text {
        println!("Curves saved: {}", comparison.display());
        println!("Curves saved: {}", individual.display());
    }

    // Step 6: summary statistics.
    banner(text, "STEP 6: Summary Statistics");
    let summaries: Vec<(Method, PerformanceSummary)> = strategies
        .iter()
        .zip(&curves)
        .map(|((method, _), (_, portfolio))| (*method, portfolio.summary()))
        .collect();

    if text {
        println!(
            "\n{:<22} {:>14} {:>14} {:>14} {:>10}",
            "Method", "Final Return", "Max Drawdown", "Sharpe Ratio", "Win Rate"
        );
        println!("{}", "-".repeat(78));
        for (method, summary) in &summaries {
            println!(
                "{:<22} {:>13.2}% {:>13.2}% {:>14.2} {:>9.1}%",
                method.label(),
                summary.final_return * 100.0,
                summary.max_drawdown * 100.0,
                summary.sharpe_ratio,
                summary.win_rate * 100.0
            );
        }
        println!("{}", "=".repeat(70));
    } else {
        let mut doc = serde_json::Map::new();
        for ((method, summary), (_, portfolio)) in summaries.iter().zip(&curves) {
            doc.insert(
                method.key().to_string(),
                serde_json::json!({
                    "final_return": summary.final_return,
                    "max_drawdown": summary.max_drawdown,
                    "sharpe_ratio": summary.sharpe_ratio,
                    "win_rate": summary.win_rate,
                    "pairs": portfolio.pairs.len(),
                }),
            );
        }
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }

    Ok(())
}
