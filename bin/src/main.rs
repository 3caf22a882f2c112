//! Ronda CLI binary.
//!
//! Command-line interface for the Ronda pairs-trading toolkit.

mod cmd;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Pairs-trading research toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the distance-approach workflow end to end
    Run {
        /// Price CSV: a `date` column plus one column per symbol
        #[arg(long)]
        data: PathBuf,

        /// Optional `symbol,sector` CSV for the industry method
        #[arg(long)]
        sectors: Option<PathBuf>,

        /// Split date (YYYY-MM-DD): formation before, trading from here
        #[arg(long)]
        split: String,

        /// Formation methods to run
        #[arg(
            short,
            long,
            value_delimiter = ',',
            default_value = "basic,industry,zero-crossing,variance"
        )]
        methods: Vec<String>,

        /// Number of pairs to select per method
        #[arg(long, default_value = "20")]
        num_top: usize,

        /// Entry threshold in formation-spread standard deviations
        #[arg(short, long, default_value = "2.0")]
        divergence: f64,

        /// Output directory for equity-curve CSVs
        #[arg(short, long, default_value = "distance_approach_results")]
        out: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print a forensic strategy report
    Report {
        /// Number of strategy variants tried (selection-bias correction)
        #[arg(short, long, default_value = "1")]
        trials: i64,

        /// Account size in dollars
        #[arg(long, default_value = "5000")]
        account_size: f64,

        /// Fraction of the account risked per trade
        #[arg(long, default_value = "0.01")]
        risk_fraction: f64,

        /// Round-trip commission per trade, in dollars
        #[arg(long, default_value = "1.0")]
        commission: f64,

        /// Strategy name for the report header
        #[arg(long, default_value = "MES Mean Reversion")]
        strategy_name: String,

        /// JSON file of externally computed pipeline metrics; the bundled
        /// example set is used when omitted
        #[arg(long)]
        metrics: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List strategy engines and probe availability
    Providers {
        /// Probe a specific engine by name
        #[arg(short, long)]
        probe: Option<String>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            sectors,
            split,
            methods,
            num_top,
            divergence,
            out,
            format,
        } => {
            cmd::run::run_workflow(&cmd::run::RunArgs {
                data,
                sectors,
                split,
                methods,
                num_top,
                divergence,
                out,
                format,
            })?;
        }
        Commands::Report {
            trials,
            account_size,
            risk_fraction,
            commission,
            strategy_name,
            metrics,
            format,
        } => {
            cmd::report::print_report(
                trials,
                account_size,
                risk_fraction,
                commission,
                &strategy_name,
                metrics.as_deref(),
                &format,
            )?;
        }
        Commands::Providers { probe } => {
            cmd::providers::list_providers(probe.as_deref());
        }
    }

    Ok(())
}
