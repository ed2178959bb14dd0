//! ticklab CLI — run backtests and generate synthetic market data.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config file or inline flags,
//!   over a CSV file or a generated random walk; writes a Markdown report
//!   and an equity-curve CSV per run
//! - `synth` — write a seeded random-walk CSV for later runs

use anyhow::{bail, Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use ticklab_core::domain::PriceSeries;
use ticklab_runner::config::{RunConfig, StrategyConfig};
use ticklab_runner::data_loader::load_market_data;
use ticklab_runner::report::{write_equity_csv, write_report};
use ticklab_runner::runner::{run_combined, run_separate, RunOutcome};
use ticklab_runner::synthetic::{random_walk, WalkParams};

#[derive(Parser)]
#[command(name = "ticklab", about = "ticklab CLI — tick-level strategy backtester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest and write report artifacts.
    Run {
        /// Path to a market data CSV (timestamp,symbol,price).
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Generate this many synthetic ticks instead of reading a CSV.
        #[arg(long)]
        synthetic_ticks: Option<usize>,

        /// Path to a TOML run config; inline strategy flags are ignored
        /// when this is set.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Symbol to backtest.
        #[arg(long, default_value = "AAPL")]
        symbol: String,

        /// Initial cash.
        #[arg(long, default_value_t = 100_000.0)]
        cash: f64,

        /// Simulated execution failure probability.
        #[arg(long, default_value_t = 0.01)]
        fail_prob: f64,

        /// Master seed for reproducible simulated failures.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Fast MA window.
        #[arg(long, default_value_t = 5)]
        fast: usize,

        /// Slow MA window.
        #[arg(long, default_value_t = 20)]
        slow: usize,

        /// Quantity per crossover signal.
        #[arg(long, default_value_t = 10)]
        qty_ma: u32,

        /// Momentum lookback.
        #[arg(long, default_value_t = 10)]
        mom_lookback: usize,

        /// Momentum threshold.
        #[arg(long, default_value_t = 0.005)]
        mom_threshold: f64,

        /// Quantity per momentum signal.
        #[arg(long, default_value_t = 5)]
        qty_mom: u32,

        /// Also run each strategy in isolation alongside the combined run.
        #[arg(long, default_value_t = false)]
        separate: bool,

        /// Output directory for reports and equity curves.
        #[arg(long, default_value = "artifacts")]
        outdir: PathBuf,
    },
    /// Write a seeded random-walk CSV.
    Synth {
        /// Output file path.
        #[arg(long, default_value = "market_data.csv")]
        out: PathBuf,

        /// Number of ticks to generate.
        #[arg(long, default_value_t = 250)]
        ticks: usize,

        /// Symbol column value.
        #[arg(long, default_value = "AAPL")]
        symbol: String,

        /// Starting price.
        #[arg(long, default_value_t = 100.0)]
        start_price: f64,

        /// Mean per-tick return.
        #[arg(long, default_value_t = 0.0002)]
        drift: f64,

        /// Per-tick noise amplitude.
        #[arg(long, default_value_t = 0.01)]
        volatility: f64,

        /// Seed for the walk.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticklab_core=info,ticklab_runner=info,ticklab_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            csv,
            synthetic_ticks,
            config,
            symbol,
            cash,
            fail_prob,
            seed,
            fast,
            slow,
            qty_ma,
            mom_lookback,
            mom_threshold,
            qty_mom,
            separate,
            outdir,
        } => {
            let run_config = match config {
                Some(path) => {
                    let content = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read config {}", path.display()))?;
                    RunConfig::from_toml(&content)?
                }
                None => {
                    let run_config = RunConfig {
                        symbol,
                        initial_cash: cash,
                        fail_probability: fail_prob,
                        seed,
                        strategies: vec![
                            StrategyConfig::MaCrossover {
                                fast,
                                slow,
                                quantity: qty_ma,
                            },
                            StrategyConfig::Momentum {
                                lookback: mom_lookback,
                                threshold: mom_threshold,
                                quantity: qty_mom,
                            },
                        ],
                    };
                    run_config.validate()?;
                    run_config
                }
            };

            let series = load_series(csv.as_deref(), synthetic_ticks, &run_config)?;
            execute(&run_config, &series, separate, &outdir)
        }
        Commands::Synth {
            out,
            ticks,
            symbol,
            start_price,
            drift,
            volatility,
            seed,
        } => {
            let series = random_walk(&WalkParams {
                symbol,
                start: default_start(),
                ticks,
                start_price,
                drift,
                volatility,
                seed,
            })?;
            write_market_csv(&out, &series)?;
            info!(path = %out.display(), ticks, "synthetic data written");
            Ok(())
        }
    }
}

fn default_start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap()
}

fn load_series(
    csv: Option<&Path>,
    synthetic_ticks: Option<usize>,
    config: &RunConfig,
) -> Result<PriceSeries> {
    match (csv, synthetic_ticks) {
        (Some(_), Some(_)) => bail!("--csv and --synthetic-ticks are mutually exclusive"),
        (Some(path), None) => Ok(load_market_data(path)?),
        (None, Some(ticks)) => Ok(random_walk(&WalkParams {
            symbol: config.symbol.clone(),
            start: default_start(),
            ticks,
            seed: config.seed,
            ..WalkParams::default()
        })?),
        (None, None) => bail!("provide a data source: --csv <path> or --synthetic-ticks <n>"),
    }
}

fn execute(config: &RunConfig, series: &PriceSeries, separate: bool, outdir: &Path) -> Result<()> {
    fs::create_dir_all(outdir)
        .with_context(|| format!("failed to create {}", outdir.display()))?;
    let run_id = config.run_id();

    let combined = run_combined(config, series)?;
    save_outcome(outdir, &run_id, &combined)?;

    if separate {
        for outcome in run_separate(config, series)? {
            save_outcome(outdir, &run_id, &outcome)?;
        }
    }
    Ok(())
}

fn save_outcome(outdir: &Path, run_id: &str, outcome: &RunOutcome) -> Result<()> {
    let report_path = outdir.join(format!("{}_performance.md", outcome.label));
    let equity_path = outdir.join(format!("{}_equity_curve.csv", outcome.label));
    write_report(&report_path, outcome, run_id)?;
    write_equity_csv(&equity_path, &outcome.result.equity_curve)?;
    info!(
        run = outcome.label.as_str(),
        report = %report_path.display(),
        fills = outcome.result.stats.fills,
        rejects = outcome.result.stats.rejects,
        errors = outcome.result.stats.errors,
        "artifacts written"
    );
    Ok(())
}

fn write_market_csv(path: &Path, series: &PriceSeries) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(file, "timestamp,symbol,price")?;
    for obs in series.iter() {
        writeln!(
            file,
            "{},{},{:.4}",
            obs.timestamp.to_rfc3339(),
            obs.symbol,
            obs.price
        )?;
    }
    Ok(())
}
