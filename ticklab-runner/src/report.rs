//! Markdown run report and equity-curve CSV artifact.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::runner::RunOutcome;
use ticklab_core::engine::EquityPoint;

/// Render a Markdown performance report for one run.
pub fn render_markdown(outcome: &RunOutcome, run_id: &str) -> String {
    let stats = &outcome.result.stats;
    let ledger = &outcome.result.ledger;
    let mut report = format!(
        "# Backtest Run Report — {}\n\n\
Run ID: `{run_id}`\n\n\
## Summary\n\
| Metric | Value |\n\
|---|---:|\n\
| Total Return | {:.4} |\n\
| Sharpe (per-period) | {:.4} |\n\
| Max Drawdown | {:.4} |\n\
| Final Equity | {:.2} |\n",
        outcome.label,
        outcome.summary.total_return,
        outcome.summary.sharpe_per_period,
        outcome.summary.max_drawdown,
        outcome.result.final_equity,
    );

    report.push_str(&format!(
        "\n## Execution\n\
- Submitted intents: {}\n\
- Fills: {}\n\
- Rejects: {}\n\
- Strategy errors: {}\n",
        stats.submitted(),
        stats.fills,
        stats.rejects,
        stats.errors,
    ));

    report.push_str(&format!(
        "\n## Final Ledger\n\
- Cash: {:.2}\n\
- Position: {}\n",
        ledger.cash, ledger.position,
    ));

    report.push_str(
        "\nAccounting is permissive: buys may overdraw cash and sells may open \
short positions without any check. Treat results under heavy overdraft or \
shorting as indicative only.\n",
    );

    report
}

/// Write the Markdown report to disk.
pub fn write_report(path: &Path, outcome: &RunOutcome, run_id: &str) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create report {}", path.display()))?;
    file.write_all(render_markdown(outcome, run_id).as_bytes())
        .with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(())
}

/// Write the equity curve as a `timestamp,equity` CSV.
pub fn write_equity_csv(path: &Path, equity_curve: &[EquityPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create equity CSV {}", path.display()))?;
    writeln!(file, "timestamp,equity")?;
    for point in equity_curve {
        writeln!(file, "{},{:.4}", point.timestamp.to_rfc3339(), point.equity)?;
    }
    Ok(())
}
