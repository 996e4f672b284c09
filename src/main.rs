//! `frontier` command-line tool.
//!
//! Fetches daily closes from Yahoo Finance, samples the long-only frontier
//! and prints the current, minimum-variance and maximum-Sharpe portfolios.

use anyhow::bail;
use anyhow::Context;
use clap::Parser;
use frontier_rs::data::YahooQuotes;
use frontier_rs::portfolio::DEFAULT_RISK_FREE;
use frontier_rs::portfolio::DEFAULT_TRIALS;
use frontier_rs::AssetPosition;
use frontier_rs::OptimizationResult;
use frontier_rs::PortfolioEngine;
use frontier_rs::PortfolioEngineConfig;
use frontier_rs::PortfolioStats;
use frontier_rs::TimeRange;
use prettytable::row;
use prettytable::Table;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "frontier")]
#[command(about = "Portfolio statistics and Monte-Carlo efficient frontier")]
struct Cli {
  /// Holdings as TICKER=WEIGHT, weights in any unit
  #[arg(required = true)]
  positions: Vec<String>,

  /// Lookback window: 1y, 2y or 5y
  #[arg(short, long, default_value = "1y")]
  range: TimeRange,

  /// Number of random portfolios
  #[arg(short, long, default_value_t = DEFAULT_TRIALS)]
  trials: usize,

  /// Annual risk-free rate
  #[arg(long, default_value_t = DEFAULT_RISK_FREE)]
  risk_free: f64,

  /// Benchmark ticker
  #[arg(long, default_value = "SPY")]
  benchmark: String,

  /// Skip the benchmark
  #[arg(long)]
  no_benchmark: bool,

  /// Seed for reproducible sampling
  #[arg(long)]
  seed: Option<u64>,

  /// Print the full result as JSON
  #[arg(long)]
  json: bool,
}

fn parse_position(arg: &str) -> anyhow::Result<AssetPosition> {
  let Some((ticker, weight)) = arg.split_once('=') else {
    bail!("expected TICKER=WEIGHT, got `{arg}`");
  };
  let ticker = ticker.trim().to_ascii_uppercase();
  if ticker.is_empty() {
    bail!("empty ticker in `{arg}`");
  }
  let weight: f64 = weight
    .trim()
    .parse()
    .with_context(|| format!("invalid weight in `{arg}`"))?;
  Ok(AssetPosition::new(ticker, weight))
}

fn stats_row(table: &mut Table, label: &str, s: &PortfolioStats) {
  table.add_row(row![
    label,
    format!("{:.2}%", s.annualized_return * 100.0),
    format!("{:.2}%", s.annualized_risk * 100.0),
    format!("{:.3}", s.sharpe_ratio),
    s.var95.map(|v| format!("{:.2}%", v * 100.0)).unwrap_or_default(),
  ]);
}

fn print_summary(result: &OptimizationResult) {
  if result.is_simulation {
    println!("note: live data unavailable, results use simulated returns");
  }

  let mut summary = Table::new();
  summary.add_row(row!["portfolio", "return", "risk", "sharpe", "VaR 95%"]);
  stats_row(&mut summary, "current", &result.current);
  stats_row(&mut summary, "min variance", &result.min_variance);
  stats_row(&mut summary, "max sharpe", &result.max_sharpe);
  if let (Some(ticker), Some(bench)) = (&result.benchmark_ticker, &result.benchmark) {
    stats_row(&mut summary, ticker, bench);
  }
  summary.printstd();

  let mut holdings = Table::new();
  holdings.add_row(row!["asset", "name", "current", "min var", "max sharpe", "risk share"]);
  for (i, ticker) in result.assets.iter().enumerate() {
    holdings.add_row(row![
      ticker,
      result.display_name(ticker),
      format!("{:.1}%", result.current.weights[i] * 100.0),
      format!("{:.1}%", result.min_variance.weights[i] * 100.0),
      format!("{:.1}%", result.max_sharpe.weights[i] * 100.0),
      format!("{:.1}%", result.risk_contributions[i] * 100.0),
    ]);
  }
  holdings.printstd();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .with(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let cli = Cli::parse();
  let positions = cli
    .positions
    .iter()
    .map(|p| parse_position(p))
    .collect::<anyhow::Result<Vec<_>>>()?;

  let config = PortfolioEngineConfig {
    trials: cli.trials,
    risk_free: cli.risk_free,
    benchmark: (!cli.no_benchmark).then_some(cli.benchmark),
    seed: cli.seed,
    ..Default::default()
  };
  let engine = PortfolioEngine::new(YahooQuotes::new()?, config)?;
  let result = engine.optimize(&positions, cli.range).await?;

  if cli.json {
    println!("{}", serde_json::to_string_pretty(&result)?);
  } else {
    print_summary(&result);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn positions_are_parsed() {
    let p = parse_position(" aapl = 40 ").unwrap();
    assert_eq!(p.ticker, "AAPL");
    assert_eq!(p.raw_weight, 40.0);
  }

  #[test]
  fn malformed_positions_are_rejected() {
    assert!(parse_position("AAPL").is_err());
    assert!(parse_position("=10").is_err());
    assert!(parse_position("AAPL=ten").is_err());
  }
}
