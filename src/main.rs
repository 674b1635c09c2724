use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use dca::core::{Inputs, run_simulation};
use dca::fetch::{ReturnFetcher, resolve_period_range};
use dca::{chart, report};

#[derive(Parser, Debug)]
#[command(
    name = "dca",
    about = "Dollar-cost-averaging profit simulator over Yahoo Finance monthly returns"
)]
struct Cli {
    #[arg(long, default_value = "SPY", help = "Ticker symbol to fetch monthly returns for")]
    ticker: String,

    #[arg(long, default_value = "01/2020", help = "First month of the range, mm/yyyy")]
    start: String,

    #[arg(long, help = "Last month of the range, mm/yyyy; defaults to today")]
    end: Option<String>,

    #[arg(long, default_value_t = 0.0, help = "Lump sum invested before the first month")]
    initial_investment: f64,

    #[arg(
        long,
        default_value_t = 0.0,
        help = "Amount contributed at the start of every month"
    )]
    monthly_investment: f64,

    #[arg(long, help = "Write the chart to this SVG path instead of printing the table")]
    chart: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dca=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (start_date, end_date) = resolve_period_range(&cli.start, cli.end.as_deref())?;

    let fetcher = ReturnFetcher::new().context("building the Yahoo Finance connector")?;
    let monthly_returns = fetcher
        .monthly_returns(&cli.ticker, start_date, end_date)
        .await?;
    info!(
        ticker = %cli.ticker,
        months = monthly_returns.len(),
        "fetched monthly returns"
    );

    let results = run_simulation(&Inputs {
        initial_investment: cli.initial_investment,
        monthly_investment: cli.monthly_investment,
        monthly_returns,
        start_date,
    });

    match cli.chart {
        Some(path) => {
            chart::save_svg(&results, &cli.ticker, &path)
                .with_context(|| format!("writing chart to {}", path.display()))?;
            info!(path = %path.display(), "chart written");
        }
        None => report::print_table(&results),
    }

    Ok(())
}
