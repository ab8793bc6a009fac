use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use vwap_bias::commands::{backtest, dashboard, live, universe};
use vwap_bias::context::AppContext;

#[derive(Parser)]
#[command(name = "vwap-bias")]
#[command(about = "Monthly VWAP bias backtester with stock/index alignment")]
struct Cli {
    /// Path to a JSON universe configuration overriding the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Intraday interval passed through to the data provider (default 5m)
    #[arg(long, global = true, value_name = "INTERVAL")]
    interval: Option<String>,
    /// Lookback period passed through to the data provider (default 12mo)
    #[arg(long, global = true, value_name = "PERIOD")]
    period: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backtest the monthly VWAP bias for a stock and its parent index
    Backtest {
        /// Index name from the universe config
        #[arg(long)]
        index: String,
        /// Stock name within that index
        #[arg(long)]
        stock: String,
    },
    /// Classify the current live price against this month's reference VWAP
    Live {
        #[arg(long)]
        index: String,
        #[arg(long)]
        stock: String,
    },
    /// Backtest plus live signal and alignment verdict in one run
    Dashboard {
        #[arg(long)]
        index: String,
        #[arg(long)]
        stock: String,
    },
    /// List the configured indices and their stocks
    Universe,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = AppContext::initialize(cli.config.as_deref(), cli.interval, cli.period)?;

    info!("Starting vwap-bias. Not financial advice; use at your own risk.");

    match cli.command {
        Commands::Backtest { index, stock } => {
            backtest::run(&app, &index, &stock).await?;
        }
        Commands::Live { index, stock } => {
            live::run(&app, &index, &stock).await?;
        }
        Commands::Dashboard { index, stock } => {
            dashboard::run(&app, &index, &stock).await?;
        }
        Commands::Universe => {
            universe::run(&app)?;
        }
    }

    Ok(())
}
