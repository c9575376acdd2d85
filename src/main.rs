//! covid-compare API Server
//!
//! Run with: cargo run --bin covid-compare
//!
//! # Configuration
//!
//! Settings come from a TOML file (see `--print-config`), overridden by
//! environment variables, overridden by command-line flags:
//! - `COVID_COMPARE_STATES_FILE`: States CSV (default: ./data/states.csv)
//! - `COVID_COMPARE_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `COVID_COMPARE_API_PORT`: Port to listen on (default: 8090)
//! - `COVID_COMPARE_LOG_LEVEL`: Log level (default: info)
//! - `COVID_COMPARE_LOG_FORMAT`: `pretty` or `json`
//! - `RUST_LOG`: Full filter directive, wins over the log level

use anyhow::Context;
use clap::Parser;
use covid_compare::api::{serve, AppState};
use covid_compare::config::{generate_default_config, Config};
use covid_compare::dashboard::StatesFeed;
use covid_compare::data::StatesLoader;
use covid_compare::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "covid-compare")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the COVID-19 state comparison dashboard")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// States CSV to serve
    #[arg(long)]
    states_file: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory with the built browser UI
    #[arg(long)]
    ui_dir: Option<PathBuf>,

    /// Print the default config file and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(states_file) = &self.states_file {
            config.data.states_file = states_file.clone();
        }
        if let Some(host) = &self.host {
            config.api.host = host.clone();
        }
        if let Some(port) = self.port {
            config.api.port = port;
        }
        if let Some(ui_dir) = &self.ui_dir {
            config.api.ui_dir = Some(ui_dir.clone());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    args.apply(&mut config);

    init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!("Starting covid-compare API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("States file: {:?}", config.data.states_file);

    let feed = StatesFeed::new();
    let loader = StatesLoader::new(&config.data.states_file);

    // Serve even without data; readiness stays 503 until a reload succeeds
    match loader.load_into(&feed) {
        Ok(report) if report.rows_failed > 0 => {
            tracing::warn!(
                "Loaded {} states, {} rows rejected",
                report.total,
                report.rows_failed
            );
        }
        Ok(report) => tracing::info!("Loaded {} states", report.total),
        Err(e) => tracing::error!("States feed not loaded: {}", e),
    }

    let state = AppState::new(feed, config.api.clone(), config.layout.clone()).with_loader(loader);
    serve(state).await.context("API server failed")?;

    tracing::info!("covid-compare API server stopped");
    Ok(())
}
