//! covid-compare CLI
//!
//! Offline inspection of a states CSV through the same dashboard core the
//! browser uses:
//! - List states and chart parameters
//! - Compute the layout envelope for a viewport
//! - Drive a page through selection events and summarize the chart
//! - Generate the default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use covid_compare::config::{generate_default_config, Config, LoggingConfig};
use covid_compare::dashboard::{
    compute_layout_envelope, list_params, ChartProps, LayoutConfig, Page, PageEvent, ParamId,
    StatesFeed, StatesMapping, StatesSource, Viewport,
};
use covid_compare::data::StatesLoader;
use covid_compare::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "covid-compare-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect COVID-19 state comparison data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// States CSV (default: from config)
    #[arg(long, global = true)]
    states_file: Option<PathBuf>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List states with day count and latest values
    States,

    /// List chart parameters in display order
    Params,

    /// Print the layout envelope for a viewport
    Layout {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },

    /// Select states and summarize the resulting chart
    Chart {
        /// Chart parameter id
        #[arg(short, long, default_value = "cases-per-1000")]
        param: String,
        /// States to select (comma-separated or repeated)
        #[arg(short, long, value_delimiter = ',', conflicts_with = "all")]
        select: Vec<String>,
        /// Select every state
        #[arg(long)]
        all: bool,
        #[arg(long, default_value = "1280")]
        width: f64,
        #[arg(long, default_value = "800")]
        height: f64,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&LoggingConfig {
        level: "warn".to_string(),
        ..Default::default()
    })
    .context("Failed to initialize logging")?;

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(states_file) = &cli.states_file {
        config.data.states_file = states_file.clone();
    }

    match &cli.command {
        Commands::States => {
            let states = load_states(&config)?;
            print_states(&states, cli.format)?;
        }

        Commands::Params => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(list_params())?);
            } else {
                println!("{:<18} {:<25} {:<8} {}", "ID", "Label", "Scale", "Axis");
                println!("{}", "-".repeat(70));
                for p in list_params() {
                    println!(
                        "{:<18} {:<25} {:<8} {}",
                        p.id.as_str(),
                        p.label,
                        format!("{:?}", p.scale).to_lowercase(),
                        p.axis_label
                    );
                }
            }
        }

        Commands::Layout { width, height } => {
            let envelope = compute_layout_envelope(Viewport::new(*width, *height), &config.layout);
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                let w = &envelope.wrapper;
                println!("Wrapper: {:.1} x {:.1}", w.wrapper_width, w.wrapper_height);
                println!(
                    "Margin:  top {:.1}, right {:.1}, bottom {:.1}, left {:.1}",
                    w.margin.top, w.margin.right, w.margin.bottom, w.margin.left
                );
                println!(
                    "Bounds:  {:.1} x {:.1}{}",
                    envelope.bounds.width,
                    envelope.bounds.height,
                    if envelope.bounds.is_drawable() { "" } else { " (not drawable)" }
                );
            }
        }

        Commands::Chart {
            param,
            select,
            all,
            width,
            height,
        } => {
            param.parse::<ParamId>().map_err(anyhow::Error::msg)?;

            let feed = StatesFeed::new();
            feed.publish(load_states(&config)?);

            let events = chart_events(param, select, *all, Viewport::new(*width, *height));
            let props = run_page(feed, config.layout.clone(), events)?;
            print_chart(&props, cli.format)?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn load_states(config: &Config) -> anyhow::Result<StatesMapping> {
    let loader = StatesLoader::new(&config.data.states_file);
    let loaded = loader
        .load()
        .with_context(|| format!("Failed to load {:?}", loader.path()))?;

    for error in &loaded.report.errors {
        eprintln!("warning: {}", error);
    }
    Ok(loaded.mapping)
}

/// The events the Navbar would emit for this invocation, in order
fn chart_events(param: &str, select: &[String], all: bool, viewport: Viewport) -> Vec<PageEvent> {
    let mut events = vec![PageEvent::Resized(viewport)];
    if all {
        events.push(PageEvent::SelectAll);
    }
    events.extend(select.iter().map(|id| PageEvent::ToggleOne {
        state_id: id.trim().to_string(),
        checked: true,
    }));
    events.push(PageEvent::ParamChanged(param.to_string()));
    events
}

fn run_page<S: StatesSource>(
    source: S,
    layout: LayoutConfig,
    events: Vec<PageEvent>,
) -> anyhow::Result<ChartProps> {
    let mut page = Page::new(source, layout, Viewport::new(0.0, 0.0));
    for event in events {
        page.dispatch(event)?;
    }
    page.chart_props()
        .context("States feed was not delivered to the page")
}

fn print_states(states: &StatesMapping, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(states)?);
        return Ok(());
    }

    println!(
        "{:<6} {:<22} {:>6} {:>10} {:>10} {:>12}",
        "ID", "Name", "Days", "Cases", "New", "Per 1000"
    );
    println!("{}", "-".repeat(72));
    for record in states {
        match record.latest() {
            Some(latest) => println!(
                "{:<6} {:<22} {:>6} {:>10} {:>10} {:>12.4}",
                record.id,
                record.name,
                record.days_of_outbreak(),
                latest.cases,
                latest.new_cases,
                latest.cases_per_1000
            ),
            None => println!("{:<6} {:<22} {:>6}", record.id, record.name, 0),
        }
    }
    println!();
    println!("{} states", states.len());
    Ok(())
}

fn print_chart(props: &ChartProps, format: OutputFormat) -> anyhow::Result<()> {
    let series = props.series();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    println!(
        "{} ({:?} scale, {:.0} x {:.0} px)",
        props.current_param.label, props.current_param.scale, props.bounds.width, props.bounds.height
    );

    if series.is_empty() {
        println!("No states selected.");
        return Ok(());
    }

    for s in &series {
        match s.last() {
            Some((day, value)) => println!(
                "  {:<22} {:>4} points, day {:>3}: {:.4}",
                s.name,
                s.points.len(),
                day,
                value
            ),
            None => println!("  {:<22} no plottable points", s.name),
        }
    }

    if let Some(domain) = ChartProps::domain(&series) {
        println!(
            "Domain: days 1..{}, values {:.4}..{:.4}",
            domain.max_day, domain.min_value, domain.max_value
        );
    }
    Ok(())
}
