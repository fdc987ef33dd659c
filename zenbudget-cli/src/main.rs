use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use zenbudget_core::{CategoryTotals, Reallocation, aggregate_with_stats, reallocate, today_in};
use zenbudget_ingest::load_transactions;

mod config;
mod report;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "zenbudget", version, about = "Weekly budget reallocation suggestions")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Suggest moving budget from underspent to overspent categories
    Suggest {
        /// Transactions CSV (defaults to config, then ./Savings-Optimized_Dataset.csv)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Treat this date (YYYY-MM-DD) as today instead of the clock
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the JSON payload instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show current-week spend against historical averages per category
    Summary {
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Manage ~/.zenbudget/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    // stdout carries results; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Command::Suggest { csv, today, json } => {
            let outcome = config::load_config().and_then(|cfg| suggest(&cfg, csv, today));
            match (outcome, json) {
                (Ok(result), true) => println!("{}", report::render_suggestions_json(&result)?),
                (Ok(result), false) => print!("{}", report::render_suggestions_text(&result)),
                (Err(err), true) => {
                    println!("{}", report::render_error_json(&err));
                    std::process::exit(1);
                }
                (Err(err), false) => return Err(err),
            }
        }

        Command::Summary { csv, today } => {
            let cfg = config::load_config()?;
            let totals = load_totals(&cfg, csv, today)?;
            print!("{}", report::render_summary(&totals, &cfg.budgets));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn suggest(cfg: &Config, csv: Option<PathBuf>, today: Option<NaiveDate>) -> Result<Reallocation> {
    let totals = load_totals(cfg, csv, today)?;
    let result = reallocate(&totals);
    info!(suggestions = result.suggestions().len(), "reallocation computed");
    Ok(result)
}

fn load_totals(cfg: &Config, csv: Option<PathBuf>, today: Option<NaiveDate>) -> Result<CategoryTotals> {
    let csv_path = cfg.dataset_path(csv);
    ensure_exists(&csv_path)?;

    let today = match today {
        Some(d) => d,
        None => today_in(&cfg.calendar.timezone)?,
    };

    let dataset = load_transactions(&csv_path, &cfg.dataset.columns)
        .with_context(|| format!("loading {}", csv_path.display()))?;

    let (totals, stats) = aggregate_with_stats(&dataset.records, cfg.calendar.week_rule(), today);
    debug!(
        %today,
        debits = stats.debits,
        current_week = stats.current_week,
        past = stats.past,
        categories = totals.len(),
        "aggregated"
    );
    Ok(totals)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", path.display());
    }
    Ok(())
}
