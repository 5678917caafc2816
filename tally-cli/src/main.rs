use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tally_core::time::{local_date, parse_iso_date};
use tally_core::{assess_all, StatusSummary};
use tally_ingest::{load_snapshot, Snapshot};
use tracing::debug;

mod config;
mod logging;
mod report;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Habit goal progress from the command line")]
struct Cli {
    /// Log filter (overrides config; RUST_LOG overrides both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every goal (or one) for a reference date
    Evaluate {
        #[command(flatten)]
        data: DataArgs,

        /// Only evaluate the goal with this id
        #[arg(long)]
        goal: Option<String>,

        /// Print assessments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count goals by status for a reference date
    Summary {
        #[command(flatten)]
        data: DataArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Reference date (YYYY-MM-DD); defaults to today in the configured timezone
    #[arg(long, value_parser = parse_iso_date)]
    today: Option<NaiveDate>,

    /// Activity types JSON (overrides config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Goals JSON (overrides config)
    #[arg(long)]
    goals: Option<PathBuf>,

    /// Activity log CSV (overrides config)
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    let level = cli.log_level.as_deref().unwrap_or(&cfg.logging.level);
    logging::init_logging(level)?;

    match cli.command {
        Command::Evaluate { data, goal, json } => {
            let today = reference_date(&data, &cfg)?;
            let snapshot = load(&data, &cfg)?;
            evaluate(&snapshot, today, goal.as_deref(), json)?;
        }

        Command::Summary { data, json } => {
            let today = reference_date(&data, &cfg)?;
            let snapshot = load(&data, &cfg)?;
            let assessments = assess_all(&snapshot.goals, &snapshot.catalog, &snapshot.log, today);
            let summary = StatusSummary::from_assessments(&assessments);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("# Goals as of {today}\n");
                println!("{}", report::format_summary(&summary));
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn reference_date(data: &DataArgs, cfg: &Config) -> Result<NaiveDate> {
    if let Some(today) = data.today {
        return Ok(today);
    }
    let today = local_date(Utc::now(), &cfg.clock.timezone)
        .with_context(|| format!("clock.timezone = {}", cfg.clock.timezone))?;
    debug!(%today, timezone = %cfg.clock.timezone, "reference date from wall clock");
    Ok(today)
}

fn load(data: &DataArgs, cfg: &Config) -> Result<Snapshot> {
    let home = state::tally_home()?;
    let pick = |flag: &Option<PathBuf>, configured: &str| {
        flag.clone()
            .unwrap_or_else(|| state::resolve_data_path(&home, configured))
    };

    let catalog = pick(&data.catalog, &cfg.data.catalog);
    let goals = pick(&data.goals, &cfg.data.goals);
    let log = pick(&data.log, &cfg.data.log);

    for p in [&catalog, &goals, &log] {
        if !p.exists() {
            bail!(
                "input not found: {} (pass --catalog/--goals/--log or edit {})",
                p.display(),
                config::config_path()?.display()
            );
        }
    }

    load_snapshot(&catalog, &goals, &log)
}

fn evaluate(snapshot: &Snapshot, today: NaiveDate, only: Option<&str>, json: bool) -> Result<()> {
    let goals: Vec<_> = snapshot
        .goals
        .iter()
        .filter(|g| only.is_none_or(|id| g.id == id))
        .cloned()
        .collect();

    if let Some(id) = only {
        if goals.is_empty() {
            bail!("no goal with id {id}");
        }
    }

    let assessments = assess_all(&goals, &snapshot.catalog, &snapshot.log, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&assessments)?);
        return Ok(());
    }

    println!("# Goals as of {today}\n");
    for (goal, a) in goals.iter().zip(&assessments) {
        println!("{}", report::format_assessment(goal, &snapshot.catalog, a));
    }
    println!("\n{}", report::format_summary(&StatusSummary::from_assessments(&assessments)));

    Ok(())
}
