use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use cadence_core::Schedule;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cadence_cli::commands::{check, progress, recurrences, slots, util, windows};
use cadence_cli::{Cli, Commands, Config, PlanFile};

/// Load config and the plan file it (or `--plan`) points at.
fn open_plan(config_path: Option<&Path>, plan_path: Option<&Path>) -> Result<(PlanFile, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path = plan_path.unwrap_or(&config.plan_path);
    let plan = PlanFile::load(path)?;
    Ok((plan, config))
}

fn resolve_date(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    arg.map_or(Ok(today), |s| util::parse_date(s, today))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(ExitCode::SUCCESS);
    };

    let (plan, config) = open_plan(cli.config.as_deref(), cli.plan.as_deref())?;
    let schedule = Schedule::load::<_, _, anyhow::Error>(&plan, &plan)?;
    let today = Local::now().date_naive();
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Check { start, duration } => {
            if !check::run(&mut stdout, &schedule, start, *duration)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Slots {
            duration,
            from,
            horizon,
            granularity,
            limit,
            json,
        } => {
            let from = resolve_date(from.as_deref(), today)?;
            let mut search = config.search;
            if let Some(horizon) = horizon {
                search.horizon_days = *horizon;
            }
            if let Some(granularity) = granularity {
                search.granularity_minutes = *granularity;
            }
            if let Some(limit) = limit {
                search.max_results = *limit;
            }
            slots::run(&mut stdout, &schedule, *duration, from, &search, *json)?;
        }
        Commands::Recurrences { date, json } => {
            let date = resolve_date(date.as_deref(), today)?;
            recurrences::run(&mut stdout, &plan, &schedule, date, *json)?;
        }
        Commands::Progress { date, json } => {
            let date = resolve_date(date.as_deref(), today)?;
            progress::run(&mut stdout, &plan, &schedule, date, *json)?;
        }
        Commands::Windows { json } => {
            windows::run(&mut stdout, &schedule.windows, *json)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
