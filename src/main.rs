use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;

use ce_backend::{
    AppError, AppResult,
    config::Config,
    db::models::{LedgerEvent, ProjectCycle},
    services::entitlement_service::compute_active_weeks,
    services::ledger_service::aggregate_checked,
    utils::DateInterval,
};

#[derive(Parser)]
#[command(name = "ce", about = "Community Employment scheme entitlement calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive a project cycle's end date and the following cycle's dates
    Cycle {
        #[arg(long)]
        start: NaiveDate,
        /// Overrides CYCLE_WEEKS
        #[arg(long)]
        weeks: Option<u32>,
    },
    /// Compute active weeks and holiday / sick-leave entitlement
    Entitlement {
        #[arg(long)]
        cycle_start: NaiveDate,
        #[arg(long)]
        active_start: NaiveDate,
        #[arg(long)]
        active_end: Option<NaiveDate>,
    },
    /// Sum a JSON array of ledger events per kind
    Ledger {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        participant: Uuid,
        #[arg(long)]
        cycle: Uuid,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => return report(e),
    };
    ce_backend::init_tracing(&config);

    match run(&config, cli.command) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

fn report(e: AppError) -> ExitCode {
    tracing::error!(code = e.code(), "{}", e);
    eprintln!("{}", json!({ "error": e.code(), "message": e.to_string() }));
    ExitCode::FAILURE
}

fn run(config: &Config, command: Command) -> AppResult<serde_json::Value> {
    match command {
        Command::Cycle { start, weeks } => {
            let mut policy = config.cycle_policy()?;
            if let Some(weeks) = weeks {
                policy.weeks = weeks;
            }
            let dates = policy.derive(start)?;
            Ok(serde_json::to_value(dates)?)
        }
        Command::Entitlement {
            cycle_start,
            active_start,
            active_end,
        } => {
            let dates = config.cycle_policy()?.derive(cycle_start)?;
            let policy = config.entitlement_policy()?;
            let cycle = ProjectCycle {
                id: Uuid::nil(),
                scheme_id: Uuid::nil(),
                sequence_number: 1,
                start_date: dates.start_date,
                end_date: dates.end_date,
                created_at: chrono::Utc::now(),
            };

            let end = active_end.unwrap_or_else(|| policy.open_end_date(active_start, &cycle));
            let interval = DateInterval::new(active_start, end);
            let weeks = compute_active_weeks(interval, cycle.interval(), policy.week_counting);
            let entitlement = policy.for_weeks(weeks);

            Ok(json!({
                "cycle": dates,
                "active": interval,
                "entitlement": entitlement,
            }))
        }
        Command::Ledger {
            file,
            participant,
            cycle,
        } => {
            let raw = std::fs::read_to_string(&file).map_err(|e| {
                AppError::validation(format!("Cannot read {}: {}", file.display(), e))
            })?;
            let events: Vec<LedgerEvent> = serde_json::from_str(&raw)?;
            let totals = aggregate_checked(&events, participant, cycle)?;
            Ok(json!({
                "participant_id": participant,
                "cycle_id": cycle,
                "events": events.iter().filter(|e| e.participant_id == participant && e.cycle_id == cycle).count(),
                "totals": totals.to_map(),
            }))
        }
    }
}
