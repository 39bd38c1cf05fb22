//! `policy-alerts` - run the payment and renewal alert engine over a
//! JSON policy snapshot.

mod exit_codes;
mod input;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use policy_alerts_core::{
    aggregate, without_acknowledged, AlertEngine, CalendarError, ConfigError, EngineLog, PolicyRecord,
    ReportSnapshot,
};
use tracing::{debug, Level};

use exit_codes::{EXIT_ERROR, EXIT_PERSISTENT_ALERTS, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "policy-alerts")]
#[command(about = "Payment and renewal alerts for an insurance policy book")]
#[command(version)]
struct Cli {
    /// Log engine activity to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List alerts in display order
    #[command(after_help = "\
Examples:
  policy-alerts alerts --input policies.json --today 2024-06-20
  cat policies.json | policy-alerts alerts --input - --format json
  policy-alerts alerts --input policies.json --ack p-7:payment:30_days --fail-on-persistent")]
    Alerts {
        #[command(flatten)]
        pass: PassArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Alert ids already acknowledged (persistent alerts are never hidden)
        #[arg(long = "ack", value_name = "ALERT_ID")]
        acknowledged: Vec<String>,

        /// Exit with code 3 when any persistent alert remains
        #[arg(long)]
        fail_on_persistent: bool,
    },

    /// Summary counters for the alert list
    Stats {
        #[command(flatten)]
        pass: PassArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Derived status per policy
    Status {
        #[command(flatten)]
        pass: PassArgs,

        /// Only show policies whose status would change
        #[arg(long)]
        changed: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Args)]
struct PassArgs {
    /// Policy snapshot (JSON array or {"policies": [...]}); `-` reads stdin
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Evaluation date (YYYY-MM-DD); defaults to the local date
    #[arg(long, env = "POLICY_ALERTS_TODAY")]
    today: Option<String>,

    /// Engine config JSON (horizons and escalation threshold)
    #[arg(long, env = "POLICY_ALERTS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli, &mut io::stdout().lock()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    let usage = err.chain().any(|cause| {
        cause.is::<CalendarError>()
            || cause.is::<ConfigError>()
            || cause.is::<serde_json::Error>()
            || cause
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
    });
    if usage {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

struct Pass {
    engine: AlertEngine,
    policies: Vec<PolicyRecord>,
    today: NaiveDate,
}

fn prepare(args: &PassArgs) -> Result<Pass> {
    let config = input::load_config(args.config.as_deref())?;
    let engine = AlertEngine::new(config)?;
    let policies = input::load_policies(&args.input)?;
    let today = input::resolve_today(args.today.as_deref())?;
    debug!(policies = policies.len(), %today, "loaded policy snapshot");
    Ok(Pass {
        engine,
        policies,
        today,
    })
}

fn run(cli: Cli, out: &mut impl Write) -> Result<u8> {
    match cli.command {
        Commands::Alerts {
            pass,
            format,
            acknowledged,
            fail_on_persistent,
        } => {
            let Pass {
                engine,
                policies,
                today,
            } = prepare(&pass)?;

            let mut log = EngineLog::new();
            let mut report = engine.run_logged(&policies, today, &mut log);
            for event in log.events_of_type("RecordSkipped") {
                debug!(?event, "skipped");
            }

            report.alerts =
                without_acknowledged(report.alerts, acknowledged.iter().map(String::as_str));
            report.statistics = aggregate(&report.alerts);

            match format {
                Format::Text => write!(out, "{}", render::alerts_table(&report.alerts))?,
                Format::Json => {
                    let snapshot = ReportSnapshot::from_report(&report)?;
                    writeln!(out, "{}", snapshot.to_json()?)?;
                }
            }

            if fail_on_persistent && report.persistent_alerts().next().is_some() {
                return Ok(EXIT_PERSISTENT_ALERTS);
            }
            Ok(EXIT_SUCCESS)
        }

        Commands::Stats { pass, format } => {
            let Pass {
                engine,
                policies,
                today,
            } = prepare(&pass)?;
            let report = engine.run(&policies, today);

            match format {
                Format::Text => write!(out, "{}", render::statistics_summary(&report.statistics))?,
                Format::Json => writeln!(
                    out,
                    "{}",
                    serde_json::to_string_pretty(&report.statistics)
                        .context("failed to serialize statistics")?
                )?,
            }
            Ok(EXIT_SUCCESS)
        }

        Commands::Status {
            pass,
            changed,
            format,
        } => {
            let Pass {
                engine,
                policies,
                today,
            } = prepare(&pass)?;
            let mut updates = engine.status_updates(&policies, today);
            if changed {
                updates.retain(|u| u.is_changed());
            }

            match format {
                Format::Text => write!(out, "{}", render::status_table(&updates, changed))?,
                Format::Json => writeln!(
                    out,
                    "{}",
                    serde_json::to_string_pretty(&updates)
                        .context("failed to serialize status updates")?
                )?,
            }
            Ok(EXIT_SUCCESS)
        }
    }
}
