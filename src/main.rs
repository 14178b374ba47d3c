use std::path::PathBuf;

use audit_triage::config::AppConfig;
use audit_triage::error::AppError;
use audit_triage::ingest;
use audit_triage::screening::{screen_dataset, FlaggedCompany, RuleConfig};
use audit_triage::telemetry;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "audit-triage",
    about = "Rank corporate tax filings for audit review by evaluating configurable risk rules",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Screen a dataset and print the flagged companies, highest risk first
    Screen(ScreenArgs),
}

#[derive(Args, Debug)]
struct ScreenArgs {
    /// Company records (.csv or .json)
    #[arg(long)]
    companies: PathBuf,
    /// Audit-history records (.csv or .json); omitted means no company was ever audited
    #[arg(long)]
    audits: Option<PathBuf>,
    /// Rule configuration (.json); defaults to the built-in thresholds
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
    /// Emit machine-readable JSON instead of the text report
    #[arg(long)]
    json: bool,
    /// Only print the top N flagged companies
    #[arg(long)]
    limit: Option<usize>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let app_config = AppConfig::load();
    telemetry::init(&app_config.telemetry)?;

    match cli.command {
        Command::Screen(args) => run_screen(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let companies = ingest::load_companies(&args.companies)?;
    let audits = match &args.audits {
        Some(path) => ingest::load_audits(path)?,
        None => Vec::new(),
    };
    let rule_config = match &args.rules {
        Some(path) => ingest::load_rule_config(path)?,
        None => RuleConfig::default(),
    };
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    info!(
        companies = companies.len(),
        audits = audits.len(),
        %as_of,
        "screening dataset"
    );

    let mut flagged = screen_dataset(&companies, &audits, &rule_config, as_of)?;
    if let Some(limit) = args.limit {
        flagged.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&flagged)?);
    } else {
        render_report(&flagged, companies.len(), as_of);
    }

    Ok(())
}

fn render_report(flagged: &[FlaggedCompany], total: usize, as_of: NaiveDate) {
    println!("Audit screening report (as of {as_of})");
    println!(
        "{} of {} companies flagged for review",
        flagged.len(),
        total
    );

    if flagged.is_empty() {
        return;
    }

    for (rank, entry) in flagged.iter().enumerate() {
        println!(
            "\n{}. {} (corp #{}) | risk score {} | {} risk",
            rank + 1,
            entry.company.corp_name,
            entry.company.corp_id,
            entry.risk_score,
            entry.risk_level.label()
        );
        match entry.audit {
            Some(audit) => println!("   last audited {}", audit.audit_date),
            None => println!("   never audited"),
        }
        for flag in &entry.flags {
            println!(
                "   - [{}] {} (+{})",
                flag.kind.label(),
                flag.reason,
                flag.risk_score
            );
        }
    }
}
