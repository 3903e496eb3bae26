use crate::infra::parse_identifier_kind;
use brokerage_intake::config::AppConfig;
use brokerage_intake::error::AppError;
use brokerage_intake::workflows::batch::{BatchOutcome, IdentifierBatch};
use brokerage_intake::workflows::intake::{
    form_progress, FormDraft, FormSchema, IdentifierKind, ValidationReport,
};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct IdentifierValidateArgs {
    /// Identifier type: nip, pesel, regon or krs
    #[arg(long, value_parser = parse_identifier_kind)]
    pub(crate) kind: IdentifierKind,
    /// Raw value as entered by the client; separators are ignored
    pub(crate) value: String,
}

#[derive(Args, Debug)]
pub(crate) struct IdentifierCheckArgs {
    /// CSV file with `kind,value[,reference]` columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only print rows that failed
    #[arg(long)]
    pub(crate) failures_only: bool,
}

#[derive(Args, Debug)]
pub(crate) struct IntakeCheckArgs {
    /// Form draft JSON file (camelCase keys, as sent by the web form)
    pub(crate) draft: PathBuf,
    /// Apply the submission rules as well, rejecting `userType: none`
    #[arg(long)]
    pub(crate) submission: bool,
}

pub(crate) fn run_identifier_validate(args: IdentifierValidateArgs) -> Result<(), AppError> {
    let result = args.kind.validate(&args.value);
    let sanitized = result.sanitized_value.as_deref().unwrap_or("-");

    match result.error.as_deref() {
        None => println!("{} {}: valid", args.kind, sanitized),
        Some(message) => println!("{} {}: invalid ({})", args.kind, sanitized, message),
    }
    Ok(())
}

pub(crate) fn run_identifier_check(args: IdentifierCheckArgs) -> Result<(), AppError> {
    let report = IdentifierBatch::from_path(&args.csv)?;

    println!("Identifier check: {}", args.csv.display());
    println!(
        "  {} rows, {} valid, {} invalid, {} unknown kind",
        report.summary.total,
        report.summary.valid,
        report.summary.invalid,
        report.summary.unknown_kind
    );

    for entry in &report.entries {
        if args.failures_only && entry.is_valid() {
            continue;
        }
        let reference = entry.reference.as_deref().unwrap_or("-");
        match &entry.outcome {
            BatchOutcome::Checked { kind, result } => println!(
                "  line {:>4} [{}] {} {}: {}",
                entry.line,
                reference,
                kind,
                entry.value,
                result.error.as_deref().unwrap_or("valid")
            ),
            BatchOutcome::UnknownKind { kind } => println!(
                "  line {:>4} [{}] unknown identifier kind '{}'",
                entry.line, reference, kind
            ),
        }
    }

    Ok(())
}

pub(crate) fn run_intake_check(args: IntakeCheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let schema = FormSchema::from_config(&config.intake);
    let raw = std::fs::read_to_string(&args.draft)?;
    let draft: FormDraft = serde_json::from_str(&raw)?;

    let outcome = if args.submission {
        schema
            .prepare_submission(&draft)
            .map(|record| serde_json::to_string_pretty(&record))
    } else {
        schema
            .validate(&draft)
            .map(|form| serde_json::to_string_pretty(&form))
    };

    match outcome {
        Ok(rendered) => {
            println!("Draft {} is valid:", args.draft.display());
            println!("{}", rendered?);
        }
        Err(report) => {
            print_issues(&report);
            let progress = form_progress(&schema, &draft);
            println!(
                "Progress: {}/{} steps complete",
                progress.completed_steps, progress.total_steps
            );
        }
    }

    Ok(())
}

pub(crate) fn print_issues(report: &ValidationReport) {
    println!("{}:", report);
    for issue in &report.issues {
        println!(
            "  {:<40} {:<20} {}",
            issue.dotted_path(),
            format!("{:?}", issue.kind),
            issue.message
        );
    }
}
