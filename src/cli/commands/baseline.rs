//! `secrethawk baseline` commands: create and update the suppression file
//! from the current findings.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand, ValueHint};

use crate::{
    baseline::BaselineFile,
    scanner::{self, ScanOptions},
    severity::Severity,
};

#[derive(Args, Debug, Clone)]
pub struct BaselineArgs {
    #[command(subcommand)]
    pub command: BaselineCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BaselineCommand {
    /// Create a baseline from the current findings
    Create(BaselineWriteArgs),
    /// Merge the current findings into an existing baseline
    Update(BaselineWriteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BaselineWriteArgs {
    /// Directory to scan
    #[arg(default_value = ".", value_hint = ValueHint::DirPath)]
    pub target: PathBuf,

    /// Baseline file path
    #[arg(long, value_name = "FILE", default_value = ".secrethawk/baseline.json")]
    pub baseline: PathBuf,

    /// Policy file path
    #[arg(long, value_name = "FILE", default_value = ".secrethawk/policy.yaml")]
    pub policy: PathBuf,

    /// Path to custom rules (file or directory)
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Status recorded on each entry
    #[arg(long, default_value = "accepted")]
    pub status: String,

    /// Reason recorded on each entry
    #[arg(long, default_value = "")]
    pub reason: String,

    /// Actor recorded on each entry
    #[arg(long, default_value = "secrethawk")]
    pub added_by: String,
}

pub async fn run(args: &BaselineArgs) -> Result<u8> {
    let (write_args, start_from_existing) = match &args.command {
        BaselineCommand::Create(write_args) => (write_args, false),
        BaselineCommand::Update(write_args) => (write_args, true),
    };

    // Scan without baseline suppression so already-accepted findings are
    // refreshed rather than invisible.
    let mut opts = ScanOptions::new(&write_args.target);
    opts.policy_path = Some(write_args.policy.clone());
    opts.rules_path = write_args.rules.clone();
    opts.severity = Severity::Low;
    let outcome = scanner::run(&opts).await?;

    let mut baseline = if start_from_existing {
        BaselineFile::load(Some(&write_args.baseline))?
    } else {
        BaselineFile::empty()
    };
    baseline.upsert(
        &outcome.report.findings,
        &write_args.status,
        &write_args.reason,
        &write_args.added_by,
    );
    baseline.save(&write_args.baseline)?;

    println!(
        "baseline written: {} ({} entries)",
        write_args.baseline.display(),
        baseline.entries.len()
    );
    Ok(0)
}
