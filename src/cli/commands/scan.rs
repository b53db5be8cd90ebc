//! `secrethawk scan` command.

use std::{
    fs::File,
    io::{BufWriter, IsTerminal},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Args, ValueHint};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    cli::global::GlobalArgs,
    reporter::{ReportOutputFormat, ReportWriter},
    scanner::{self, ScanOptions},
    severity::Severity,
};

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// File or directory to scan
    #[arg(default_value = ".", value_hint = ValueHint::AnyPath)]
    pub target: PathBuf,

    /// Scan only staged files
    #[arg(long, default_value_t = false)]
    pub staged: bool,

    /// Scan changes since the given commit or branch ref
    #[arg(long, value_name = "REF")]
    pub since: Option<String>,

    /// Scan the complete git history
    #[arg(long, default_value_t = false)]
    pub all_history: bool,

    /// Path to custom rules (file or directory)
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Policy file path
    #[arg(long, value_name = "FILE", default_value = ".secrethawk/policy.yaml")]
    pub policy: PathBuf,

    /// Baseline file path
    #[arg(long, value_name = "FILE", default_value = ".secrethawk/baseline.json")]
    pub baseline: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: ReportOutputFormat,

    /// Output file path (stdout when omitted)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Minimum reported severity
    #[arg(long, default_value = "low")]
    pub severity: Severity,

    /// Validate whether found secrets are active
    #[arg(long, default_value_t = false)]
    pub validate: bool,

    /// Exit non-zero when findings at or above this severity exist
    #[arg(long, value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,

    /// Only count validated-active findings toward --fail-on
    #[arg(long, default_value_t = false)]
    pub fail_on_active: bool,

    /// Skip files larger than this size in megabytes
    #[arg(long, default_value_t = 50, value_name = "MB")]
    pub max_target_megabytes: u64,

    /// Parallel scanning workers (0 = one per CPU)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,
}

impl ScanArgs {
    pub fn to_scan_options(&self) -> ScanOptions {
        let mut opts = ScanOptions::new(&self.target);
        opts.staged = self.staged;
        opts.since_ref = self.since.clone();
        opts.all_history = self.all_history;
        opts.rules_path = self.rules.clone();
        opts.policy_path = Some(self.policy.clone());
        opts.baseline_path = Some(self.baseline.clone());
        opts.severity = self.severity;
        opts.validate = self.validate;
        opts.fail_on = self.fail_on;
        opts.fail_on_active = self.fail_on_active;
        opts.max_target_megabytes = self.max_target_megabytes;
        opts.threads = self.threads;
        opts
    }
}

pub async fn run(global_args: &GlobalArgs, args: &ScanArgs) -> Result<u8> {
    let opts = args.to_scan_options();

    let progress = scan_progress(global_args);
    let outcome = scanner::run(&opts).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let outcome = outcome?;

    let writer = ReportWriter::new(args.output.is_none());
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create output file {}", path.display()))?;
            writer.report(args.format, &outcome.report, BufWriter::new(file))?;
        }
        None => {
            writer.report(args.format, &outcome.report, std::io::stdout().lock())?;
        }
    }

    if outcome.should_fail {
        eprintln!("error: findings reached fail-on threshold");
        return Ok(1);
    }
    Ok(0)
}

fn scan_progress(global_args: &GlobalArgs) -> Option<ProgressBar> {
    if global_args.quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner().with_message("scanning");
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or(ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}
