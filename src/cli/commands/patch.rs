//! `secrethawk patch` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueHint};

use crate::patch::{self, PatchOptions, ReplaceStrategy};

#[derive(Args, Debug, Clone)]
pub struct PatchArgs {
    /// Directory whose findings should be patched
    #[arg(default_value = ".", value_hint = ValueHint::DirPath)]
    pub target: PathBuf,

    /// Path to custom rules (file or directory)
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Policy file path
    #[arg(long, value_name = "FILE", default_value = ".secrethawk/policy.yaml")]
    pub policy: PathBuf,

    /// Baseline file path
    #[arg(long, value_name = "FILE", default_value = ".secrethawk/baseline.json")]
    pub baseline: PathBuf,

    /// Replacement strategy
    #[arg(long, value_enum, default_value = "env")]
    pub replace_with: ReplaceStrategy,

    /// Prefix for generated environment variable names
    #[arg(long, value_name = "PREFIX", default_value = "")]
    pub var_prefix: String,

    /// Report what would change without touching any file
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

pub async fn run(args: &PatchArgs) -> Result<u8> {
    let mut opts = PatchOptions::new(&args.target);
    opts.rules_path = args.rules.clone();
    opts.policy_path = Some(args.policy.clone());
    opts.baseline_path = Some(args.baseline.clone());
    opts.replace_with = args.replace_with;
    opts.var_prefix = args.var_prefix.clone();
    opts.dry_run = args.dry_run;

    let result = patch::apply(&opts).await?;
    if result.changes.is_empty() {
        println!("no patchable findings");
        return Ok(0);
    }

    let prefix = if args.dry_run { "[dry-run] " } else { "" };
    for change in &result.changes {
        println!(
            "{}{}: {} -> {} ({} occurrence{})",
            prefix,
            change.file,
            change.rule_id,
            change.replacement,
            change.count,
            if change.count == 1 { "" } else { "s" },
        );
    }
    println!("{}{} change(s) applied", prefix, result.changes.len());
    Ok(0)
}
