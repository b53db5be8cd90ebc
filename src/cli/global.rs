use clap::{ArgAction, Args, Parser, Subcommand};

use crate::cli::commands::{
    baseline::BaselineArgs, connector::ConnectorArgs, patch::PatchArgs, policy::PolicyArgs,
    scan::ScanArgs, validate::ValidateArgs,
};

#[derive(Parser, Debug)]
#[command(name = "secrethawk", version = env!("CARGO_PKG_VERSION"))]
/// SecretHawk - detect, validate, and remediate leaked secrets
pub struct CommandLineArgs {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Global arguments that apply to all subcommands
    #[command(flatten)]
    pub global_args: GlobalArgs,
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        CommandLineArgs::parse()
    }
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan for secret leaks
    Scan(ScanArgs),

    /// Validate whether findings are still active
    Validate(ValidateArgs),

    /// Replace found secrets with environment-variable references
    Patch(PatchArgs),

    /// Manage scan policies
    Policy(PolicyArgs),

    /// Manage external service connectors
    Connector(ConnectorArgs),

    /// Manage the findings baseline
    Baseline(BaselineArgs),

    /// Print version
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
}
