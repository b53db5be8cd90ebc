use std::process::ExitCode;

use anyhow::{Context, Result};
use secrethawk::cli::{commands, Command, CommandLineArgs, GlobalArgs};
use tokio::runtime::Builder;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, registry, util::SubscriberInitExt,
};

fn main() -> ExitCode {
    let args = CommandLineArgs::parse_args();
    setup_logging(&args.global_args);

    let runtime = match Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(2);
        }
    };

    match runtime.block_on(dispatch(args)) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn dispatch(args: CommandLineArgs) -> Result<u8> {
    match &args.command {
        Command::Scan(scan_args) => commands::scan::run(&args.global_args, scan_args).await,
        Command::Validate(validate_args) => commands::validate::run(validate_args).await,
        Command::Patch(patch_args) => commands::patch::run(patch_args).await,
        Command::Policy(policy_args) => commands::policy::run(policy_args),
        Command::Connector(connector_args) => commands::connector::run(connector_args).await,
        Command::Baseline(baseline_args) => commands::baseline::run(baseline_args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}

fn setup_logging(global_args: &GlobalArgs) {
    // Findings go to stdout; logs stay on stderr.
    let level = if global_args.quiet {
        LevelFilter::ERROR
    } else {
        match global_args.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let filter = tracing_subscriber::filter::Targets::new()
        .with_default(LevelFilter::ERROR)
        .with_target("secrethawk", level);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .without_time();

    registry().with(fmt_layer).with(filter).init();
}
