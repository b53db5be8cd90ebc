//! `secrethawk connector` commands: list, test, rotate.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

use crate::connector::Registry;

#[derive(Args, Debug, Clone)]
pub struct ConnectorArgs {
    #[command(subcommand)]
    pub command: ConnectorCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConnectorCommand {
    /// List available connectors
    List,
    /// Test connector configuration
    Test {
        /// Connector name
        #[arg(long, value_name = "NAME")]
        name: String,
    },
    /// Rotate a secret with a connector
    Rotate {
        /// Connector name
        #[arg(long, value_name = "NAME")]
        name: String,
        /// Secret value
        #[arg(long, value_name = "SECRET")]
        secret: String,
    },
}

pub async fn run(args: &ConnectorArgs) -> Result<u8> {
    let registry = Registry::new();
    match &args.command {
        ConnectorCommand::List => {
            for connector in registry.iter() {
                println!("{} ({})", connector.name(), connector.display_name());
            }
            Ok(0)
        }
        ConnectorCommand::Test { name } => {
            let connector =
                registry.by_name(name).ok_or_else(|| anyhow!("connector not found: {name}"))?;
            let preflight = connector.preflight().await?;
            if preflight.ready {
                println!("connector {name} ready");
                return Ok(0);
            }
            println!("connector {name} missing prerequisites:");
            for item in &preflight.missing {
                println!("- {}: {} ({})", item.name, item.description, item.how_to_fix);
            }
            Err(anyhow!("connector preflight failed"))
        }
        ConnectorCommand::Rotate { name, secret } => {
            let connector =
                registry.by_name(name).ok_or_else(|| anyhow!("connector not found: {name}"))?;
            let result = connector.rotate(secret).await?;
            println!(
                "rotate result: revoked={} new_key={} stored_at={}",
                result.old_key_revoked, result.new_key_id, result.stored_at
            );
            Ok(0)
        }
    }
}
