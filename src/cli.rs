//! # Command Line Interface
//!
//! Trigger entry points for the rotation service: a one-shot manual rotation,
//! an interval scheduler, and the HTTP/event trigger server.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::api::{start_api_server, ApiState};
use crate::config::Config;
use crate::directory::HttpDirectoryClient;
use crate::rotation::{RetirementPolicy, RotationRequest, Rotator};
use crate::vault::{SecretVault, VaultSecretStore};

#[derive(Parser)]
#[command(name = "rotavault")]
#[command(about = "Client credential rotation service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP/event trigger server
    Serve {
        /// Address to bind to (overrides ROTAVAULT_API_BIND_ADDRESS)
        #[arg(short, long)]
        addr: Option<String>,

        /// Port to bind to (overrides ROTAVAULT_API_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one rotation and print the outcome
    Rotate {
        /// Application object ID (overrides ROTAVAULT_APP_OBJECT_ID)
        #[arg(long)]
        app_id: Option<String>,

        /// Secret name (overrides ROTAVAULT_SECRET_NAME)
        #[arg(long)]
        secret_name: Option<String>,

        /// Delete the soonest-expiring credential before issuing
        #[arg(long)]
        retire_oldest: bool,
    },

    /// Rotate on a fixed interval until interrupted
    Schedule {
        /// Seconds between rotation attempts
        #[arg(long, default_value_t = 86_400)]
        interval_seconds: u64,
    },
}

fn build_adapters(config: &Config) -> anyhow::Result<(Arc<Rotator>, Arc<dyn SecretVault>)> {
    let store = Arc::new(HttpDirectoryClient::new(config.directory.clone())?);
    let vault: Arc<dyn SecretVault> = Arc::new(VaultSecretStore::new(config.vault.clone())?);
    let rotator = Arc::new(Rotator::new(store, vault.clone()));
    Ok((rotator, vault))
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve { addr, port } => {
            let mut api_config = config.api.clone();
            if let Some(addr) = addr {
                api_config.bind_address = addr;
            }
            if let Some(port) = port {
                api_config.port = port;
            }

            let (rotator, vault) = build_adapters(&config)?;
            let state = ApiState {
                rotator,
                request: Arc::new(RotationRequest::from(&config.rotation)),
                vault,
            };

            start_api_server(api_config, state).await?;
            Ok(())
        }

        Commands::Rotate { app_id, secret_name, retire_oldest } => {
            let mut request = RotationRequest::from(&config.rotation);
            if let Some(app_id) = app_id {
                request.app_object_id = app_id;
            }
            if let Some(secret_name) = secret_name {
                request.secret_name = secret_name;
            }
            if retire_oldest {
                request.policy = RetirementPolicy::RetireOldestFirst;
            }

            let (rotator, _vault) = build_adapters(&config)?;
            let outcome = rotator.rotate(&request).await?;

            println!("{}", serde_json::to_string_pretty(&outcome)?);

            if outcome.failed() {
                anyhow::bail!("rotation failed; no new secret was stored");
            }
            Ok(())
        }

        Commands::Schedule { interval_seconds } => {
            if interval_seconds == 0 {
                anyhow::bail!("--interval-seconds must be at least 1");
            }

            let request = RotationRequest::from(&config.rotation);
            let (rotator, _vault) = build_adapters(&config)?;

            info!(interval_seconds, "Starting scheduled rotation loop");

            // The first tick fires immediately; a failed attempt is logged
            // and the loop keeps running until interrupted.
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(interval_seconds));
            loop {
                interval.tick().await;
                match rotator.rotate(&request).await {
                    Ok(outcome) if outcome.failed() => {
                        error!(outcome = ?outcome, "Scheduled rotation did not store a new secret");
                    }
                    Ok(outcome) => {
                        info!(
                            fully_rotated = outcome.fully_rotated(),
                            "Scheduled rotation completed"
                        );
                    }
                    Err(e) => {
                        error!(error = %e, "Scheduled rotation failed");
                    }
                }
            }
        }
    }
}
