//! WPOKT bridge harness binary.
//!
//! Loads the configuration, funds the payer and runs the end-to-end
//! scenarios against the configured ledger.

use std::env;

use anyhow::Context;
use solana_sdk::signature::Signer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wpokt_bridge_harness::{
    load_keypair, programs, scenario, HarnessConfig, Ledger, RpcLedger, Session,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wpokt_bridge_harness=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from HARNESS_CONFIG, falling back to the CLI config and environment
    let config = match env::var("HARNESS_CONFIG") {
        Ok(path) => HarnessConfig::load_from_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        Err(_) => HarnessConfig::from_env(),
    };
    let config = programs::locate_programs(config)?;
    config.validate()?;

    tracing::info!("Starting WPOKT bridge harness");
    tracing::info!("RPC URL: {}", config.rpc_url);
    tracing::info!("Commitment: {}", config.commitment.as_str());

    let keypair_path = config.resolved_keypair_path();
    let payer = load_keypair(&keypair_path)?;
    tracing::info!("Payer: {}", payer.pubkey());

    let ledger = RpcLedger::new(&config);
    tracing::info!("Ledger slot: {}", ledger.get_slot().await?);
    let session = Session::new(ledger, payer, config)?;
    if let Some(signature) = session.fund_payer().await? {
        tracing::info!("Payer funded by airdrop {}", signature);
    }

    match session.bridge_program_id() {
        Ok(program_id) => scenario::check_derivation(&program_id)?,
        Err(e) => tracing::warn!("Skipping derivation checks: {}", e),
    }

    match session.wpokt_program_id() {
        Ok(_) => {
            let run = scenario::run_wpokt(&session).await?;
            tracing::info!("WPOKT scenario passed with mint {}", run.mint);
        }
        Err(e) => tracing::warn!("Skipping WPOKT scenario: {}", e),
    }

    if session.bridge_program_id().is_ok() && session.wpokt_program_id().is_ok() {
        let run = scenario::run_bridge(&session).await?;
        tracing::info!("Bridge scenario passed at {}", run.bridge);
    } else {
        tracing::warn!("Skipping bridge scenario: both program ids are required");
    }

    tracing::info!("Harness finished");
    Ok(())
}
