//! # Sprint-Chain Node Runtime
//!
//! Entry point wiring the chain store, the sprint engine, the milestone
//! verifier and the API backend over one shared event bus.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (filterable via `RUST_LOG`)
//! 2. Load configuration (defaults + environment overrides)
//! 3. Build the node: bus, store, engine, sprint gate, verifier, backend
//! 4. Start the sync pivot guard
//! 5. Run until Ctrl+C

pub mod config;
pub mod guard;
pub mod node;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::load_config;
use crate::node::build_node;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config();
    info!(?config, "starting sprint-chain node");

    let node = build_node(&config);
    let guard_task = node.start();

    info!("node is running, press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;

    info!("shutting down");
    guard_task.abort();

    Ok(())
}
