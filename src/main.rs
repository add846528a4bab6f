use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::info;

use solana_dex_encoder::{
    telemetry, Engine, Operation, Registry, RpcGateway, TradeIntent, Venue,
};

fn env_required(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("{key} is required"))
}

/// One-shot encoder: reads an intent from the environment, encodes it, and
/// prints the response envelope as JSON. HTTP routing lives elsewhere.
#[tokio::main]
async fn main() -> Result<()> {
    // Load local .env if present (no-op in prod/systemd envs)
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let registry = Arc::new(Registry::from_env()?);
    info!(venues = ?registry.supported_venues().collect::<Vec<_>>(), "boot");

    let venue = Venue::from_str(&env_required("DEX_VENUE")?)?;
    let operation = Operation::from_str(&env_required("DEX_OPERATION")?)?;

    let intent = TradeIntent {
        wallet_address: env_required("DEX_WALLET_ADDRESS")?,
        token_mint: env_required("DEX_TOKEN_MINT")?,
        amount: env_required("DEX_AMOUNT")?,
        slippage_bps: std::env::var("DEX_SLIPPAGE_BPS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100),
        operation,
        priority_fee: std::env::var("DEX_PRIORITY_FEE").ok().and_then(|v| v.parse().ok()),
        max_wait_secs: std::env::var("DEX_MAX_WAIT_SECS").ok().and_then(|v| v.parse().ok()),
        use_mainnet: std::env::var("DEX_USE_MAINNET")
            .map(|v| v != "0" && v.to_lowercase() != "false")
            .unwrap_or(true),
    };

    let gateway = Arc::new(RpcGateway::new(&registry.rpc));
    let timeout = Duration::from_millis(registry.rpc.timeout_ms);
    let engine = Engine::new(registry, gateway);

    let response = engine.encode_with_timeout(venue, intent, timeout).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
