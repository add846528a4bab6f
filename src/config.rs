use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::domain::Venue;

/// Per-venue parameters. Read-only after startup; shared by every
/// concurrent encoding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Base58 program address of the venue's on-chain program.
    pub program_id: String,

    /// Venue fee as a fraction of the traded amount (0.003 => 0.3%).
    pub fee_rate: f64,

    /// Smallest accepted amount, in base units.
    pub min_amount: u64,

    /// Hard ceiling on tolerated slippage, in basis points.
    pub max_slippage_bps: u32,

    pub rpc_timeout_ms: u64,
    pub max_retries: u32,
}

impl VenueConfig {
    pub fn program_pubkey(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.program_id)
            .map_err(|e| anyhow!("invalid program id {}: {e}", self.program_id))
    }

    /// Venue fee for a given amount, in base units.
    pub fn fee_for(&self, amount: u64) -> f64 {
        amount as f64 * self.fee_rate
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcSettings {
    pub mainnet_url: String,
    pub devnet_url: String,
    pub timeout_ms: u64,
    pub max_retries: u32,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            mainnet_url: "https://api.mainnet-beta.solana.com".to_string(),
            devnet_url: "https://api.devnet.solana.com".to_string(),
            timeout_ms: 30_000,
            max_retries: 3,
        }
    }
}

/// Static registry of venue configurations plus RPC settings.
///
/// Built once at startup, then shared behind an `Arc`; nothing mutates it
/// mid-request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub rpc: RpcSettings,
    venues: HashMap<Venue, VenueConfig>,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|x| x.parse().ok())
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Registry {
    /// Registry with the shipped per-venue defaults.
    pub fn with_defaults() -> Self {
        let mut venues = HashMap::new();
        venues.insert(
            Venue::Pumpfun,
            VenueConfig {
                program_id: "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P".to_string(),
                fee_rate: 0.01,
                min_amount: 1_000,
                max_slippage_bps: 5_000,
                rpc_timeout_ms: 30_000,
                max_retries: 3,
            },
        );
        venues.insert(
            Venue::PumpSwap,
            VenueConfig {
                program_id: "pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA".to_string(),
                fee_rate: 0.0025,
                min_amount: 1_000,
                max_slippage_bps: 5_000,
                rpc_timeout_ms: 30_000,
                max_retries: 3,
            },
        );
        venues.insert(
            Venue::Raydium,
            VenueConfig {
                program_id: "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8".to_string(),
                fee_rate: 0.0025,
                min_amount: 1_000,
                max_slippage_bps: 5_000,
                rpc_timeout_ms: 30_000,
                max_retries: 3,
            },
        );
        Self {
            rpc: RpcSettings::default(),
            venues,
        }
    }

    /// Defaults overridden from the environment: every knob has a default,
    /// env wins when present.
    pub fn from_env() -> Result<Self> {
        let mut reg = Self::with_defaults();

        reg.rpc.mainnet_url = env_string("DEX_RPC_MAINNET_URL", &reg.rpc.mainnet_url);
        reg.rpc.devnet_url = env_string("DEX_RPC_DEVNET_URL", &reg.rpc.devnet_url);
        if let Some(v) = env_parse::<u64>("DEX_RPC_TIMEOUT_MS") {
            reg.rpc.timeout_ms = v;
        }
        if let Some(v) = env_parse::<u32>("DEX_RPC_MAX_RETRIES") {
            reg.rpc.max_retries = v;
        }
        if reg.rpc.timeout_ms == 0 {
            return Err(anyhow!("DEX_RPC_TIMEOUT_MS cannot be 0"));
        }

        for venue in Venue::ALL {
            let prefix = venue.as_str().to_uppercase();
            let cfg = reg
                .venues
                .get_mut(&venue)
                .ok_or_else(|| anyhow!("missing default config for {venue}"))?;

            if let Ok(v) = std::env::var(format!("{prefix}_PROGRAM_ID")) {
                cfg.program_id = v;
            }
            if let Some(v) = env_parse::<f64>(&format!("{prefix}_FEE_RATE")) {
                cfg.fee_rate = v;
            }
            if let Some(v) = env_parse::<u64>(&format!("{prefix}_MIN_AMOUNT")) {
                cfg.min_amount = v;
            }
            if let Some(v) = env_parse::<u32>(&format!("{prefix}_MAX_SLIPPAGE_BPS")) {
                cfg.max_slippage_bps = v;
            }
            cfg.rpc_timeout_ms = reg.rpc.timeout_ms;
            cfg.max_retries = reg.rpc.max_retries;

            // Fail fast on a malformed program id rather than per-request.
            cfg.program_pubkey()?;
        }

        Ok(reg)
    }

    pub fn venue(&self, venue: Venue) -> &VenueConfig {
        // All three venues are seeded in every constructor.
        &self.venues[&venue]
    }

    pub fn supported_venues(&self) -> impl Iterator<Item = Venue> + '_ {
        self.venues.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_venues() {
        let reg = Registry::with_defaults();
        for venue in Venue::ALL {
            let cfg = reg.venue(venue);
            assert!(cfg.program_pubkey().is_ok(), "{venue} program id parses");
            assert!(cfg.min_amount > 0);
            assert!(cfg.max_slippage_bps <= 10_000);
        }
    }

    #[test]
    fn fee_for_scales_with_amount() {
        let reg = Registry::with_defaults();
        let cfg = reg.venue(Venue::Raydium);
        assert!((cfg.fee_for(1_000_000) - 1_000_000.0 * cfg.fee_rate).abs() < f64::EPSILON);
    }
}
