use serde::{Deserialize, Serialize};
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;

/// Trade direction, as accepted at the API boundary.
///
/// Anything other than "buy"/"sell" is rejected during deserialization,
/// so the rest of the pipeline never sees an invalid operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Buy,
    Sell,
}

impl Operation {
    pub fn is_buy(self) -> bool {
        matches!(self, Operation::Buy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Buy => "buy",
            Operation::Sell => "sell",
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Operation::Buy),
            "sell" => Ok(Operation::Sell),
            other => Err(anyhow::anyhow!("operation must be buy or sell, got {other}")),
        }
    }
}

/// The supported trading venues. Closed set: each venue has its own
/// instruction layout and account order (see `venues`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Pumpfun,
    PumpSwap,
    Raydium,
}

impl Venue {
    pub const ALL: [Venue; 3] = [Venue::Pumpfun, Venue::PumpSwap, Venue::Raydium];

    pub fn as_str(self) -> &'static str {
        match self {
            Venue::Pumpfun => "pumpfun",
            Venue::PumpSwap => "pumpswap",
            Venue::Raydium => "raydium",
        }
    }
}

impl std::str::FromStr for Venue {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pumpfun" => Ok(Venue::Pumpfun),
            "pumpswap" => Ok(Venue::PumpSwap),
            "raydium" => Ok(Venue::Raydium),
            other => Err(anyhow::anyhow!("unknown venue: {other}")),
        }
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Devnet,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Devnet => "devnet",
        }
    }
}

/// One trade to encode. Immutable once constructed; owned by a single
/// pipeline invocation for the duration of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeIntent {
    pub wallet_address: String,

    pub token_mint: String,

    /// Amount in the mint's base units, as a positive decimal integer string.
    pub amount: String,

    /// Tolerated slippage in basis points (1% = 100).
    #[serde(default = "default_slippage_bps")]
    pub slippage_bps: u32,

    pub operation: Operation,

    /// Priority fee in lamports, if the caller wants one encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_fee: Option<u64>,

    /// Seconds the trade may wait before the venue should drop it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wait_secs: Option<u32>,

    #[serde(default = "default_use_mainnet")]
    pub use_mainnet: bool,
}

fn default_slippage_bps() -> u32 {
    100
}

fn default_use_mainnet() -> bool {
    true
}

impl TradeIntent {
    pub fn network(&self) -> Network {
        if self.use_mainnet {
            Network::Mainnet
        } else {
            Network::Devnet
        }
    }

    pub fn priority_fee_or_default(&self) -> u64 {
        self.priority_fee.unwrap_or(0)
    }

    pub fn max_wait_or_default(&self) -> u32 {
        self.max_wait_secs.unwrap_or(30)
    }
}

/// An unsigned, serialized transaction message. Ephemeral: the engine never
/// stores it; persistence is the caller's business.
#[derive(Debug, Clone)]
pub struct EncodedTransaction {
    /// base64 of the canonical wire-format message (no signature bytes).
    pub transaction_base64: String,
    pub fee_payer: Pubkey,
    pub blockhash: Hash,
    pub instruction_count: usize,
}
