//! Deterministic account derivation.
//!
//! Addresses are computed with Solana's `create_with_seed` from an owner key
//! and a semantic seed string. When derivation fails (seed over the 32-byte
//! limit, malformed base key) we degrade to a fallback address instead of
//! aborting the request. This mirrors the venue integrations as shipped and
//! is NOT a correct PDA algorithm; instructions built from fallback addresses
//! may reference accounts that do not match the real on-chain derivation.

use solana_sdk::pubkey::Pubkey;
use tracing::warn;

pub const SYSTEM_PROGRAM: Pubkey =
    solana_sdk::pubkey!("11111111111111111111111111111111");
pub const TOKEN_PROGRAM: Pubkey =
    solana_sdk::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ASSOCIATED_TOKEN_PROGRAM: Pubkey =
    solana_sdk::pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// USDC mint, used as the quote side for pair-style venues.
pub const USDC_MINT: Pubkey =
    solana_sdk::pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

pub const RAYDIUM_AMM_AUTHORITY: Pubkey =
    solana_sdk::pubkey!("5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1");
pub const SERUM_PROGRAM: Pubkey =
    solana_sdk::pubkey!("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin");

/// Seed-based derivation with a degraded fallback.
///
/// Callers must not assume the result matches the venue's real on-chain
/// address; the fallback substitutes the mint or wallet on failure.
pub fn derive_with_seed(base: &Pubkey, seed: &str, owner: &Pubkey, fallback: Pubkey) -> Pubkey {
    match Pubkey::create_with_seed(base, seed, owner) {
        Ok(addr) => addr,
        Err(e) => {
            warn!(seed, %fallback, error = %e, "derive.fallback");
            fallback
        }
    }
}

/// The user's token account for a mint.
///
/// Seed is the concatenated wallet and mint addresses; falls back to the
/// wallet itself.
pub fn user_token_account(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    let seed = format!("{wallet}{mint}");
    derive_with_seed(wallet, &seed, &TOKEN_PROGRAM, *wallet)
}

/// Prefixed variant used by the pair-style venues; same fallback.
pub fn prefixed_user_token_account(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    let seed = format!("user_token_{wallet}_{mint}");
    derive_with_seed(wallet, &seed, &TOKEN_PROGRAM, *wallet)
}

/// A venue pool-side account owned by the venue program; falls back to the
/// mint.
pub fn program_account(program_id: &Pubkey, seed: &str, mint: &Pubkey) -> Pubkey {
    derive_with_seed(program_id, seed, program_id, *mint)
}
