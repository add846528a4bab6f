//! Syntactic and semantic checks on a trade intent.
//!
//! Pure and synchronous: validation never touches the network, and the
//! pipeline must not proceed to derivation or encoding once it fails.

use crate::config::VenueConfig;
use crate::domain::TradeIntent;
use crate::error::EncodeError;

const ADDRESS_MIN_LEN: usize = 32;
const ADDRESS_MAX_LEN: usize = 44;

/// Base58 public-key alphabet (no 0, O, I, l).
fn is_base58(s: &str) -> bool {
    !s.is_empty() && bs58::decode(s).into_vec().is_ok()
}

fn check_address(field: &'static str, value: &str) -> Result<(), EncodeError> {
    if value.len() < ADDRESS_MIN_LEN || value.len() > ADDRESS_MAX_LEN {
        return Err(EncodeError::validation(
            field,
            format!(
                "length must be {ADDRESS_MIN_LEN}-{ADDRESS_MAX_LEN} characters, got {}",
                value.len()
            ),
        ));
    }
    if !is_base58(value) {
        return Err(EncodeError::validation(
            field,
            "must contain only base58 characters",
        ));
    }
    Ok(())
}

/// Validates an intent against a venue config.
///
/// Checks run in a fixed order and short-circuit on the first violation.
/// Returns the parsed amount so callers don't re-parse it.
pub fn validate(intent: &TradeIntent, cfg: &VenueConfig) -> Result<u64, EncodeError> {
    check_address("walletAddress", &intent.wallet_address)?;
    check_address("tokenMint", &intent.token_mint)?;

    let amount: u64 = intent
        .amount
        .parse()
        .map_err(|_| EncodeError::validation("amount", "must be a positive integer"))?;
    if amount == 0 {
        return Err(EncodeError::validation("amount", "must be a positive integer"));
    }

    if amount < cfg.min_amount {
        return Err(EncodeError::validation(
            "amount",
            format!("must be at least {}", cfg.min_amount),
        ));
    }

    if intent.slippage_bps > cfg.max_slippage_bps {
        return Err(EncodeError::validation(
            "slippageBps",
            format!("must be between 0 and {}", cfg.max_slippage_bps),
        ));
    }

    // Operation validity is enforced by the `Operation` enum at the
    // deserialization boundary; nothing left to check here.
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Operation;

    fn cfg() -> VenueConfig {
        VenueConfig {
            program_id: "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8".into(),
            fee_rate: 0.0025,
            min_amount: 1_000,
            max_slippage_bps: 5_000,
            rpc_timeout_ms: 30_000,
            max_retries: 3,
        }
    }

    fn intent() -> TradeIntent {
        TradeIntent {
            wallet_address: "So11111111111111111111111111111111111111112".into(),
            token_mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".into(),
            amount: "1000000".into(),
            slippage_bps: 100,
            operation: Operation::Buy,
            priority_fee: None,
            max_wait_secs: None,
            use_mainnet: true,
        }
    }

    fn field_of(err: EncodeError) -> &'static str {
        match err {
            EncodeError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn accepts_well_formed_intent() {
        assert_eq!(validate(&intent(), &cfg()).unwrap(), 1_000_000);
    }

    #[test]
    fn rejects_short_and_long_addresses() {
        let mut i = intent();
        i.wallet_address = "tooshort".into();
        assert_eq!(field_of(validate(&i, &cfg()).unwrap_err()), "walletAddress");

        let mut i = intent();
        i.token_mint = "1".repeat(45);
        assert_eq!(field_of(validate(&i, &cfg()).unwrap_err()), "tokenMint");
    }

    #[test]
    fn rejects_non_base58_characters() {
        let mut i = intent();
        // '0', 'O', 'I' and 'l' are outside the alphabet; '_' certainly is.
        i.wallet_address = "invalid_wallet_address_invalid_wallet_ad".into();
        assert_eq!(field_of(validate(&i, &cfg()).unwrap_err()), "walletAddress");
    }

    #[test]
    fn rejects_zero_negative_and_garbage_amounts() {
        for bad in ["0", "-5", "12.5", "abc", ""] {
            let mut i = intent();
            i.amount = bad.into();
            assert_eq!(field_of(validate(&i, &cfg()).unwrap_err()), "amount", "amount={bad}");
        }
    }

    #[test]
    fn rejects_amount_below_minimum_naming_it() {
        let mut i = intent();
        i.amount = "100".into();
        match validate(&i, &cfg()).unwrap_err() {
            EncodeError::Validation { field, reason } => {
                assert_eq!(field, "amount");
                assert!(reason.contains("1000"), "message names the minimum: {reason}");
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn rejects_slippage_above_ceiling() {
        let mut i = intent();
        i.slippage_bps = 5_001;
        assert_eq!(field_of(validate(&i, &cfg()).unwrap_err()), "slippageBps");
    }

    #[test]
    fn checks_short_circuit_in_order() {
        // Both the wallet and the amount are bad; the wallet must win.
        let mut i = intent();
        i.wallet_address = "bad".into();
        i.amount = "0".into();
        assert_eq!(field_of(validate(&i, &cfg()).unwrap_err()), "walletAddress");
    }
}
