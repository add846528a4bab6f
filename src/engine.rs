//! The encoding pipeline.
//!
//! intent -> validate -> derive + encode instruction -> assemble (one await
//! on the blockhash fetch) -> estimate fee -> envelope. Every failure is
//! normalized into a failure envelope at this boundary.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use solana_sdk::pubkey::Pubkey;
use tracing::{info, warn};

use crate::assemble::assemble;
use crate::config::Registry;
use crate::domain::{EncodedTransaction, TradeIntent, Venue};
use crate::error::EncodeError;
use crate::fees;
use crate::gateway::NetworkGateway;
use crate::response::{EncodeResponse, EncodingResult};
use crate::validate::validate;

/// Shared, immutable encoding engine. Cheap to clone; each request runs as
/// its own task and owns its intent exclusively — the registry is the only
/// shared state, and it is read-only.
#[derive(Clone)]
pub struct Engine {
    registry: Arc<Registry>,
    gateway: Arc<dyn NetworkGateway>,
}

impl Engine {
    pub fn new(registry: Arc<Registry>, gateway: Arc<dyn NetworkGateway>) -> Self {
        Self { registry, gateway }
    }

    /// Encodes one trade. Infallible at the type level: errors come back
    /// inside the envelope, never as `Err` or a panic.
    pub async fn encode(&self, venue: Venue, intent: TradeIntent) -> EncodeResponse {
        info!(
            venue = %venue,
            operation = intent.operation.as_str(),
            wallet = %intent.wallet_address,
            mint = %intent.token_mint,
            amount = %intent.amount,
            network = intent.network().as_str(),
            "encode.start"
        );

        let result = match self.try_encode(venue, &intent).await {
            Ok((transaction, fee)) => {
                let result = EncodingResult::success(transaction, fee, venue);
                if let EncodingResult::Success { correlation_id, .. } = &result {
                    info!(venue = %venue, correlation_id = %correlation_id, fee_lamports = fee, "encode.ok");
                }
                result
            }
            Err(e) => {
                warn!(venue = %venue, code = e.error_code(), error = %e, "encode.failed");
                EncodingResult::failure(&e)
            }
        };

        result.into()
    }

    /// `encode` bounded by a caller-imposed wall-clock timeout. On expiry the
    /// in-flight gateway call is abandoned and the caller sees a network
    /// failure envelope.
    pub async fn encode_with_timeout(
        &self,
        venue: Venue,
        intent: TradeIntent,
        timeout: Duration,
    ) -> EncodeResponse {
        match tokio::time::timeout(timeout, self.encode(venue, intent)).await {
            Ok(resp) => resp,
            Err(_) => {
                warn!(venue = %venue, ?timeout, "encode.timeout");
                let e = EncodeError::network("encode", format!("timed out after {timeout:?}"));
                EncodingResult::failure(&e).into()
            }
        }
    }

    async fn try_encode(
        &self,
        venue: Venue,
        intent: &TradeIntent,
    ) -> Result<(EncodedTransaction, u64), EncodeError> {
        let cfg = self.registry.venue(venue);

        // Static checks first; nothing below runs on a rejected intent.
        let amount = validate(intent, cfg)?;

        let instruction = venue.encoder().build_instruction(intent, amount, cfg)?;

        let fee_payer = Pubkey::from_str(&intent.wallet_address)
            .map_err(|e| EncodeError::encoding(venue, format!("fee payer: {e}")))?;

        let transaction = assemble(
            fee_payer,
            std::slice::from_ref(&instruction),
            intent.network(),
            self.gateway.as_ref(),
        )
        .await?;

        let fee = fees::estimate_fee(transaction.instruction_count);
        Ok((transaction, fee))
    }
}
