//! Unsigned transaction assembly.
//!
//! Compiles the fee payer, the latest blockhash, and the instruction list
//! into the canonical legacy wire-format message: fee payer first in the
//! account table, remaining keys deduplicated and ordered by signer/writable
//! flags, then the blockhash and the compiled (program index + account
//! indices + data) instruction list. We serialize the message itself, so no
//! signature bytes are ever written.

use base64::Engine as _;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::domain::{EncodedTransaction, Network};
use crate::error::EncodeError;
use crate::gateway::NetworkGateway;

/// Assembles and serializes an unsigned transaction message.
///
/// The blockhash fetch is the pipeline's only suspension point; the output
/// is deterministic given identical inputs and blockhash.
pub async fn assemble(
    fee_payer: Pubkey,
    instructions: &[Instruction],
    network: Network,
    gateway: &dyn NetworkGateway,
) -> Result<EncodedTransaction, EncodeError> {
    let blockhash = gateway.latest_blockhash(network).await?;

    let message = Message::new_with_blockhash(instructions, Some(&fee_payer), &blockhash);
    let bytes = message.serialize();
    let transaction_base64 = base64::engine::general_purpose::STANDARD.encode(&bytes);

    debug!(
        %fee_payer,
        %blockhash,
        instructions = instructions.len(),
        serialized_len = bytes.len(),
        "assemble.done"
    );

    Ok(EncodedTransaction {
        transaction_base64,
        fee_payer,
        blockhash,
        instruction_count: instructions.len(),
    })
}
