//! Raydium AMM v4 venue (swap routed through a Serum market).
//!
//! Layout (little-endian, 64-byte buffer):
//!   [0]     opcode             swap_base_in=9 (buy) / swap_base_out=11 (sell)
//!   [1..9]  amount in          u64, base units
//!   [9..17] minimum amount out u64, floor(amount * (1 - slippage))
//! Tail zero-padded.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::config::VenueConfig;
use crate::derive;
use crate::domain::{Operation, TradeIntent, Venue};
use crate::error::EncodeError;

use super::{
    check_len, min_amount_out, parse_address, read_u64, PayloadWriter, VenueEncoder, DATA_LEN,
};

const OP_SWAP_BASE_IN: u8 = 9;
const OP_SWAP_BASE_OUT: u8 = 11;

const OFF_AMOUNT_IN: usize = 1;
const OFF_MIN_OUT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaydiumArgs {
    pub operation: Operation,
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}

impl RaydiumArgs {
    pub fn encode(&self) -> [u8; DATA_LEN] {
        let opcode = if self.operation.is_buy() {
            OP_SWAP_BASE_IN
        } else {
            OP_SWAP_BASE_OUT
        };
        let mut w = PayloadWriter::new(opcode);
        w.put_u64(OFF_AMOUNT_IN, self.amount_in)
            .put_u64(OFF_MIN_OUT, self.minimum_amount_out);
        w.finish()
    }

    pub fn decode(data: &[u8]) -> Result<Self, EncodeError> {
        check_len(Venue::Raydium, data)?;
        let operation = match data[0] {
            OP_SWAP_BASE_IN => Operation::Buy,
            OP_SWAP_BASE_OUT => Operation::Sell,
            other => {
                return Err(EncodeError::encoding(
                    Venue::Raydium,
                    format!("unknown opcode {other}"),
                ))
            }
        };
        Ok(Self {
            operation,
            amount_in: read_u64(data, OFF_AMOUNT_IN),
            minimum_amount_out: read_u64(data, OFF_MIN_OUT),
        })
    }
}

pub struct RaydiumEncoder;

impl RaydiumEncoder {
    /// Source/destination token accounts swap places with the direction.
    fn user_sides(wallet: &Pubkey, mint: &Pubkey, operation: Operation) -> (Pubkey, Pubkey) {
        let token = derive::prefixed_user_token_account(wallet, mint);
        if operation.is_buy() {
            (*wallet, token)
        } else {
            (token, *wallet)
        }
    }
}

impl VenueEncoder for RaydiumEncoder {
    fn venue(&self) -> Venue {
        Venue::Raydium
    }

    fn build_instruction(
        &self,
        intent: &TradeIntent,
        amount: u64,
        cfg: &VenueConfig,
    ) -> Result<Instruction, EncodeError> {
        let venue = self.venue();
        let program_id = parse_address(venue, "programId", &cfg.program_id)?;
        let wallet = parse_address(venue, "walletAddress", &intent.wallet_address)?;
        let mint = parse_address(venue, "tokenMint", &intent.token_mint)?;

        let amm_id = derive::program_account(&program_id, &format!("amm_{mint}"), &mint);
        let amm_open_orders =
            derive::program_account(&program_id, &format!("amm_open_orders_{mint}"), &mint);
        let amm_target_orders =
            derive::program_account(&program_id, &format!("amm_target_orders_{mint}"), &mint);
        let pool_coin = derive::program_account(&program_id, &format!("pool_coin_{mint}"), &mint);
        let pool_pc = derive::program_account(&program_id, &format!("pool_pc_{mint}"), &mint);

        let serum = derive::SERUM_PROGRAM;
        let serum_market =
            derive::program_account(&serum, &format!("serum_market_{mint}"), &mint);
        let serum_bids = derive::program_account(&serum, &format!("serum_bids_{mint}"), &mint);
        let serum_asks = derive::program_account(&serum, &format!("serum_asks_{mint}"), &mint);
        let serum_event_queue =
            derive::program_account(&serum, &format!("serum_event_queue_{mint}"), &mint);

        let (user_source, user_dest) = Self::user_sides(&wallet, &mint, intent.operation);

        let args = RaydiumArgs {
            operation: intent.operation,
            amount_in: amount,
            minimum_amount_out: min_amount_out(amount, intent.slippage_bps),
        };

        // Raydium puts the signing wallet last; everything else follows the
        // AMM v4 swap layout.
        let accounts = vec![
            AccountMeta::new_readonly(derive::TOKEN_PROGRAM, false),
            AccountMeta::new(amm_id, false),
            AccountMeta::new_readonly(derive::RAYDIUM_AMM_AUTHORITY, false),
            AccountMeta::new(amm_open_orders, false),
            AccountMeta::new(amm_target_orders, false),
            AccountMeta::new(pool_coin, false),
            AccountMeta::new(pool_pc, false),
            AccountMeta::new_readonly(serum, false),
            AccountMeta::new(serum_market, false),
            AccountMeta::new(serum_bids, false),
            AccountMeta::new(serum_asks, false),
            AccountMeta::new(serum_event_queue, false),
            AccountMeta::new(user_source, false),
            AccountMeta::new(user_dest, false),
            AccountMeta::new(wallet, true),
        ];

        Ok(Instruction::new_with_bytes(program_id, &args.encode(), accounts))
    }
}
