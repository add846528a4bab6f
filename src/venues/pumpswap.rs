//! PumpSwap pair venue (token vs USDC).
//!
//! Layout (little-endian, 64-byte buffer):
//!   [0]      opcode        fixed swap=0
//!   [1..9]   amount        u64, base units
//!   [9..17]  min out       u64, floor(amount * (1 - slippage))
//!   [17]     direction     buy=0 / sell=1
//!   [18..26] priority fee  u64, lamports
//!   [26..34] deadline      u64, unix seconds (now + max wait)
//! Tail zero-padded.

use solana_sdk::instruction::{AccountMeta, Instruction};

use crate::config::VenueConfig;
use crate::derive;
use crate::domain::{Operation, TradeIntent, Venue};
use crate::error::EncodeError;

use super::{
    check_len, min_amount_out, parse_address, read_u64, PayloadWriter, VenueEncoder, DATA_LEN,
};

const OP_SWAP: u8 = 0;

const DIR_BUY: u8 = 0;
const DIR_SELL: u8 = 1;

const OFF_AMOUNT: usize = 1;
const OFF_MIN_OUT: usize = 9;
const OFF_DIRECTION: usize = 17;
const OFF_PRIORITY_FEE: usize = 18;
const OFF_DEADLINE: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpSwapArgs {
    pub amount: u64,
    pub min_out: u64,
    pub direction: Operation,
    pub priority_fee: u64,
    /// Absolute unix-seconds deadline after which the swap is stale.
    pub deadline: u64,
}

impl PumpSwapArgs {
    pub fn encode(&self) -> [u8; DATA_LEN] {
        let dir = if self.direction.is_buy() { DIR_BUY } else { DIR_SELL };
        let mut w = PayloadWriter::new(OP_SWAP);
        w.put_u64(OFF_AMOUNT, self.amount)
            .put_u64(OFF_MIN_OUT, self.min_out)
            .put_u8(OFF_DIRECTION, dir)
            .put_u64(OFF_PRIORITY_FEE, self.priority_fee)
            .put_u64(OFF_DEADLINE, self.deadline);
        w.finish()
    }

    pub fn decode(data: &[u8]) -> Result<Self, EncodeError> {
        check_len(Venue::PumpSwap, data)?;
        if data[0] != OP_SWAP {
            return Err(EncodeError::encoding(
                Venue::PumpSwap,
                format!("unknown opcode {}", data[0]),
            ));
        }
        let direction = match data[OFF_DIRECTION] {
            DIR_BUY => Operation::Buy,
            DIR_SELL => Operation::Sell,
            other => {
                return Err(EncodeError::encoding(
                    Venue::PumpSwap,
                    format!("unknown direction {other}"),
                ))
            }
        };
        Ok(Self {
            amount: read_u64(data, OFF_AMOUNT),
            min_out: read_u64(data, OFF_MIN_OUT),
            direction,
            priority_fee: read_u64(data, OFF_PRIORITY_FEE),
            deadline: read_u64(data, OFF_DEADLINE),
        })
    }
}

pub struct PumpSwapEncoder;

impl VenueEncoder for PumpSwapEncoder {
    fn venue(&self) -> Venue {
        Venue::PumpSwap
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
        let quote = derive::USDC_MINT;

        let user_token = derive::prefixed_user_token_account(&wallet, &mint);
        let user_quote = derive::prefixed_user_token_account(&wallet, &quote);
        let pool =
            derive::program_account(&program_id, &format!("pumpswap_pool_{mint}_{quote}"), &mint);
        let pool_token_a =
            derive::program_account(&program_id, &format!("pool_token_a_{mint}"), &mint);
        let pool_token_b =
            derive::program_account(&program_id, &format!("pool_token_b_{mint}"), &mint);

        let deadline =
            chrono::Utc::now().timestamp().max(0) as u64 + u64::from(intent.max_wait_or_default());
        let args = PumpSwapArgs {
            amount,
            min_out: min_amount_out(amount, intent.slippage_bps),
            direction: intent.operation,
            priority_fee: intent.priority_fee_or_default(),
            deadline,
        };

        let accounts = vec![
            AccountMeta::new(wallet, true),
            AccountMeta::new(mint, false),
            AccountMeta::new(quote, false),
            AccountMeta::new(user_token, false),
            AccountMeta::new(user_quote, false),
            AccountMeta::new(pool, false),
            AccountMeta::new(pool_token_a, false),
            AccountMeta::new(pool_token_b, false),
            AccountMeta::new_readonly(derive::SYSTEM_PROGRAM, false),
            AccountMeta::new_readonly(derive::TOKEN_PROGRAM, false),
            AccountMeta::new_readonly(derive::ASSOCIATED_TOKEN_PROGRAM, false),
        ];

        Ok(Instruction::new_with_bytes(program_id, &args.encode(), accounts))
    }
}
