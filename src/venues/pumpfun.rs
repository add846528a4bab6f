//! Pumpfun bonding-curve venue.
//!
//! Layout (little-endian, 64-byte buffer):
//!   [0]     opcode      buy=0 / sell=1
//!   [1..9]  amount      u64, base units
//!   [9..13] slippage    u32, basis points
//!   [13..21] priority   u64, lamports
//!   [21..25] max wait   u32, seconds
//! Tail zero-padded.

use solana_sdk::instruction::{AccountMeta, Instruction};

use crate::config::VenueConfig;
use crate::derive;
use crate::domain::{Operation, TradeIntent, Venue};
use crate::error::EncodeError;

use super::{check_len, parse_address, read_u32, read_u64, PayloadWriter, VenueEncoder, DATA_LEN};

const OP_BUY: u8 = 0;
const OP_SELL: u8 = 1;

const OFF_AMOUNT: usize = 1;
const OFF_SLIPPAGE: usize = 9;
const OFF_PRIORITY_FEE: usize = 13;
const OFF_MAX_WAIT: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpfunArgs {
    pub operation: Operation,
    pub amount: u64,
    pub slippage_bps: u32,
    pub priority_fee: u64,
    pub max_wait_secs: u32,
}

impl PumpfunArgs {
    pub fn encode(&self) -> [u8; DATA_LEN] {
        let opcode = if self.operation.is_buy() { OP_BUY } else { OP_SELL };
        let mut w = PayloadWriter::new(opcode);
        w.put_u64(OFF_AMOUNT, self.amount)
            .put_u32(OFF_SLIPPAGE, self.slippage_bps)
            .put_u64(OFF_PRIORITY_FEE, self.priority_fee)
            .put_u32(OFF_MAX_WAIT, self.max_wait_secs);
        w.finish()
    }

    pub fn decode(data: &[u8]) -> Result<Self, EncodeError> {
        check_len(Venue::Pumpfun, data)?;
        let operation = match data[0] {
            OP_BUY => Operation::Buy,
            OP_SELL => Operation::Sell,
            other => {
                return Err(EncodeError::encoding(
                    Venue::Pumpfun,
                    format!("unknown opcode {other}"),
                ))
            }
        };
        Ok(Self {
            operation,
            amount: read_u64(data, OFF_AMOUNT),
            slippage_bps: read_u32(data, OFF_SLIPPAGE),
            priority_fee: read_u64(data, OFF_PRIORITY_FEE),
            max_wait_secs: read_u32(data, OFF_MAX_WAIT),
        })
    }
}

pub struct PumpfunEncoder;

impl VenueEncoder for PumpfunEncoder {
    fn venue(&self) -> Venue {
        Venue::Pumpfun
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

        let user_token = derive::user_token_account(&wallet, &mint);
        let pool = derive::program_account(&program_id, &format!("pumpfun_pool_{mint}"), &mint);

        let args = PumpfunArgs {
            operation: intent.operation,
            amount,
            slippage_bps: intent.slippage_bps,
            priority_fee: intent.priority_fee_or_default(),
            max_wait_secs: intent.max_wait_or_default(),
        };

        // Account order fixed by the program contract.
        let accounts = vec![
            AccountMeta::new(wallet, true),
            AccountMeta::new(mint, false),
            AccountMeta::new(user_token, false),
            AccountMeta::new(pool, false),
            AccountMeta::new_readonly(derive::SYSTEM_PROGRAM, false),
            AccountMeta::new_readonly(derive::TOKEN_PROGRAM, false),
            AccountMeta::new_readonly(derive::ASSOCIATED_TOKEN_PROGRAM, false),
        ];

        Ok(Instruction::new_with_bytes(program_id, &args.encode(), accounts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    fn intent(op: Operation) -> TradeIntent {
        TradeIntent {
            wallet_address: Pubkey::new_unique().to_string(),
            token_mint: Pubkey::new_unique().to_string(),
            amount: "1000000".into(),
            slippage_bps: 250,
            operation: op,
            priority_fee: Some(7_500),
            max_wait_secs: Some(45),
            use_mainnet: true,
        }
    }

    fn cfg() -> VenueConfig {
        VenueConfig {
            program_id: "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P".into(),
            fee_rate: 0.01,
            min_amount: 1_000,
            max_slippage_bps: 5_000,
            rpc_timeout_ms: 30_000,
            max_retries: 3,
        }
    }

    #[test]
    fn payload_round_trips() {
        let args = PumpfunArgs {
            operation: Operation::Sell,
            amount: 123_456_789,
            slippage_bps: 250,
            priority_fee: 7_500,
            max_wait_secs: 45,
        };
        let data = args.encode();
        assert_eq!(data.len(), DATA_LEN);
        assert_eq!(data[0], OP_SELL);
        assert_eq!(PumpfunArgs::decode(&data).unwrap(), args);
        // Tail past the last field stays zero.
        assert!(data[OFF_MAX_WAIT + 4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn buy_and_sell_opcodes() {
        let buy = PumpfunEncoder
            .build_instruction(&intent(Operation::Buy), 1_000_000, &cfg())
            .unwrap();
        let sell = PumpfunEncoder
            .build_instruction(&intent(Operation::Sell), 1_000_000, &cfg())
            .unwrap();
        assert_eq!(buy.data[0], OP_BUY);
        assert_eq!(sell.data[0], OP_SELL);
    }

    #[test]
    fn account_order_and_roles() {
        let i = intent(Operation::Buy);
        let ix = PumpfunEncoder.build_instruction(&i, 1_000_000, &cfg()).unwrap();
        assert_eq!(ix.accounts.len(), 7);
        // Wallet is the only signer and comes first.
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[0].pubkey.to_string(), i.wallet_address);
        assert!(ix.accounts.iter().skip(1).all(|a| !a.is_signer));
        // Programs at the tail are read-only.
        assert!(ix.accounts[4..].iter().all(|a| !a.is_writable));
        assert_eq!(ix.accounts[6].pubkey, derive::ASSOCIATED_TOKEN_PROGRAM);
    }

    #[test]
    fn encoded_fields_match_intent() {
        let i = intent(Operation::Buy);
        let ix = PumpfunEncoder.build_instruction(&i, 1_000_000, &cfg()).unwrap();
        let args = PumpfunArgs::decode(&ix.data).unwrap();
        assert_eq!(args.amount, 1_000_000);
        assert_eq!(args.slippage_bps, 250);
        assert_eq!(args.priority_fee, 7_500);
        assert_eq!(args.max_wait_secs, 45);
    }

    #[test]
    fn defaults_applied_when_optionals_missing() {
        let mut i = intent(Operation::Buy);
        i.priority_fee = None;
        i.max_wait_secs = None;
        let ix = PumpfunEncoder.build_instruction(&i, 1_000_000, &cfg()).unwrap();
        let args = PumpfunArgs::decode(&ix.data).unwrap();
        assert_eq!(args.priority_fee, 0);
        assert_eq!(args.max_wait_secs, 30);
    }
}
