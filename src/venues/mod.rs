//! Venue-specific instruction encoding.
//!
//! Each venue publishes a fixed 64-byte little-endian instruction layout and
//! an ordered account list; the order and access roles are part of the
//! on-chain program contract, so reordering breaks the instruction.

pub mod pumpfun;
pub mod pumpswap;
pub mod raydium;

use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::config::VenueConfig;
use crate::domain::{TradeIntent, Venue};
use crate::error::EncodeError;

/// Fixed instruction data buffer length, zero-padded past the last field.
pub const DATA_LEN: usize = 64;

/// Builds the instruction for one venue: derived accounts in the venue's
/// published order plus the encoded payload. Never returns a partially
/// built instruction.
pub trait VenueEncoder: Send + Sync {
    fn venue(&self) -> Venue;

    fn build_instruction(
        &self,
        intent: &TradeIntent,
        amount: u64,
        cfg: &VenueConfig,
    ) -> Result<Instruction, EncodeError>;
}

impl Venue {
    /// Dispatch table over the closed venue set.
    pub fn encoder(self) -> &'static dyn VenueEncoder {
        match self {
            Venue::Pumpfun => &pumpfun::PumpfunEncoder,
            Venue::PumpSwap => &pumpswap::PumpSwapEncoder,
            Venue::Raydium => &raydium::RaydiumEncoder,
        }
    }
}

/// Minimum acceptable output after slippage: floor(amount * (1 - bps/10000)).
pub(crate) fn min_amount_out(amount: u64, slippage_bps: u32) -> u64 {
    let kept = 10_000u128 - u128::from(slippage_bps.min(10_000));
    (u128::from(amount) * kept / 10_000) as u64
}

/// Parses a base58 address inside the encoding stage; failures surface as
/// `Encoding` errors carrying the cause.
pub(crate) fn parse_address(
    venue: Venue,
    field: &str,
    value: &str,
) -> Result<Pubkey, EncodeError> {
    Pubkey::from_str(value)
        .map_err(|e| EncodeError::encoding(venue, format!("{field} is not a valid pubkey: {e}")))
}

/// Fixed-width little-endian writer over the 64-byte buffer.
///
/// Offsets are explicit so each venue's layout is independently testable.
pub(crate) struct PayloadWriter {
    buf: [u8; DATA_LEN],
}

impl PayloadWriter {
    pub(crate) fn new(opcode: u8) -> Self {
        let mut buf = [0u8; DATA_LEN];
        buf[0] = opcode;
        Self { buf }
    }

    pub(crate) fn put_u8(&mut self, offset: usize, v: u8) -> &mut Self {
        self.buf[offset] = v;
        self
    }

    pub(crate) fn put_u32(&mut self, offset: usize, v: u32) -> &mut Self {
        self.buf[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
        self
    }

    pub(crate) fn put_u64(&mut self, offset: usize, v: u64) -> &mut Self {
        self.buf[offset..offset + 8].copy_from_slice(&v.to_le_bytes());
        self
    }

    pub(crate) fn finish(&self) -> [u8; DATA_LEN] {
        self.buf
    }
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(b)
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(b)
}

pub(crate) fn check_len(venue: Venue, data: &[u8]) -> Result<(), EncodeError> {
    if data.len() != DATA_LEN {
        return Err(EncodeError::encoding(
            venue,
            format!("instruction data must be {DATA_LEN} bytes, got {}", data.len()),
        ));
    }
    Ok(())
}
