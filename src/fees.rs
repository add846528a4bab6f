//! Heuristic network fee estimation. Never fatal to the pipeline.

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

const BASE_FEE_LAMPORTS: u64 = 5_000;
const PER_INSTRUCTION_LAMPORTS: u64 = 1_000;
const DEFAULT_FEE_LAMPORTS: u64 = 10_000;

/// Estimated fee in lamports for a transaction with the given instruction
/// count. Falls back to a fixed default instead of failing.
pub fn estimate_fee(instruction_count: usize) -> u64 {
    u64::try_from(instruction_count)
        .ok()
        .and_then(|n| n.checked_mul(PER_INSTRUCTION_LAMPORTS))
        .and_then(|per| BASE_FEE_LAMPORTS.checked_add(per))
        .unwrap_or(DEFAULT_FEE_LAMPORTS)
}

/// Lamports rendered as a SOL decimal string with nine fractional digits.
///
/// A lamport is exactly 10^-9 SOL, so the conversion is exact; no rounding
/// ever applies.
pub fn format_sol(lamports: u64) -> String {
    format!(
        "{}.{:09}",
        lamports / LAMPORTS_PER_SOL,
        lamports % LAMPORTS_PER_SOL
    )
}
