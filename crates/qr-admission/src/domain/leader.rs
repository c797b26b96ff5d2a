//! # Leader Sequence
//!
//! Deterministic pseudo-random leader election driven by the QR hash
//! chain: `qr(n) = keccak256(coinbase(n-1) || n || qr(n-1))`, seeded by
//! `GENESIS_QR` at block 1. No party can predict `qr(n)` before
//! `coinbase(n-1)` is fixed, but any party can recompute and verify it.
//!
//! Each round's ideal leader is the registry slot `qr mod total`; when
//! slots are missed the schedule rotates forward one slot per elapsed
//! `block_slot`, so the miner `level` steps behind the ideal leader
//! becomes eligible once the rotation counter reaches `level`.

use primitive_types::U256;
use shared_types::{keccak256, Address, Hash};

/// Next value of the QR chain:
/// `keccak256(prev_coinbase || number || prev_qr)`.
pub fn calc_next_qr(prev_coinbase: &Address, number: u64, prev_qr: &Hash) -> Hash {
    let mut buf = [0u8; 20 + 8 + 32];
    buf[..20].copy_from_slice(prev_coinbase);
    buf[20..28].copy_from_slice(&number.to_be_bytes());
    buf[28..].copy_from_slice(prev_qr);
    keccak256(&buf)
}

/// Whole miner slots elapsed between parent and child timestamps.
///
/// A negative interval clamps to zero; the timing gate has already
/// rejected such a block before rotation is ever computed. A zero
/// `block_slot` is treated as one rather than dividing by zero.
pub fn rotation_counter(timestamp: u64, parent_timestamp: u64, block_slot: u64) -> u64 {
    timestamp.saturating_sub(parent_timestamp) / block_slot.max(1)
}

/// Registry index of the round's ideal leader: `qr mod total`.
///
/// `total` must be non-zero; admission skips sequence checks entirely
/// while the registry is empty.
pub fn elected_index(qr: &Hash, total: u64) -> u64 {
    debug_assert!(total > 0);
    (U256::from_big_endian(qr) % U256::from(total)).as_u64()
}

/// Eligibility level of `candidate` for the round whose QR digest is
/// `qr`: the smallest rotation step `i <= rotation` such that the
/// registry slot `(elected + i) mod total` holds the candidate.
///
/// `lookup` resolves a registry index to its address against the caller's
/// state snapshot. Returns `None` when the candidate is out of turn for
/// every step the elapsed time allows.
pub fn eligibility_level(
    candidate: &Address,
    qr: &Hash,
    total: u64,
    rotation: u64,
    lookup: impl Fn(u64) -> Option<Address>,
) -> Option<u64> {
    if total == 0 {
        return None;
    }
    let elected = elected_index(qr, total);
    // Steps beyond the registry size revisit slots already checked.
    let max_step = rotation.min(total.saturating_sub(1));
    (0..=max_step).find(|&step| lookup((elected + step) % total).as_ref() == Some(candidate))
}
