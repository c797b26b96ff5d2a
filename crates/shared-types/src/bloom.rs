//! # Log Bloom
//!
//! 2048-bit probabilistic filter over the log addresses and topics of a
//! block's receipts. Headers declare the aggregate bloom; validators
//! recompute it from the receipts and compare bit-for-bit, so the bit
//! layout here is consensus-critical and must never change.

use crate::commitment::keccak256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Width of the bloom in bytes (2048 bits).
pub const BLOOM_BYTES: usize = 256;

/// Number of bits set per accrued input.
const BLOOM_HASHES: usize = 3;

/// A 2048-bit log bloom.
///
/// Each accrued input sets three bits, chosen from the first six bytes of
/// the input's Keccak-256 digest taken as 11-bit big-endian indices.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bloom(#[serde_as(as = "Bytes")] [u8; BLOOM_BYTES]);

impl Default for Bloom {
    fn default() -> Self {
        Self([0u8; BLOOM_BYTES])
    }
}

impl std::fmt::Debug for Bloom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bloom(bits_set={})", self.count_ones())
    }
}

impl Bloom {
    /// Construct from raw bytes.
    pub fn from_bytes(bytes: [u8; BLOOM_BYTES]) -> Self {
        Self(bytes)
    }

    /// Raw byte view, for hashing and serialization.
    pub fn as_bytes(&self) -> &[u8; BLOOM_BYTES] {
        &self.0
    }

    /// Set the three bits for `input`.
    pub fn accrue(&mut self, input: &[u8]) {
        let digest = keccak256(input);
        for i in 0..BLOOM_HASHES {
            let bit = bit_index(&digest, i);
            self.0[bit / 8] |= 1 << (bit % 8);
        }
    }

    /// Bitwise OR another bloom into this one.
    pub fn accrue_bloom(&mut self, other: &Bloom) {
        for (byte, other_byte) in self.0.iter_mut().zip(other.0.iter()) {
            *byte |= other_byte;
        }
    }

    /// Probabilistic membership: false means definitely absent.
    pub fn contains_input(&self, input: &[u8]) -> bool {
        let digest = keccak256(input);
        (0..BLOOM_HASHES).all(|i| {
            let bit = bit_index(&digest, i);
            self.0[bit / 8] & (1 << (bit % 8)) != 0
        })
    }

    /// True if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    fn count_ones(&self) -> u32 {
        self.0.iter().map(|b| b.count_ones()).sum()
    }
}

/// The i-th 11-bit index from a digest: bytes (2i, 2i+1) big-endian, mod 2048.
fn bit_index(digest: &[u8; 32], i: usize) -> usize {
    (((digest[2 * i] as usize) << 8) | digest[2 * i + 1] as usize) % (BLOOM_BYTES * 8)
}

/// Aggregate bloom over a receipt set: the bitwise OR of every receipt's
/// own bloom. This is the value a header's `bloom` field must equal.
pub fn log_bloom(receipts: &[crate::entities::Receipt]) -> Bloom {
    let mut bloom = Bloom::default();
    for receipt in receipts {
        bloom.accrue_bloom(&receipt.bloom());
    }
    bloom
}
