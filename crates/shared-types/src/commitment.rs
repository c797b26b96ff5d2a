//! # Ordered Root Commitments
//!
//! Binary Merkle commitments over the ordered contents of a block body.
//! Each non-leaf node is `keccak256(left || right)`; leaves are padded to
//! the nearest power of two with a zero sentinel so the shape is a
//! function of the leaf count alone. Same sequence, same root, on every
//! node: the roots a header declares are recomputed from the body during
//! admission and compared byte-for-byte.

use crate::entities::{Hash, Header, Receipt, SignedTransaction};
use sha3::{Digest, Keccak256};

/// Sentinel hash used to pad leaf levels (and the root of an empty set).
pub const SENTINEL_HASH: Hash = [0u8; 32];

/// Keccak-256 convenience wrapper.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Root of the binary Merkle tree over `leaves`, in order.
///
/// Leaves are padded to a power of two (minimum 2) with `SENTINEL_HASH`;
/// an empty sequence commits to the sentinel itself.
pub fn ordered_root(leaves: Vec<Hash>) -> Hash {
    if leaves.is_empty() {
        return SENTINEL_HASH;
    }

    let padded = if leaves.len() == 1 {
        2
    } else {
        leaves.len().next_power_of_two()
    };
    let mut level = leaves;
    level.resize(padded, SENTINEL_HASH);

    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }
    level[0]
}

/// Commitment a header's `tx_root` must equal.
pub fn transactions_root(transactions: &[SignedTransaction]) -> Hash {
    ordered_root(transactions.iter().map(SignedTransaction::hash).collect())
}

/// Commitment a header's `receipt_root` must equal.
pub fn receipts_root(receipts: &[Receipt]) -> Hash {
    ordered_root(
        receipts
            .iter()
            .map(|r| keccak256(&r.commitment_bytes()))
            .collect(),
    )
}

/// Commitment a header's `uncle_root` must equal.
pub fn uncles_root(uncles: &[Header]) -> Hash {
    ordered_root(uncles.iter().map(Header::hash).collect())
}
