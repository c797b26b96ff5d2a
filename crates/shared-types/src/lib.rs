//! # Shared Types Crate
//!
//! This crate contains the domain entities shared by every QR-Chain
//! subsystem: block headers, blocks, receipts and logs, the 2048-bit log
//! bloom, the QR seal carried in every sealed header, and the ordered
//! Merkle commitments the header declares over its body.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Immutable Values**: Blocks and headers are constructed upstream and
//!   only ever borrowed by validators; nothing in this crate mutates them.
//! - **Recomputable Commitments**: Every root a header declares can be
//!   recomputed from the body alone, byte-for-byte, on any node.

pub mod bloom;
pub mod commitment;
pub mod entities;

pub use bloom::{log_bloom, Bloom, BLOOM_BYTES};
pub use commitment::{
    keccak256, ordered_root, receipts_root, transactions_root, uncles_root, SENTINEL_HASH,
};
pub use entities::*;
