//! # Core Domain Entities
//!
//! Defines the chain entities validated by the admission pipeline.
//!
//! ## Clusters
//!
//! - **Chain**: `Header`, `Block`, `SignedTransaction`
//! - **Execution output**: `Receipt`, `Log`
//! - **Leader election**: `QrSeal`

use crate::bloom::Bloom;
use crate::commitment::keccak256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Byte length of a sealed header's `miner_qr_seal` field:
/// a 65-byte recoverable ECDSA signature followed by the 32-byte QR digest.
pub const PRE_QR_LENGTH: usize = 97;

/// Seed of the QR hash chain, consumed when validating block 1.
///
/// `qr(1) = keccak256(coinbase(0) || 1 || GENESIS_QR)`; every later value
/// chains off the digest embedded in the parent's seal.
pub const GENESIS_QR: Hash = [
    0x71, 0x72, 0x2d, 0x63, 0x68, 0x61, 0x69, 0x6e, 0x2e, 0x67, 0x65, 0x6e, 0x65, 0x73, 0x69,
    0x73, 0x2e, 0x73, 0x65, 0x65, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

/// Errors raised while structuring raw entity bytes.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("qr seal must be {expected} bytes, got {have}")]
    QrSealLength { have: usize, expected: usize },
}

/// The structured form of a header's `miner_qr_seal` bytes.
///
/// The raw field is signature-then-digest; structuring it length-first
/// removes the index arithmetic from every consumer.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrSeal {
    /// Recoverable ECDSA signature over the block's QR digest.
    #[serde_as(as = "Bytes")]
    pub signature: [u8; 65],
    /// The QR digest for this block's round.
    pub qr: Hash,
}

impl QrSeal {
    /// Structure a raw seal, validating the length before anything else.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EntityError> {
        if bytes.len() != PRE_QR_LENGTH {
            return Err(EntityError::QrSealLength {
                have: bytes.len(),
                expected: PRE_QR_LENGTH,
            });
        }
        let mut signature = [0u8; 65];
        signature.copy_from_slice(&bytes[..65]);
        let mut qr = [0u8; 32];
        qr.copy_from_slice(&bytes[65..]);
        Ok(Self { signature, qr })
    }

    /// Flatten back to the wire layout (signature || qr).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PRE_QR_LENGTH);
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.qr);
        out
    }
}

/// Block header containing all metadata and body commitments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Header {
    /// Hash of the parent block (creates the chain linkage).
    pub parent_hash: Hash,
    /// Block height in the chain.
    pub number: u64,
    /// Unix timestamp when the block was sealed.
    pub timestamp: u64,
    /// The miner claiming this block.
    pub coinbase: Address,
    /// Elected leader of the previous rotation round.
    pub primary_miner: Address,
    /// How many rotation steps from the ideal leader the miner claims to be.
    pub difficulty_level: u64,
    /// Gas consumed by the block's transactions.
    pub gas_used: u64,
    /// Gas capacity of the block.
    pub gas_limit: u64,
    /// Ordered commitment over the transaction list.
    pub tx_root: Hash,
    /// Ordered commitment over the uncle headers.
    pub uncle_root: Hash,
    /// Ordered commitment over the execution receipts.
    pub receipt_root: Hash,
    /// Root of the state trie after applying this block.
    pub state_root: Hash,
    /// Aggregate log bloom of the block's receipts.
    pub bloom: Bloom,
    /// Raw seal bytes: 65-byte ECDSA signature || 32-byte QR digest.
    /// Empty on the genesis header, `PRE_QR_LENGTH` bytes everywhere else.
    pub miner_qr_seal: Vec<u8>,
}

impl Header {
    /// Compute the identity hash of this header.
    pub fn hash(&self) -> Hash {
        let mut buf = Vec::with_capacity(256);
        buf.extend_from_slice(&self.parent_hash);
        buf.extend_from_slice(&self.number.to_be_bytes());
        buf.extend_from_slice(&self.timestamp.to_be_bytes());
        buf.extend_from_slice(&self.coinbase);
        buf.extend_from_slice(&self.primary_miner);
        buf.extend_from_slice(&self.difficulty_level.to_be_bytes());
        buf.extend_from_slice(&self.gas_used.to_be_bytes());
        buf.extend_from_slice(&self.gas_limit.to_be_bytes());
        buf.extend_from_slice(&self.tx_root);
        buf.extend_from_slice(&self.uncle_root);
        buf.extend_from_slice(&self.receipt_root);
        buf.extend_from_slice(&self.state_root);
        buf.extend_from_slice(self.bloom.as_bytes());
        buf.extend_from_slice(&self.miner_qr_seal);
        keccak256(&buf)
    }

    /// Check if this is the genesis header.
    pub fn is_genesis(&self) -> bool {
        self.number == 0 && self.parent_hash == [0u8; 32]
    }

    /// Structure the raw seal bytes, validating length first.
    pub fn qr_seal(&self) -> Result<QrSeal, EntityError> {
        QrSeal::from_bytes(&self.miner_qr_seal)
    }
}

/// A signed transaction as carried in a block body.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Sender address (derived from the signing key upstream).
    pub from: Address,
    /// Recipient address (absent for contract creation).
    pub to: Option<Address>,
    /// Transaction value in base units.
    pub value: U256,
    /// Sender's nonce to prevent replay attacks.
    pub nonce: u64,
    /// Gas price in base units.
    pub gas_price: U256,
    /// Gas limit for this transaction.
    pub gas_limit: u64,
    /// Transaction payload (contract call data, etc.).
    pub data: Vec<u8>,
    /// ECDSA signature (r || s || v).
    #[serde_as(as = "Bytes")]
    pub signature: [u8; 65],
}

impl SignedTransaction {
    /// Compute the transaction hash.
    pub fn hash(&self) -> Hash {
        let mut buf = Vec::with_capacity(192);
        buf.extend_from_slice(&self.from);
        if let Some(to) = &self.to {
            buf.extend_from_slice(to);
        }
        let mut value_bytes = [0u8; 32];
        self.value.to_big_endian(&mut value_bytes);
        buf.extend_from_slice(&value_bytes);
        buf.extend_from_slice(&self.nonce.to_be_bytes());
        let mut gas_price_bytes = [0u8; 32];
        self.gas_price.to_big_endian(&mut gas_price_bytes);
        buf.extend_from_slice(&gas_price_bytes);
        buf.extend_from_slice(&self.gas_limit.to_be_bytes());
        buf.extend_from_slice(&self.data);
        buf.extend_from_slice(&self.signature);
        keccak256(&buf)
    }
}

/// A single log entry emitted during execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Log {
    /// Contract that emitted the log.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<Hash>,
    /// Unindexed payload.
    pub data: Vec<u8>,
}

impl Log {
    /// Bloom over the emitting address and every topic.
    pub fn bloom(&self) -> Bloom {
        let mut bloom = Bloom::default();
        bloom.accrue(&self.address);
        for topic in &self.topics {
            bloom.accrue(topic);
        }
        bloom
    }
}

/// Execution receipt for one transaction, produced by the state-transition
/// engine and validated against the header's declarations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Receipt {
    /// 1 on success, 0 on revert.
    pub status: u64,
    /// Gas consumed by the block up to and including this transaction.
    pub cumulative_gas_used: u64,
    /// Gas consumed by this transaction alone.
    pub gas_used: u64,
    /// Logs emitted during execution.
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Bloom over every log in this receipt.
    pub fn bloom(&self) -> Bloom {
        let mut bloom = Bloom::default();
        for log in &self.logs {
            bloom.accrue_bloom(&log.bloom());
        }
        bloom
    }

    /// Deterministic byte encoding hashed into the receipt trie leaf.
    pub fn commitment_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&self.status.to_be_bytes());
        buf.extend_from_slice(&self.cumulative_gas_used.to_be_bytes());
        buf.extend_from_slice(self.bloom().as_bytes());
        buf.extend_from_slice(&(self.logs.len() as u64).to_be_bytes());
        for log in &self.logs {
            buf.extend_from_slice(&log.address);
            buf.extend_from_slice(&(log.topics.len() as u64).to_be_bytes());
            for topic in &log.topics {
                buf.extend_from_slice(topic);
            }
            buf.extend_from_slice(&(log.data.len() as u64).to_be_bytes());
            buf.extend_from_slice(&log.data);
        }
        buf
    }
}

/// An immutable block: header plus ordered transactions and uncle headers.
///
/// Identity is the header's content hash. Validators borrow blocks and
/// never mutate them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<SignedTransaction>,
    pub uncles: Vec<Header>,
}

impl Block {
    /// Get the identity hash of this block.
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Block height.
    pub fn number(&self) -> u64 {
        self.header.number
    }

    /// Hash of the parent block.
    pub fn parent_hash(&self) -> Hash {
        self.header.parent_hash
    }

    /// The miner claiming this block.
    pub fn coinbase(&self) -> Address {
        self.header.coinbase
    }

    /// Seal timestamp.
    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }

    /// Declared gas consumption.
    pub fn gas_used(&self) -> u64 {
        self.header.gas_used
    }

    /// Declared gas capacity.
    pub fn gas_limit(&self) -> u64 {
        self.header.gas_limit
    }
}
