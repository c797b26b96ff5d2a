//! Error types for the admission pipeline.
//!
//! A rejection is a verdict, never a fault: every variant carries the
//! structured context a caller needs (declared "have" vs recomputed
//! "want" on all mismatches), and string formatting stays a presentation
//! concern.

use shared_types::{Address, Bloom, Hash};

/// Admission rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    // --- Linkage ---
    #[error("block already known with state")]
    KnownBlock,

    #[error("unknown ancestor")]
    UnknownAncestor,

    #[error("ancestor known but its state is pruned")]
    PrunedAncestor,

    // --- Body integrity ---
    #[error("transaction root mismatch: have {have:02x?}, want {want:02x?}")]
    TxRootMismatch { have: Hash, want: Hash },

    #[error("uncle root mismatch: have {have:02x?}, want {want:02x?}")]
    UncleRootMismatch { have: Hash, want: Hash },

    // --- State integrity ---
    #[error("gas used mismatch: have {have}, want {want}")]
    GasUsedMismatch { have: u64, want: u64 },

    #[error("log bloom mismatch: have {have:?}, want {want:?}")]
    BloomMismatch { have: Bloom, want: Bloom },

    #[error("receipt root mismatch: have {have:02x?}, want {want:02x?}")]
    ReceiptRootMismatch { have: Hash, want: Hash },

    #[error("state root mismatch: have {have:02x?}, want {want:02x?}")]
    StateRootMismatch { have: Hash, want: Hash },

    // --- Leader election ---
    #[error("block sealed {interval}s after parent, minimum is {min}s")]
    BlockTooFast { interval: u64, min: u64 },

    #[error("miner {0:02x?} is being punished")]
    MinerPunished(Address),

    #[error("miner {0:02x?} is not registered")]
    MinerNotRegistered(Address),

    #[error("qr seal must be {expected} bytes, got {have}")]
    QrSealLength { have: usize, expected: usize },

    #[error("qr digest mismatch: have {have:02x?}, want {want:02x?}")]
    QrMismatch { have: Hash, want: Hash },

    #[error("qr seal signature does not recover to the coinbase")]
    InvalidQrSignature,

    #[error("miner {0:02x?} is out of turn for this slot")]
    InvalidMiner(Address),

    #[error("primary miner mismatch: have {have:02x?}, want {want:02x?}")]
    PrimaryMinerMismatch { have: Address, want: Address },

    #[error("difficulty level mismatch: have {have}, want at most {want}")]
    DifficultyLevelMismatch { have: u64, want: u64 },

    // --- Upstream collaborators ---
    #[error("consensus engine: {0}")]
    Engine(String),

    #[error("miner registry: {0}")]
    Registry(String),
}

/// Result type for admission operations.
pub type AdmissionResult<T> = Result<T, AdmissionError>;
