//! # qr-admission
//!
//! Block-admission gatekeeper for QR-Chain. Given a candidate block and a
//! consistent snapshot of the chain's canonical state, this crate decides
//! whether the block is structurally sound, whether its declared
//! post-execution state is correct, and whether the coinbase was the
//! legitimately elected miner for its slot.
//!
//! ## Pipeline
//!
//! Chain-acceptance logic calls the three checks in order, short-circuiting
//! on the first failure:
//!
//! ```text
//! validate_body ──→ validate_state ──→ validate_miner ──→ accept
//!      │                  │                  │
//!      └──────────────────┴──────────────────┴──→ typed rejection
//! ```
//!
//! Every check is a pure function of its inputs: no mutation, no retries,
//! no partial acceptance. Blocks at different heights may be validated
//! concurrently as long as each call holds its state snapshot immutable.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qr_admission::{AdmissionConfig, BlockValidator};
//!
//! let validator = BlockValidator::new(AdmissionConfig::default(), chain, engine, registry);
//! validator.validate_body(&block)?;
//! validator.validate_state(&block, &parent, state.as_ref(), &receipts, used_gas)?;
//! validator.validate_miner(&block, &parent, state.as_ref())?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod validator;

pub use domain::{
    calc_next_qr, elected_index, eligibility_level, next_gas_limit, rotation_counter,
    AdmissionConfig, AdmissionError, AdmissionResult,
};
pub use ports::{ChainIndex, ConsensusEngine, MinerRegistryView, MinerStatus, StateSnapshot};
pub use validator::BlockValidator;
