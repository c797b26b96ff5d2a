//! # qr-crypto
//!
//! ECDSA (secp256k1) signature verification and address recovery for
//! QR-Chain. The miner-eligibility check of block admission hinges on one
//! question this crate answers: does the 65-byte seal signature over a
//! 32-byte QR digest recover to the block's claimed coinbase?
//!
//! ## Guarantees
//!
//! - Verification is a pure function of its inputs; identical inputs give
//!   identical verdicts on every node.
//! - A malformed signature is a `false` verdict (or a typed error), never
//!   a panic: admission treats bad signatures as validation failures, not
//!   program faults.
//! - Scalar range checks run in constant time via the `subtle` crate.

pub mod domain;

pub use domain::{
    address_from_pubkey, batch_verify, keccak256, recover_address, verify_ecdsa,
    verify_ecdsa_signer, verify_seal_signature, BatchVerificationResult, EcdsaSignature,
    SignatureError, VerificationRequest, VerificationResult,
};
