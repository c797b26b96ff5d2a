//! Value objects for signature verification.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash};

/// A recoverable ECDSA signature split into its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// Recovery id: 0, 1, 27 or 28.
    pub v: u8,
}

impl EcdsaSignature {
    /// Split a 65-byte wire signature (r || s || v).
    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self { r, s, v: bytes[64] }
    }

    /// Rebuild the 65-byte wire layout.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

/// Outcome of a single verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub valid: bool,
    pub recovered_address: Option<Address>,
    pub error: Option<SignatureError>,
}

impl VerificationResult {
    pub fn valid(address: Address) -> Self {
        Self {
            valid: true,
            recovered_address: Some(address),
            error: None,
        }
    }

    pub fn invalid(error: SignatureError) -> Self {
        Self {
            valid: false,
            recovered_address: None,
            error: Some(error),
        }
    }
}

/// One verification job for batch processing.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub message_hash: Hash,
    pub signature: EcdsaSignature,
    /// When set, the recovered signer must equal this address.
    pub expected_signer: Option<Address>,
}

/// Aggregate outcome of a batch verification.
#[derive(Debug, Clone)]
pub struct BatchVerificationResult {
    pub all_valid: bool,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub results: Vec<VerificationResult>,
}

impl BatchVerificationResult {
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        let invalid_count = results.len() - valid_count;
        Self {
            all_valid: invalid_count == 0,
            valid_count,
            invalid_count,
            results,
        }
    }
}
