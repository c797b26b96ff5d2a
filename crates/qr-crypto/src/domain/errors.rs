//! Error types for signature verification.

use shared_types::Address;

/// Signature verification error kinds.
///
/// Every variant is a verdict about the input, never a program fault;
/// callers inside admission turn these into typed rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature component out of range or malformed")]
    InvalidFormat,

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("public key recovery failed")]
    RecoveryFailed,

    #[error("signature is valid but not self-consistent over (r, s)")]
    InconsistentSignature,

    #[error("recovered signer {actual:?} does not match expected {expected:?}")]
    SignerMismatch { expected: Address, actual: Address },

    #[error("malleable signature: s is in the upper half of the curve order")]
    MalleableSignature,
}
