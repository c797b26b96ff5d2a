//! Pure domain logic: ECDSA verification, entities and errors.

pub mod ecdsa;
pub mod entities;
pub mod errors;

pub use ecdsa::{
    address_from_pubkey, batch_verify, keccak256, recover_address, verify_ecdsa,
    verify_ecdsa_signer, verify_seal_signature,
};
pub use entities::{
    BatchVerificationResult, EcdsaSignature, VerificationRequest, VerificationResult,
};
pub use errors::SignatureError;

#[cfg(test)]
pub use ecdsa::test_helpers;
