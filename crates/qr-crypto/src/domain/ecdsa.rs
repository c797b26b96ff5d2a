//! # ECDSA Verification (secp256k1)
//!
//! Pure domain logic for recoverable ECDSA verification.
//!
//! ## Security Notes
//!
//! - R and S must be in [1, n-1]; checks run in constant time (`subtle`).
//! - S must be strictly below half the curve order (low-S form), so a
//!   relayed seal cannot be flipped into a second valid encoding.
//! - Seal verification recovers the key from the full 65-byte signature,
//!   then re-verifies the (r, s) pair against the recovered key. The
//!   recovery byte is excluded from that second pass: recovery already
//!   binds it, and the pass exists to reject signatures that only verify
//!   under a different curve-point encoding.

use super::entities::{
    BatchVerificationResult, EcdsaSignature, VerificationRequest, VerificationResult,
};
use super::errors::SignatureError;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_types::{Address, Hash};
use subtle::{Choice, ConstantTimeEq};
use tracing::debug;

pub use shared_types::keccak256;

/// secp256k1 curve order n.
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (low-S boundary).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// Verify a signature over `message_hash` and recover the signer address.
pub fn verify_ecdsa(message_hash: &Hash, signature: &EcdsaSignature) -> VerificationResult {
    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return VerificationResult::invalid(SignatureError::InvalidFormat);
    }
    if !is_low_s(&signature.s) {
        return VerificationResult::invalid(SignatureError::MalleableSignature);
    }
    let key = match recover_key(message_hash, signature) {
        Ok(key) => key,
        Err(e) => return VerificationResult::invalid(e),
    };

    // Second pass over (r, s) against the recovered key; recovery alone
    // does not prove the pair verifies under the canonical encoding.
    let mut raw = [0u8; 64];
    raw[..32].copy_from_slice(&signature.r);
    raw[32..].copy_from_slice(&signature.s);
    let consistent = Signature::from_slice(&raw)
        .map(|parsed| key.verify_prehash(message_hash, &parsed).is_ok())
        .unwrap_or(false);
    if !consistent {
        return VerificationResult::invalid(SignatureError::InconsistentSignature);
    }

    VerificationResult::valid(address_from_pubkey(&key))
}

/// Verify a signature and check the recovered signer matches `expected`.
pub fn verify_ecdsa_signer(
    message_hash: &Hash,
    signature: &EcdsaSignature,
    expected: Address,
) -> VerificationResult {
    let result = verify_ecdsa(message_hash, signature);
    if !result.valid {
        return result;
    }
    match result.recovered_address {
        Some(recovered) if recovered != expected => {
            VerificationResult::invalid(SignatureError::SignerMismatch {
                expected,
                actual: recovered,
            })
        }
        _ => result,
    }
}

/// Verify a block seal signature: the 65-byte signature over the 32-byte
/// QR digest must recover to `claimed`, and the (r, s) pair must
/// independently verify against the recovered key.
///
/// A malformed signature is a `false` verdict, never an error: admission
/// treats it as a validation failure, not a program fault.
pub fn verify_seal_signature(signature: &[u8; 65], digest: &Hash, claimed: &Address) -> bool {
    let sig = EcdsaSignature::from_bytes(signature);

    if !is_valid_scalar(&sig.r) || !is_valid_scalar(&sig.s) || !is_low_s(&sig.s) {
        return false;
    }

    let key = match recover_key(digest, &sig) {
        Ok(key) => key,
        Err(e) => {
            debug!(error = %e, "seal signature recovery failed");
            return false;
        }
    };

    // Second pass over (r, s) only; the recovery byte is already bound.
    let mut raw = [0u8; 64];
    raw[..32].copy_from_slice(&sig.r);
    raw[32..].copy_from_slice(&sig.s);
    let Ok(parsed) = Signature::from_slice(&raw) else {
        return false;
    };
    if key.verify_prehash(digest, &parsed).is_err() {
        return false;
    }

    address_from_pubkey(&key) == *claimed
}

/// Recover the signer's address from a signature over `message_hash`.
pub fn recover_address(
    message_hash: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    recover_key(message_hash, signature).map(|key| address_from_pubkey(&key))
}

/// Recover the verifying key from a recoverable signature.
fn recover_key(
    message_hash: &Hash,
    signature: &EcdsaSignature,
) -> Result<VerifyingKey, SignatureError> {
    use zeroize::Zeroize;

    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let sig = match Signature::from_slice(&sig_bytes) {
        Ok(s) => {
            sig_bytes.zeroize();
            s
        }
        Err(_) => {
            sig_bytes.zeroize();
            return Err(SignatureError::InvalidFormat);
        }
    };

    VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)
}

/// Derive the 20-byte address from a public key: the last 20 bytes of the
/// Keccak-256 of the uncompressed point without its 0x04 prefix.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Batch verify multiple signatures in parallel.
pub fn batch_verify(requests: &[VerificationRequest]) -> BatchVerificationResult {
    use rayon::prelude::*;

    let results: Vec<VerificationResult> = requests
        .par_iter()
        .map(|req| match req.expected_signer {
            Some(expected) => verify_ecdsa_signer(&req.message_hash, &req.signature, expected),
            None => verify_ecdsa(&req.message_hash, &req.signature),
        })
        .collect();

    BatchVerificationResult::from_results(results)
}

/// Constant-time check that `s` is strictly below half the curve order.
fn is_low_s(s: &[u8; 32]) -> bool {
    ct_less_than(s, &SECP256K1_HALF_ORDER)
}

/// Constant-time check that a scalar is in [1, n-1].
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }
    let not_zero: bool = (!is_zero).into();
    not_zero && ct_less_than(scalar, &SECP256K1_ORDER)
}

/// Constant-time big-endian comparison: `a < b`, no early return.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((a[i] < b[i]) as u8);
        let byte_greater = Choice::from((a[i] > b[i]) as u8);
        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less.into()
}

/// Parse a recovery id from a v byte. Valid values: 0, 1, 27, 28.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };
    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Invert an S value: s' = n - s.
#[cfg(test)]
fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}
