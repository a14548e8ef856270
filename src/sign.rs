//! Detached Ed25519 signatures
//!
//! Secret keys use libsodium's 64-byte layout (seed || public key), so keys
//! exported from libsodium sign and verify here unchanged.

use crate::error::{BridgeError, ErrorCategory, ErrorKind, Result};
use crate::value::KeyPair;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

pub const PUBLIC_KEY_LEN: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

/// Seed followed by the public key
pub const SECRET_KEY_LEN: usize = ed25519_dalek::KEYPAIR_LENGTH;

pub const SIGNATURE_LEN: usize = ed25519_dalek::SIGNATURE_LENGTH;

pub const KEY_TYPE: &str = "ed25519";

/// Generate a random Ed25519 key pair
pub fn keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    KeyPair {
        key_type: KEY_TYPE,
        private_key: signing_key.to_keypair_bytes().to_vec(),
        public_key: signing_key.verifying_key().as_bytes().to_vec(),
    }
}

/// Sign `message`, returning the 64-byte signature alone
pub fn detached(message: &[u8], secret_key: &[u8; SECRET_KEY_LEN]) -> Result<Vec<u8>> {
    let signing_key = SigningKey::from_keypair_bytes(secret_key).map_err(|e| {
        BridgeError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Signature,
            "secret key does not match its embedded public key",
            e,
        )
    })?;
    Ok(signing_key.sign(message).to_bytes().to_vec())
}

/// Check `signature` over `message`. A public key that is not a valid curve
/// point never verifies.
pub fn verify_detached(
    signature: &[u8; SIGNATURE_LEN],
    message: &[u8],
    public_key: &[u8; PUBLIC_KEY_LEN],
) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    verifying_key
        .verify_strict(message, &Signature::from_bytes(signature))
        .is_ok()
}
