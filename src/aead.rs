//! XChaCha20-Poly1305 (IETF) authenticated encryption with associated data
//!
//! Ciphertexts are laid out as libsodium's
//! `crypto_aead_xchacha20poly1305_ietf_encrypt` produces them:
//! ciphertext followed by a 16-byte tag.

use crate::error::{BridgeError, ErrorCategory, ErrorKind, Result};
use chacha20poly1305::aead::generic_array::typenum::Unsigned;
use chacha20poly1305::aead::{Aead, AeadCore, Key, KeyInit, KeySizeUser, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use rand::RngCore;
use rand::rngs::OsRng;

/// Length of an AEAD key in bytes
pub const KEY_LEN: usize = <XChaCha20Poly1305 as KeySizeUser>::KeySize::USIZE;

/// Length of the public nonce in bytes
pub const NONCE_LEN: usize = <XChaCha20Poly1305 as AeadCore>::NonceSize::USIZE;

/// Length of the authentication tag appended to every ciphertext
pub const TAG_LEN: usize = <XChaCha20Poly1305 as AeadCore>::TagSize::USIZE;

/// Generate a random AEAD key
pub fn keygen() -> Vec<u8> {
    let mut key = vec![0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key);
    key
}

pub fn encrypt(
    message: &[u8],
    additional_data: &[u8],
    nonce: &[u8; NONCE_LEN],
    key: &[u8; KEY_LEN],
) -> Result<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(Key::<XChaCha20Poly1305>::from_slice(key));
    let payload = Payload {
        msg: message,
        aad: additional_data,
    };
    cipher
        .encrypt(XNonce::from_slice(nonce), payload)
        .map_err(|e| {
            BridgeError::with_kind(
                ErrorCategory::Internal,
                ErrorKind::AeadFailure,
                format!("encryption failed: {}", e),
            )
        })
}

pub fn decrypt(
    ciphertext: &[u8],
    additional_data: &[u8],
    nonce: &[u8; NONCE_LEN],
    key: &[u8; KEY_LEN],
) -> Result<Vec<u8>> {
    if ciphertext.len() < TAG_LEN {
        return Err(BridgeError::with_kind(
            ErrorCategory::User,
            ErrorKind::AuthenticationFailed,
            "input likely truncated; shorter than the authentication tag",
        ));
    }

    let cipher = XChaCha20Poly1305::new(Key::<XChaCha20Poly1305>::from_slice(key));
    let payload = Payload {
        msg: ciphertext,
        aad: additional_data,
    };
    cipher
        .decrypt(XNonce::from_slice(nonce), payload)
        .map_err(|_| {
            BridgeError::with_kind(
                ErrorCategory::User,
                ErrorKind::AuthenticationFailed,
                "corrupt input, tampered-with data, wrong key, or wrong additional data",
            )
        })
}
