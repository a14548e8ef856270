//! Secret-key authenticated encryption using XSalsa20Poly1305
//!
//! Output of [`seal`] matches libsodium's `crypto_secretbox_easy`:
//! - MAC: 16 bytes (Poly1305)
//! - ciphertext: same length as the message

use crate::error::{BridgeError, ErrorCategory, ErrorKind, Result};
use crypto_secretbox::aead::generic_array::typenum::Unsigned;
use crypto_secretbox::aead::{Aead, AeadCore, Key, KeyInit, KeySizeUser};
use crypto_secretbox::{Nonce, XSalsa20Poly1305};
use rand::RngCore;
use rand::rngs::OsRng;

/// Length of a secretbox key in bytes
pub const KEY_LEN: usize = <XSalsa20Poly1305 as KeySizeUser>::KeySize::USIZE;

/// Length of a secretbox nonce in bytes
pub const NONCE_LEN: usize = <XSalsa20Poly1305 as AeadCore>::NonceSize::USIZE;

/// Length of the authentication tag prefixed to every sealed box
pub const MAC_LEN: usize = <XSalsa20Poly1305 as AeadCore>::TagSize::USIZE;

/// Generate a random secretbox key
pub fn keygen() -> Vec<u8> {
    let mut key = vec![0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key);
    key
}

/// Seal `message`, returning MAC || ciphertext
pub fn seal(message: &[u8], nonce: &[u8; NONCE_LEN], key: &[u8; KEY_LEN]) -> Result<Vec<u8>> {
    let cipher = XSalsa20Poly1305::new(Key::<XSalsa20Poly1305>::from_slice(key));
    cipher
        .encrypt(&Nonce::from(*nonce), message)
        .map_err(|e| {
            BridgeError::with_kind(
                ErrorCategory::Internal,
                ErrorKind::SecretboxFailure,
                format!("encryption failed: {}", e),
            )
        })
}

/// Open a box produced by [`seal`]
pub fn open(sealed: &[u8], nonce: &[u8; NONCE_LEN], key: &[u8; KEY_LEN]) -> Result<Vec<u8>> {
    if sealed.len() < MAC_LEN {
        return Err(BridgeError::with_kind(
            ErrorCategory::User,
            ErrorKind::AuthenticationFailed,
            "input likely truncated; shorter than the authentication tag",
        ));
    }

    let cipher = XSalsa20Poly1305::new(Key::<XSalsa20Poly1305>::from_slice(key));
    cipher.decrypt(&Nonce::from(*nonce), sealed).map_err(|_| {
        BridgeError::with_kind(
            ErrorCategory::User,
            ErrorKind::AuthenticationFailed,
            "corrupt input, tampered-with data, or wrong key",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_key() -> [u8; KEY_LEN] {
        [0x42u8; KEY_LEN]
    }

    fn fixed_nonce() -> [u8; NONCE_LEN] {
        [0x24u8; NONCE_LEN]
    }

    #[test]
    fn test_libsodium_sizes() {
        assert_eq!(KEY_LEN, 32);
        assert_eq!(NONCE_LEN, 24);
        assert_eq!(MAC_LEN, 16);
    }

    #[test]
    fn test_keygen_length_and_uniqueness() {
        let k1 = keygen();
        let k2 = keygen();
        assert_eq!(k1.len(), KEY_LEN);
        assert_eq!(k2.len(), KEY_LEN);
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_empty_message() {
        let sealed = seal(b"", &fixed_nonce(), &fixed_key()).unwrap();
        assert_eq!(sealed.len(), MAC_LEN);
        assert_eq!(open(&sealed, &fixed_nonce(), &fixed_key()).unwrap(), b"");
    }

    #[test]
    fn test_roundtrip() {
        let message = b"Hello World";
        let sealed = seal(message, &fixed_nonce(), &fixed_key()).unwrap();
        assert_eq!(sealed.len(), MAC_LEN + message.len());
        assert_eq!(open(&sealed, &fixed_nonce(), &fixed_key()).unwrap(), message);
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let ct1 = seal(b"hello world", &fixed_nonce(), &fixed_key()).unwrap();
        let ct2 = seal(b"hello world", &fixed_nonce(), &fixed_key()).unwrap();
        assert_eq!(ct1, ct2);

        let ct3 = seal(b"hello world", &[0x25u8; NONCE_LEN], &fixed_key()).unwrap();
        assert_ne!(ct1, ct3);
    }

    #[test]
    fn test_wrong_key() {
        let sealed = seal(b"secret data", &fixed_nonce(), &fixed_key()).unwrap();
        let err = open(&sealed, &fixed_nonce(), &[0u8; KEY_LEN]).unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::AuthenticationFailed));
        assert!(
            err.to_string()
                .contains("corrupt input, tampered-with data, or wrong key")
        );
    }

    #[test]
    fn test_tampered_ciphertext() {
        let mut sealed = seal(b"secret data", &fixed_nonce(), &fixed_key()).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        let err = open(&sealed, &fixed_nonce(), &fixed_key()).unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::AuthenticationFailed));
    }

    #[test]
    fn test_truncated_input() {
        let err = open(&[1, 2, 3], &fixed_nonce(), &fixed_key()).unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::AuthenticationFailed));
        assert!(err.to_string().contains("input likely truncated"));
    }

    #[test]
    fn test_large_message() {
        let message = vec![0x42u8; 128 * 1024]; // 128KB
        let sealed = seal(&message, &fixed_nonce(), &fixed_key()).unwrap();
        assert_eq!(open(&sealed, &fixed_nonce(), &fixed_key()).unwrap(), message);
    }
}
