//! Public-key authenticated encryption: X25519 + XSalsa20Poly1305
//!
//! Output of [`easy`] matches libsodium's `crypto_box_easy`, tag first and
//! then the ciphertext, so a box sealed by either side opens on the other.

use crate::error::{BridgeError, ErrorCategory, ErrorKind, Result};
use crate::value::KeyPair;
use crypto_box::aead::generic_array::typenum::Unsigned;
use crypto_box::aead::{Aead, AeadCore};
use crypto_box::{Nonce, PublicKey, SalsaBox, SecretKey};
use rand::RngCore;
use rand::rngs::OsRng;

/// Length of both the public and the secret key
pub const KEY_LEN: usize = crypto_box::KEY_SIZE;

pub const NONCE_LEN: usize = <SalsaBox as AeadCore>::NonceSize::USIZE;

pub const MAC_LEN: usize = <SalsaBox as AeadCore>::TagSize::USIZE;

pub const KEY_TYPE: &str = "x25519";

/// Generate a random X25519 key pair
pub fn keypair() -> KeyPair {
    let mut secret = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut secret);
    let public = SecretKey::from_bytes(secret).public_key();

    KeyPair {
        key_type: KEY_TYPE,
        private_key: secret.to_vec(),
        public_key: public.as_bytes().to_vec(),
    }
}

fn shared(public_key: &[u8; KEY_LEN], secret_key: &[u8; KEY_LEN]) -> SalsaBox {
    SalsaBox::new(
        &PublicKey::from_bytes(*public_key),
        &SecretKey::from_bytes(*secret_key),
    )
}

/// Seal `message` from the owner of `secret_key` to the owner of
/// `public_key`, returning MAC || ciphertext
pub fn easy(
    message: &[u8],
    nonce: &[u8; NONCE_LEN],
    public_key: &[u8; KEY_LEN],
    secret_key: &[u8; KEY_LEN],
) -> Result<Vec<u8>> {
    shared(public_key, secret_key)
        .encrypt(&Nonce::from(*nonce), message)
        .map_err(|e| {
            BridgeError::with_kind(
                ErrorCategory::Internal,
                ErrorKind::BoxFailure,
                format!("encryption failed: {}", e),
            )
        })
}

/// Open a box produced by [`easy`]; `public_key` is the sender's
pub fn open_easy(
    sealed: &[u8],
    nonce: &[u8; NONCE_LEN],
    public_key: &[u8; KEY_LEN],
    secret_key: &[u8; KEY_LEN],
) -> Result<Vec<u8>> {
    if sealed.len() < MAC_LEN {
        return Err(BridgeError::with_kind(
            ErrorCategory::User,
            ErrorKind::AuthenticationFailed,
            "input likely truncated; shorter than the authentication tag",
        ));
    }

    shared(public_key, secret_key)
        .decrypt(&Nonce::from(*nonce), sealed)
        .map_err(|_| {
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

    fn key(bytes: Vec<u8>) -> [u8; KEY_LEN] {
        bytes.try_into().unwrap()
    }

    #[test]
    fn test_libsodium_sizes() {
        assert_eq!(KEY_LEN, 32);
        assert_eq!(NONCE_LEN, 24);
        assert_eq!(MAC_LEN, 16);
    }

    #[test]
    fn test_keypair() {
        let pair = keypair();
        assert_eq!(pair.key_type, "x25519");
        assert_eq!(pair.private_key.len(), KEY_LEN);
        assert_eq!(pair.public_key.len(), KEY_LEN);
        assert_ne!(pair.private_key, keypair().private_key);

        let derived = SecretKey::from_bytes(key(pair.private_key)).public_key();
        assert_eq!(derived.as_bytes().as_slice(), pair.public_key.as_slice());
    }

    #[test]
    fn test_roundtrip_between_parties() {
        let alice = keypair();
        let bob = keypair();
        let nonce = [0x24u8; NONCE_LEN];

        let sealed = easy(
            b"Hello World",
            &nonce,
            &key(bob.public_key.clone()),
            &key(alice.private_key.clone()),
        )
        .unwrap();
        assert_eq!(sealed.len(), MAC_LEN + 11);

        let opened = open_easy(
            &sealed,
            &nonce,
            &key(alice.public_key),
            &key(bob.private_key),
        )
        .unwrap();
        assert_eq!(opened, b"Hello World");
    }

    #[test]
    fn test_wrong_recipient() {
        let alice = keypair();
        let bob = keypair();
        let eve = keypair();
        let nonce = [0x24u8; NONCE_LEN];

        let sealed = easy(
            b"secret",
            &nonce,
            &key(bob.public_key),
            &key(alice.private_key),
        )
        .unwrap();
        let err = open_easy(
            &sealed,
            &nonce,
            &key(alice.public_key),
            &key(eve.private_key),
        )
        .unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::AuthenticationFailed));
    }

    #[test]
    fn test_truncated() {
        let pair = keypair();
        let err = open_easy(
            &[0u8; MAC_LEN - 1],
            &[0u8; NONCE_LEN],
            &key(pair.public_key),
            &key(pair.private_key),
        )
        .unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::AuthenticationFailed));
    }
}
