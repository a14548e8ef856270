//! The export table installed onto a host's global scope
//!
//! Every host-visible name lives in [`EXPORTS`]. Adapters validate their
//! arguments through [`Args`], call exactly one primitive, and hand the
//! result back as a [`HostValue`].

use crate::codec::{self, Base64Variant};
use crate::error::{BridgeError, Result};
use crate::value::{Args, HostValue};
use crate::{aead, box_, pwhash, random, secretbox, sign};

/// Signature shared by every native adapter.
pub type NativeFn = fn(&Args<'_>) -> Result<HostValue>;

#[derive(Clone, Copy)]
pub enum ExportKind {
    Constant(f64),
    Function { arity: usize, call: NativeFn },
}

#[derive(Clone, Copy)]
pub struct Export {
    pub name: &'static str,
    pub kind: ExportKind,
}

const fn constant(name: &'static str, value: f64) -> Export {
    Export {
        name,
        kind: ExportKind::Constant(value),
    }
}

const fn function(name: &'static str, arity: usize, call: NativeFn) -> Export {
    Export {
        name,
        kind: ExportKind::Function { arity, call },
    }
}

pub static EXPORTS: &[Export] = &[
    constant("crypto_secretbox_KEYBYTES", secretbox::KEY_LEN as f64),
    constant("crypto_secretbox_NONCEBYTES", secretbox::NONCE_LEN as f64),
    constant("crypto_secretbox_MACBYTES", secretbox::MAC_LEN as f64),
    constant("crypto_pwhash_SALTBYTES", pwhash::SALT_LEN as f64),
    constant("crypto_pwhash_ALG_DEFAULT", pwhash::ALG_DEFAULT as f64),
    constant("crypto_pwhash_ALG_ARGON2I13", pwhash::ALG_ARGON2I13 as f64),
    constant("crypto_pwhash_ALG_ARGON2ID13", pwhash::ALG_ARGON2ID13 as f64),
    constant(
        "crypto_pwhash_OPSLIMIT_INTERACTIVE",
        pwhash::OPSLIMIT_INTERACTIVE as f64,
    ),
    constant(
        "crypto_pwhash_MEMLIMIT_INTERACTIVE",
        pwhash::MEMLIMIT_INTERACTIVE as f64,
    ),
    constant("crypto_pwhash_BYTES_MIN", pwhash::BYTES_MIN as f64),
    constant("crypto_pwhash_BYTES_MAX", pwhash::BYTES_MAX as f64),
    constant("crypto_box_PUBLICKEYBYTES", box_::KEY_LEN as f64),
    constant("crypto_box_SECRETKEYBYTES", box_::KEY_LEN as f64),
    constant("crypto_box_NONCEBYTES", box_::NONCE_LEN as f64),
    constant("crypto_box_MACBYTES", box_::MAC_LEN as f64),
    constant("crypto_sign_PUBLICKEYBYTES", sign::PUBLIC_KEY_LEN as f64),
    constant("crypto_sign_SECRETKEYBYTES", sign::SECRET_KEY_LEN as f64),
    constant("crypto_sign_BYTES", sign::SIGNATURE_LEN as f64),
    constant(
        "crypto_aead_xchacha20poly1305_ietf_KEYBYTES",
        aead::KEY_LEN as f64,
    ),
    constant(
        "crypto_aead_xchacha20poly1305_ietf_NPUBBYTES",
        aead::NONCE_LEN as f64,
    ),
    constant(
        "crypto_aead_xchacha20poly1305_ietf_ABYTES",
        aead::TAG_LEN as f64,
    ),
    constant("crypto_kdf_KEYBYTES", random::KDF_KEY_LEN as f64),
    constant(
        "base64_variant_ORIGINAL",
        Base64Variant::Original as u8 as f64,
    ),
    constant(
        "base64_variant_ORIGINAL_NO_PADDING",
        Base64Variant::OriginalNoPadding as u8 as f64,
    ),
    constant(
        "base64_variant_URLSAFE",
        Base64Variant::UrlSafe as u8 as f64,
    ),
    constant(
        "base64_variant_URLSAFE_NO_PADDING",
        Base64Variant::UrlSafeNoPadding as u8 as f64,
    ),
    function("multiply", 1, multiply),
    function("from_base64_to_arraybuffer", 2, from_base64_to_arraybuffer),
    function("to_base64_from_string", 2, to_base64_from_string),
    function("to_base64_from_uint8_array", 2, to_base64_from_uint8_array),
    function("to_hex", 1, to_hex),
    function("rn_crypto_secretbox_keygen", 0, crypto_secretbox_keygen),
    function(
        "rn_crypto_aead_xchacha20poly1305_ietf_keygen",
        0,
        crypto_aead_xchacha20poly1305_ietf_keygen,
    ),
    function("rn_crypto_kdf_keygen", 0, crypto_kdf_keygen),
    function("rn_crypto_secretbox_easy", 3, crypto_secretbox_easy),
    function("rn_crypto_secretbox_open_easy", 3, crypto_secretbox_open_easy),
    function(
        "rn_crypto_aead_xchacha20poly1305_ietf_encrypt",
        4,
        crypto_aead_xchacha20poly1305_ietf_encrypt,
    ),
    function(
        "rn_crypto_aead_xchacha20poly1305_ietf_decrypt",
        4,
        crypto_aead_xchacha20poly1305_ietf_decrypt,
    ),
    function("rn_crypto_box_keypair", 0, crypto_box_keypair),
    function("rn_crypto_box_easy", 4, crypto_box_easy),
    function("rn_crypto_box_open_easy", 4, crypto_box_open_easy),
    function("rn_crypto_sign_keypair", 0, crypto_sign_keypair),
    function("rn_crypto_sign_detached", 2, crypto_sign_detached),
    function("rn_crypto_sign_verify_detached", 3, crypto_sign_verify_detached),
    function("rn_crypto_pwhash", 6, crypto_pwhash),
    function("rn_randombytes_buf", 1, randombytes_buf),
    function("rn_randombytes_uniform", 1, randombytes_uniform),
];

#[cfg(test)]
fn find(name: &str) -> Option<&'static Export> {
    EXPORTS.iter().find(|export| export.name == name)
}

/// Installation smoke test; always 24.
fn multiply(_args: &Args<'_>) -> Result<HostValue> {
    Ok(HostValue::Number(24.0))
}

fn variant(args: &Args<'_>, index: usize) -> Result<Base64Variant> {
    let tag = args.u32(index, "variant")?;
    u8::try_from(tag)
        .ok()
        .and_then(|tag| Base64Variant::try_from(tag).ok())
        .ok_or_else(|| {
            BridgeError::invalid_argument(
                args.function(),
                "variant",
                "must be a base64_variant_* constant",
            )
        })
}

fn from_base64_to_arraybuffer(args: &Args<'_>) -> Result<HostValue> {
    let b64 = args.string(0, "value")?;
    let variant = variant(args, 1)?;
    let bin = codec::decode(b64, variant).map_err(|e| e.in_function(args.function()))?;
    Ok(bin.into())
}

fn to_base64_from_string(args: &Args<'_>) -> Result<HostValue> {
    let text = args.string(0, "value")?;
    let variant = variant(args, 1)?;
    let b64 = codec::encode(text.as_bytes(), variant).map_err(|e| e.in_function(args.function()))?;
    Ok(b64.into())
}

fn to_base64_from_uint8_array(args: &Args<'_>) -> Result<HostValue> {
    let bin = args.buffer(0, "value")?;
    let variant = variant(args, 1)?;
    let b64 = codec::encode(bin, variant).map_err(|e| e.in_function(args.function()))?;
    Ok(b64.into())
}

fn to_hex(args: &Args<'_>) -> Result<HostValue> {
    Ok(codec::to_hex(args.bytes(0, "value")?).into())
}

fn crypto_secretbox_keygen(_args: &Args<'_>) -> Result<HostValue> {
    Ok(secretbox::keygen().into())
}

fn crypto_aead_xchacha20poly1305_ietf_keygen(_args: &Args<'_>) -> Result<HostValue> {
    Ok(aead::keygen().into())
}

fn crypto_kdf_keygen(_args: &Args<'_>) -> Result<HostValue> {
    Ok(random::kdf_keygen().into())
}

fn crypto_secretbox_easy(args: &Args<'_>) -> Result<HostValue> {
    let message = args.bytes(0, "message")?;
    let nonce = args.sized_buffer::<{ secretbox::NONCE_LEN }>(1, "nonce")?;
    let key = args.sized_buffer::<{ secretbox::KEY_LEN }>(2, "key")?;
    let sealed = secretbox::seal(message, nonce, key).map_err(|e| e.in_function(args.function()))?;
    Ok(sealed.into())
}

fn crypto_secretbox_open_easy(args: &Args<'_>) -> Result<HostValue> {
    let ciphertext = args.bytes(0, "ciphertext")?;
    let nonce = args.sized_buffer::<{ secretbox::NONCE_LEN }>(1, "nonce")?;
    let key = args.sized_buffer::<{ secretbox::KEY_LEN }>(2, "key")?;
    let message = secretbox::open(ciphertext, nonce, key)
        .map_err(|e| e.in_function(args.function()))?;
    Ok(message.into())
}

fn crypto_aead_xchacha20poly1305_ietf_encrypt(args: &Args<'_>) -> Result<HostValue> {
    let message = args.bytes(0, "message")?;
    let additional_data = args.optional_bytes(1, "additional_data")?;
    let nonce = args.sized_buffer::<{ aead::NONCE_LEN }>(2, "nonce")?;
    let key = args.sized_buffer::<{ aead::KEY_LEN }>(3, "key")?;
    let ciphertext = aead::encrypt(message, additional_data, nonce, key)
        .map_err(|e| e.in_function(args.function()))?;
    Ok(ciphertext.into())
}

fn crypto_aead_xchacha20poly1305_ietf_decrypt(args: &Args<'_>) -> Result<HostValue> {
    let ciphertext = args.bytes(0, "ciphertext")?;
    let additional_data = args.optional_bytes(1, "additional_data")?;
    let nonce = args.sized_buffer::<{ aead::NONCE_LEN }>(2, "nonce")?;
    let key = args.sized_buffer::<{ aead::KEY_LEN }>(3, "key")?;
    let message = aead::decrypt(ciphertext, additional_data, nonce, key)
        .map_err(|e| e.in_function(args.function()))?;
    Ok(message.into())
}

fn crypto_pwhash(args: &Args<'_>) -> Result<HostValue> {
    let key_len = args.usize(0, "keyLength")?;
    let password = args.bytes(1, "password")?;
    let salt = args.sized_buffer::<{ pwhash::SALT_LEN }>(2, "salt")?;
    let opslimit = args.u32(3, "opsLimit")?;
    let memlimit = args.u64(4, "memLimit")?;
    let alg = pwhash::algorithm(args.u32(5, "algorithm")?).ok_or_else(|| {
        BridgeError::invalid_argument(
            args.function(),
            "algorithm",
            "must be crypto_pwhash_ALG_ARGON2I13 or crypto_pwhash_ALG_ARGON2ID13",
        )
    })?;
    let key = pwhash::derive_key(key_len, password, salt, opslimit, memlimit, alg)
        .map_err(|e| e.in_function(args.function()))?;
    Ok(key.into())
}

fn crypto_box_keypair(_args: &Args<'_>) -> Result<HostValue> {
    Ok(box_::keypair().into())
}

fn crypto_box_easy(args: &Args<'_>) -> Result<HostValue> {
    let message = args.bytes(0, "message")?;
    let nonce = args.sized_buffer::<{ box_::NONCE_LEN }>(1, "nonce")?;
    let public_key = args.sized_buffer::<{ box_::KEY_LEN }>(2, "publicKey")?;
    let private_key = args.sized_buffer::<{ box_::KEY_LEN }>(3, "privateKey")?;
    let sealed = box_::easy(message, nonce, public_key, private_key)
        .map_err(|e| e.in_function(args.function()))?;
    Ok(sealed.into())
}

fn crypto_box_open_easy(args: &Args<'_>) -> Result<HostValue> {
    let ciphertext = args.bytes(0, "ciphertext")?;
    let nonce = args.sized_buffer::<{ box_::NONCE_LEN }>(1, "nonce")?;
    let public_key = args.sized_buffer::<{ box_::KEY_LEN }>(2, "publicKey")?;
    let private_key = args.sized_buffer::<{ box_::KEY_LEN }>(3, "privateKey")?;
    let message = box_::open_easy(ciphertext, nonce, public_key, private_key)
        .map_err(|e| e.in_function(args.function()))?;
    Ok(message.into())
}

fn crypto_sign_keypair(_args: &Args<'_>) -> Result<HostValue> {
    Ok(sign::keypair().into())
}

fn crypto_sign_detached(args: &Args<'_>) -> Result<HostValue> {
    let message = args.bytes(0, "message")?;
    let private_key = args.sized_buffer::<{ sign::SECRET_KEY_LEN }>(1, "privateKey")?;
    let signature =
        sign::detached(message, private_key).map_err(|e| e.in_function(args.function()))?;
    Ok(signature.into())
}

fn crypto_sign_verify_detached(args: &Args<'_>) -> Result<HostValue> {
    let signature = args.sized_buffer::<{ sign::SIGNATURE_LEN }>(0, "signature")?;
    let message = args.bytes(1, "message")?;
    let public_key = args.sized_buffer::<{ sign::PUBLIC_KEY_LEN }>(2, "publicKey")?;
    Ok(sign::verify_detached(signature, message, public_key).into())
}

fn randombytes_buf(args: &Args<'_>) -> Result<HostValue> {
    let size = args.usize(0, "size")?;
    Ok(random::bytes(size).into())
}

fn randombytes_uniform(args: &Args<'_>) -> Result<HostValue> {
    let upper_bound = args.u32(0, "upperBound")?;
    Ok(HostValue::Number(random::uniform(upper_bound) as f64))
}
