//! Base64 with libsodium variant selection
//!
//! Variant tags use libsodium's integer values so host code written against
//! libsodium's `sodium_base64_VARIANT_*` constants keeps working:
//! - 1: original alphabet, padded
//! - 3: original alphabet, unpadded
//! - 5: URL-safe alphabet, padded
//! - 7: URL-safe alphabet, unpadded
//!
//! Hex output is lowercase, as `sodium_bin2hex` writes it.

use crate::error::{BridgeError, ErrorCategory, ErrorKind, Result};
use base64::Engine;
use base64::engine::GeneralPurpose;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Base64Variant {
    Original = 1,
    OriginalNoPadding = 3,
    UrlSafe = 5,
    UrlSafeNoPadding = 7,
}

impl Base64Variant {
    pub const ALL: [Base64Variant; 4] = [
        Base64Variant::Original,
        Base64Variant::OriginalNoPadding,
        Base64Variant::UrlSafe,
        Base64Variant::UrlSafeNoPadding,
    ];

    fn engine(self) -> &'static GeneralPurpose {
        match self {
            Base64Variant::Original => &STANDARD,
            Base64Variant::OriginalNoPadding => &STANDARD_NO_PAD,
            Base64Variant::UrlSafe => &URL_SAFE,
            Base64Variant::UrlSafeNoPadding => &URL_SAFE_NO_PAD,
        }
    }

    pub fn padded(self) -> bool {
        matches!(self, Base64Variant::Original | Base64Variant::UrlSafe)
    }
}

impl TryFrom<u8> for Base64Variant {
    type Error = u8;

    fn try_from(tag: u8) -> std::result::Result<Self, u8> {
        match tag {
            1 => Ok(Base64Variant::Original),
            3 => Ok(Base64Variant::OriginalNoPadding),
            5 => Ok(Base64Variant::UrlSafe),
            7 => Ok(Base64Variant::UrlSafeNoPadding),
            other => Err(other),
        }
    }
}

/// Exact length of the encoding of `bin_len` bytes, without any terminator.
pub fn encoded_len(bin_len: usize, variant: Base64Variant) -> Option<usize> {
    base64::encoded_len(bin_len, variant.padded())
}

/// Encode `bin` into a string of exactly [`encoded_len`] characters.
pub fn encode(bin: &[u8], variant: Base64Variant) -> Result<String> {
    let len = encoded_len(bin.len(), variant).ok_or_else(|| {
        BridgeError::with_kind(
            ErrorCategory::User,
            ErrorKind::InvalidArgument,
            "input too large to base64 encode",
        )
    })?;

    let mut out = vec![0u8; len];
    let written = variant.engine().encode_slice(bin, &mut out).map_err(|e| {
        BridgeError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::InternalInvariant,
            "encoded length disagrees with encoder",
            e,
        )
    })?;
    out.truncate(written);

    String::from_utf8(out).map_err(|e| {
        BridgeError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::InternalInvariant,
            "base64 encoder produced non-ASCII output",
            e,
        )
    })
}

/// Lowercase hex encoding of `bin`
pub fn to_hex(bin: &[u8]) -> String {
    hex::encode(bin)
}

/// Decode `b64` into a fresh buffer truncated to the decoded length.
pub fn decode(b64: &str, variant: Base64Variant) -> Result<Vec<u8>> {
    let mut bin = vec![0u8; base64::decoded_len_estimate(b64.len())];
    let len = variant
        .engine()
        .decode_slice(b64.as_bytes(), &mut bin)
        .map_err(|e| {
            BridgeError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::Decode,
                format!("base64 decoding failed: {}", e),
                e,
            )
        })?;
    bin.truncate(len);
    Ok(bin)
}
