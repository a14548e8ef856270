use std::error::Error as StdError;

use thiserror::Error;

/// Tag prefixed to every argument-validation message so hosts can filter
/// log output coming from this layer.
pub const MODULE_TAG: &str = "sodium-bridge";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Any failure that cannot be confidently attributed to any other error
    /// category in this enum.
    ///
    /// Use of Internal is never a guarantee that the caller did nothing
    /// wrong, merely that the code cannot tell.
    Internal,

    /// The caller passed arguments that are absent, of the wrong shape, or
    /// rejected by the underlying primitive.
    User,
}

/// Fine-grained condition flags for hosts that want to branch on error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required argument was absent or had the wrong runtime shape.
    InvalidArgument,
    /// The base64 decoder rejected its input.
    Decode,
    /// Authentication failed due to a wrong key, nonce, or tampered data.
    AuthenticationFailed,
    /// XSalsa20Poly1305 failed to seal data.
    SecretboxFailure,
    /// XChaCha20Poly1305 failed to seal data.
    AeadFailure,
    /// Argon2 rejected its parameters or failed to hash.
    PasswordHash,
    /// XSalsa20Poly1305 failed to seal a public-key box.
    BoxFailure,
    /// The signing key was malformed.
    Signature,
    /// The host called a name that is not an installed function.
    UnknownFunction,
    /// Unexpected state reached within bridge logic.
    InternalInvariant,
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct BridgeError {
    /// Broad error category, always provided.
    pub category: ErrorCategory,
    /// Optional specific condition tag. Any code consuming errors MUST
    /// handle the absence of a defined kind.
    pub kind: Option<ErrorKind>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl BridgeError {
    /// Creates a new error that also tags the failure with a kind.
    pub fn with_kind(category: ErrorCategory, kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that carries both a kind tag and the originating source error.
    pub fn with_kind_and_source(
        category: ErrorCategory,
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Adds the `[sodium-bridge][function]` prefix to a primitive's failure,
    /// keeping the kind and the original error as source.
    pub fn in_function(self, function: &str) -> Self {
        let msg = format!("[{}][{}] {}", MODULE_TAG, function, self.msg);
        self.with_context(msg)
    }

    /// An `InvalidArgument` error for `argument` of the exported function
    /// `function`, e.g. `[sodium-bridge][to_base64_from_string] value can't be null`.
    pub fn invalid_argument(function: &str, argument: &str, problem: &str) -> Self {
        Self::with_kind(
            ErrorCategory::User,
            ErrorKind::InvalidArgument,
            format!("[{}][{}] {} {}", MODULE_TAG, function, argument, problem),
        )
    }

    /// Wraps the current error with a higher-level message while preserving the original as source.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        let category = self.category;
        let kind = self.kind;
        Self {
            category,
            kind,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_argument_message() {
        let err = BridgeError::invalid_argument("from_base64_to_arraybuffer", "value", "can't be null");
        assert_eq!(
            err.to_string(),
            "[sodium-bridge][from_base64_to_arraybuffer] value can't be null"
        );
        assert_eq!(err.category, ErrorCategory::User);
        assert_eq!(err.kind, Some(ErrorKind::InvalidArgument));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_with_context_keeps_kind() {
        let err = BridgeError::with_kind(
            ErrorCategory::User,
            ErrorKind::AuthenticationFailed,
            "authentication failed",
        )
        .with_context("rn_crypto_secretbox_open_easy failed");

        assert_eq!(err.to_string(), "rn_crypto_secretbox_open_easy failed");
        assert_eq!(err.kind, Some(ErrorKind::AuthenticationFailed));
        assert_eq!(
            err.source().map(|e| e.to_string()),
            Some("authentication failed".to_string())
        );
    }

    #[test]
    fn test_in_function_prefixes_message() {
        let err = BridgeError::with_kind(
            ErrorCategory::User,
            ErrorKind::Decode,
            "base64 decoding failed",
        )
        .in_function("from_base64_to_arraybuffer");

        assert_eq!(
            err.to_string(),
            "[sodium-bridge][from_base64_to_arraybuffer] base64 decoding failed"
        );
        assert_eq!(err.category, ErrorCategory::User);
        assert_eq!(err.kind, Some(ErrorKind::Decode));
        assert_eq!(
            err.source().map(|e| e.to_string()),
            Some("base64 decoding failed".to_string())
        );
    }
}
