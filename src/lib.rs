//! sodium-bridge - libsodium-style primitives for scripting hosts
//!
//! The crate exposes a fixed table of constants and native functions
//! ([`exports::EXPORTS`]) that a host installs onto its global scope with
//! [`install`]. All cryptography is delegated to RustCrypto and dalek crates.

#![forbid(unsafe_code)]

pub mod aead;
pub mod box_;
pub mod codec;
pub mod error;
pub mod exports;
pub mod host;
pub mod pwhash;
pub mod random;
pub mod secretbox;
pub mod sign;
pub mod value;

pub use error::{BridgeError, ErrorCategory, ErrorKind, Result};
pub use host::{GlobalScope, Globals};
pub use value::{HostValue, KeyPair};

use exports::{EXPORTS, ExportKind};

/// Install every export onto `scope`. Call once, before any script runs.
pub fn install<S: GlobalScope + ?Sized>(scope: &mut S) {
    for export in EXPORTS {
        match export.kind {
            ExportKind::Constant(value) => {
                scope.define_constant(export.name, HostValue::Number(value))
            }
            ExportKind::Function { arity, call } => {
                scope.define_function(export.name, arity, call)
            }
        }
    }
    tracing::debug!(exports = EXPORTS.len(), "installed native exports");
}

/// Teardown hook for host shutdown. Nothing is held between calls, so there
/// is nothing to release.
pub fn clean_up() {
    tracing::debug!("clean up requested; no state to release");
}
