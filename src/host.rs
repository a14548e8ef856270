//! Host global scope abstraction
//!
//! A scripting host implements [`GlobalScope`] to receive the export table.
//! [`Globals`] is an in-memory implementation that also dispatches calls,
//! for embedders without a script engine and for tests.

use std::collections::HashMap;

use crate::error::{BridgeError, ErrorCategory, ErrorKind, MODULE_TAG, Result};
use crate::exports::NativeFn;
use crate::value::{Args, HostValue};

/// Receiver for installed exports; the counterpart of setting properties on
/// a script runtime's global object.
pub trait GlobalScope {
    fn define_constant(&mut self, name: &'static str, value: HostValue);

    fn define_function(&mut self, name: &'static str, arity: usize, call: NativeFn);
}

enum Global {
    Value(HostValue),
    Function { arity: usize, call: NativeFn },
}

/// In-memory global scope
#[derive(Default)]
pub struct Globals {
    entries: HashMap<&'static str, Global>,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of an installed constant.
    pub fn get(&self, name: &str) -> Option<&HostValue> {
        match self.entries.get(name)? {
            Global::Value(value) => Some(value),
            Global::Function { .. } => None,
        }
    }

    /// Declared argument count of an installed function.
    pub fn arity(&self, name: &str) -> Option<usize> {
        match self.entries.get(name)? {
            Global::Function { arity, .. } => Some(*arity),
            Global::Value(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke an installed function.
    ///
    /// Like a script runtime, the declared arity is not enforced: missing
    /// arguments read as `undefined` and extra ones are ignored.
    pub fn call(&self, name: &str, args: &[HostValue]) -> Result<HostValue> {
        let (name, call) = match self.entries.get_key_value(name) {
            Some((name, Global::Function { call, .. })) => (*name, *call),
            _ => {
                return Err(BridgeError::with_kind(
                    ErrorCategory::User,
                    ErrorKind::UnknownFunction,
                    format!("[{}] {} is not a function", MODULE_TAG, name),
                ));
            }
        };

        tracing::trace!(function = name, args = args.len(), "native call");
        call(&Args::new(name, args)).inspect_err(|e| {
            tracing::debug!(function = name, error = %e, "native call failed");
        })
    }
}

impl GlobalScope for Globals {
    fn define_constant(&mut self, name: &'static str, value: HostValue) {
        self.entries.insert(name, Global::Value(value));
    }

    fn define_function(&mut self, name: &'static str, arity: usize, call: NativeFn) {
        self.entries.insert(name, Global::Function { arity, call });
    }
}
