//! Host-native values and argument marshaling
//!
//! Every value crossing the host boundary is one of a closed set of shapes.
//! Adapters never inspect raw host values directly; they go through [`Args`],
//! which produces `InvalidArgument` errors naming the exported function and
//! the offending argument.

use crate::error::{BridgeError, Result};

/// A value as seen by the scripting host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Opaque binary buffer owned by the host once returned.
    ArrayBuffer(Vec<u8>),
    /// Plain object with fixed property names, e.g. a key pair.
    Object(Vec<(&'static str, HostValue)>),
}

impl HostValue {
    /// Both `undefined` and `null` count as an absent argument.
    pub fn is_absent(&self) -> bool {
        matches!(self, HostValue::Undefined | HostValue::Null)
    }

    /// Human-readable shape name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Undefined => "undefined",
            HostValue::Null => "null",
            HostValue::Bool(_) => "boolean",
            HostValue::Number(_) => "number",
            HostValue::String(_) => "string",
            HostValue::ArrayBuffer(_) => "ArrayBuffer",
            HostValue::Object(_) => "object",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            HostValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            HostValue::ArrayBuffer(b) => Some(b),
            _ => None,
        }
    }

    /// Property `key` of an object value.
    pub fn field(&self, key: &str) -> Option<&HostValue> {
        match self {
            HostValue::Object(fields) => fields
                .iter()
                .find_map(|(name, value)| (*name == key).then_some(value)),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for HostValue {
    fn from(bytes: Vec<u8>) -> Self {
        HostValue::ArrayBuffer(bytes)
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_owned())
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Number(n)
    }
}

/// A generated key pair. Hosts see it as
/// `{ keyType, privateKey, publicKey }`, the shape libsodium wrappers use.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPair {
    pub key_type: &'static str,
    pub private_key: Vec<u8>,
    pub public_key: Vec<u8>,
}

impl From<KeyPair> for HostValue {
    fn from(pair: KeyPair) -> Self {
        HostValue::Object(vec![
            ("keyType", HostValue::from(pair.key_type)),
            ("privateKey", HostValue::from(pair.private_key)),
            ("publicKey", HostValue::from(pair.public_key)),
        ])
    }
}

static UNDEFINED: HostValue = HostValue::Undefined;

/// Positional arguments of a single native call, bound to the exported
/// function name for error reporting.
pub struct Args<'a> {
    function: &'static str,
    values: &'a [HostValue],
}

impl<'a> Args<'a> {
    pub fn new(function: &'static str, values: &'a [HostValue]) -> Self {
        Self { function, values }
    }

    /// The exported function these arguments belong to.
    pub fn function(&self) -> &'static str {
        self.function
    }

    /// Returns the argument at `index`; arguments the host did not pass
    /// read as `undefined`.
    pub fn get(&self, index: usize) -> &'a HostValue {
        self.values.get(index).unwrap_or(&UNDEFINED)
    }

    fn invalid(&self, name: &str, problem: &str) -> BridgeError {
        BridgeError::invalid_argument(self.function, name, problem)
    }

    fn present(&self, index: usize, name: &str) -> Result<&'a HostValue> {
        let value = self.get(index);
        if value.is_absent() {
            return Err(self.invalid(name, "can't be null"));
        }
        Ok(value)
    }

    pub fn string(&self, index: usize, name: &str) -> Result<&'a str> {
        self.present(index, name)?
            .as_str()
            .ok_or_else(|| self.invalid(name, "must be a string"))
    }

    pub fn buffer(&self, index: usize, name: &str) -> Result<&'a [u8]> {
        self.present(index, name)?
            .as_bytes()
            .ok_or_else(|| self.invalid(name, "must be an ArrayBuffer"))
    }

    /// A buffer of exactly `N` bytes, as required for keys and nonces.
    pub fn sized_buffer<const N: usize>(&self, index: usize, name: &str) -> Result<&'a [u8; N]> {
        self.buffer(index, name)?
            .try_into()
            .map_err(|_| self.invalid(name, &format!("must be {} bytes long", N)))
    }

    /// Message-like input: a string is taken as its UTF-8 bytes.
    pub fn bytes(&self, index: usize, name: &str) -> Result<&'a [u8]> {
        match self.present(index, name)? {
            HostValue::String(s) => Ok(s.as_bytes()),
            HostValue::ArrayBuffer(b) => Ok(b),
            _ => Err(self.invalid(name, "must be a string or an ArrayBuffer")),
        }
    }

    /// Like [`Args::bytes`] but absent values read as empty input.
    pub fn optional_bytes(&self, index: usize, name: &str) -> Result<&'a [u8]> {
        if self.get(index).is_absent() {
            return Ok(&[]);
        }
        self.bytes(index, name)
    }

    pub fn number(&self, index: usize, name: &str) -> Result<f64> {
        self.present(index, name)?
            .as_number()
            .ok_or_else(|| self.invalid(name, "must be a number"))
    }

    /// A non-negative integral number that fits in `u32`. Fractions are
    /// truncated the way a host would when narrowing to an integer.
    pub fn u32(&self, index: usize, name: &str) -> Result<u32> {
        let n = self.number(index, name)?.trunc();
        if !(0.0..=u32::MAX as f64).contains(&n) {
            return Err(self.invalid(name, "must be an unsigned 32-bit integer"));
        }
        Ok(n as u32)
    }

    /// Like [`Args::u32`] but for sizes.
    pub fn usize(&self, index: usize, name: &str) -> Result<usize> {
        let n = self.number(index, name)?.trunc();
        if !(0.0..=u32::MAX as f64).contains(&n) {
            return Err(self.invalid(name, "must be a valid length"));
        }
        Ok(n as usize)
    }

    /// Like [`Args::u32`] but for 64-bit limits such as the pwhash memory limit.
    pub fn u64(&self, index: usize, name: &str) -> Result<u64> {
        let n = self.number(index, name)?.trunc();
        // 2^53 is the largest integer a host number represents exactly.
        if !(0.0..=9_007_199_254_740_992.0).contains(&n) {
            return Err(self.invalid(name, "must be an unsigned integer"));
        }
        Ok(n as u64)
    }
}
