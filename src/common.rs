use crate::error::Error;

use bytes::Bytes;

/// A caller-supplied value on its way into the tree: raw bytes taken as-is,
/// or a hex string to be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashInput {
    Raw(Bytes),
    Hex(String),
}

impl HashInput {
    /// Coerce to canonical bytes. Raw input passes through unchanged; hex
    /// input must satisfy [`is_hex`] and decodes to its byte form. Invalid
    /// hex fails with [`Error::InvalidEncoding`] carrying the offending
    /// value.
    pub fn into_bytes(self) -> Result<Bytes, Error> {
        match self {
            HashInput::Raw(bytes) => Ok(bytes),
            HashInput::Hex(value) => {
                let decoded =
                    hex::decode(&value).map_err(|_| Error::InvalidEncoding(value.clone()))?;
                if decoded.is_empty() {
                    return Err(Error::InvalidEncoding(value));
                }
                Ok(Bytes::from(decoded))
            }
        }
    }
}

impl From<&[u8]> for HashInput {
    fn from(value: &[u8]) -> Self {
        Self::Raw(Bytes::copy_from_slice(value))
    }
}

impl<const N: usize> From<[u8; N]> for HashInput {
    fn from(value: [u8; N]) -> Self {
        Self::Raw(Bytes::copy_from_slice(&value))
    }
}

impl From<Vec<u8>> for HashInput {
    fn from(value: Vec<u8>) -> Self {
        Self::Raw(Bytes::from(value))
    }
}

impl From<Bytes> for HashInput {
    fn from(value: Bytes) -> Self {
        Self::Raw(value)
    }
}

impl From<&str> for HashInput {
    fn from(value: &str) -> Self {
        Self::Hex(value.to_string())
    }
}

impl From<String> for HashInput {
    fn from(value: String) -> Self {
        Self::Hex(value)
    }
}

/// Whether `value` is a well-formed hex string: even length of at least two
/// characters, `[0-9A-Fa-f]` only. A leading `0x` marker is not accepted
/// here; strip it first with [`strip_hex_prefix`].
pub fn is_hex(value: &str) -> bool {
    value.len() >= 2
        && value.len() % 2 == 0
        && value.bytes().all(|byte| byte.is_ascii_hexdigit())
}

/// Strip a conventional `0x`/`0X` marker if present.
pub fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Prefix `value` with the conventional `0x` marker if absent.
pub fn with_hex_prefix(value: &str) -> String {
    if value.starts_with("0x") || value.starts_with("0X") {
        value.to_string()
    } else {
        format!("0x{value}")
    }
}
