#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input claimed to be hex but is not: odd length, shorter than one
    /// byte, or contains non-hex characters. Carries the offending value.
    #[error("invalid hex encoding: {0:?}")]
    InvalidEncoding(String),

    /// Unknown or unsupported hash algorithm identifier.
    #[error("unsupported hash algorithm: {0:?}")]
    Configuration(String),
}
