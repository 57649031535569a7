//! Error types for the neo-rom crate.

use thiserror::Error;

/// Errors that can occur when building or parsing `.neo` containers.
#[derive(Error, Debug)]
pub enum NeoRomError {
    /// An internal precondition on a ROM buffer did not hold.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Truncated header: need at least {needed} bytes, got {got}")]
    TruncatedInput { needed: usize, got: usize },

    /// A caller-supplied metadata value could not be parsed.
    ///
    /// The builder recovers from this by storing zero in the field.
    #[error("Malformed {field} value: {value:?}")]
    MalformedMetadataField { field: &'static str, value: String },

    #[error("Invalid tag: expected NEO, found {0:02X?}")]
    InvalidTag([u8; 3]),

    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NeoRomError>;
