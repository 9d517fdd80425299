//! Crate-wide error model.
//!
//! Every subsystem returns one of these variants rather than panicking.
//! Construction-time problems (bad thresholds, bad levels) are rejected
//! eagerly; a codec failure mid-comparison is treated as fatal to the whole
//! session rather than silently degrading the score.

use std::fmt;

use crate::compressor::Codec;

/// Errors produced anywhere in the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ElsimError {
    /// Construction-time argument rejected eagerly: empty filter, an
    /// out-of-range threshold, or a non-finite float in a config value.
    InvalidInput(String),
    /// A compression level outside `1..=9` was requested.
    InvalidLevel { level: i32 },
    /// The requested operation is not supported for the given codec, e.g.
    /// `logical_depth` on a codec with no decompressor.
    UnsupportedOperation(String),
    /// The underlying codec implementation returned an error.
    CodecFailure { codec: Codec },
    /// The signature builder could not resolve a referenced method or class.
    MissingSymbol(String),
    /// I/O failure, only ever produced by the CLI / external collaborators,
    /// never by the core engine itself.
    IoFailure(String),
}

impl fmt::Display for ElsimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElsimError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            ElsimError::InvalidLevel { level } => {
                write!(f, "invalid compression level {level} (must be 1..=9)")
            }
            ElsimError::UnsupportedOperation(msg) => write!(f, "unsupported operation: {msg}"),
            ElsimError::CodecFailure { codec } => write!(f, "codec failure in {codec:?}"),
            ElsimError::MissingSymbol(msg) => write!(f, "missing symbol: {msg}"),
            ElsimError::IoFailure(msg) => write!(f, "I/O failure: {msg}"),
        }
    }
}

impl std::error::Error for ElsimError {}

impl From<std::io::Error> for ElsimError {
    fn from(e: std::io::Error) -> Self {
        ElsimError::IoFailure(e.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ElsimError>;
