//! Error types for periodic high-utility itemset mining.

use thiserror::Error;

/// Everything that can abort a mining run.
#[derive(Debug, Error)]
pub enum PhmError {
    /// A transaction record could not be decomposed into items and utilities.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The run parameters cannot produce a meaningful search.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Live utility-list storage would cross the configured memory limit.
    #[error("memory limit exceeded: requested {requested} bytes, {available} available")]
    MemoryExceeded { requested: usize, available: usize },

    /// Reading the database or writing a result failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PhmError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        PhmError::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for mining operations.
pub type Result<T> = std::result::Result<T, PhmError>;
