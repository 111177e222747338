//! Error taxonomy for the oracle.
//!
//! Every failure is fatal to the current invocation: the pipeline stops at the
//! first error and propagates it to the caller unchanged. There is no partial
//! output and no retry.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, decoding, or writing hex streams.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Missing or unreadable input, or an unwritable output path.
    #[error("{}: {source}", path.display())]
    Io {
        /// File that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A non-blank line is not a base-16 unsigned 32-bit value.
    #[error("{}:{line}: invalid hex token {token:?}", path.display())]
    Parse {
        /// File containing the bad line.
        path: PathBuf,
        /// 1-indexed line number.
        line: usize,
        /// The trimmed offending text.
        token: String,
    },

    /// Out-of-range access into one of the flat model tables.
    #[error("index out of range: {what}[{index}] (len {len})")]
    Index {
        /// Table being indexed.
        what: &'static str,
        /// Requested position.
        index: usize,
        /// Table length.
        len: usize,
    },
}

impl OracleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, OracleError>;

/// Bounds-checked lookup into a flat table, reporting the table by name.
#[inline]
pub(crate) fn lookup(table: &[u32], what: &'static str, index: usize) -> Result<u32> {
    table.get(index).copied().ok_or(OracleError::Index {
        what,
        index,
        len: table.len(),
    })
}
