//! Output word stream, in the layout the hardware dumps.
//!
//! Per decoded sequence: every 1-indexed state, the log-probability word,
//! then `0xFFFF_FFFF`. Per empty sequence: `0xFFFF_FFFF` alone. Once at the
//! very end: `0x0000_0000`.

use std::path::Path;

use crate::error::Result;
use crate::hexio;
use crate::segment::{END_OF_SEQUENCE, END_OF_STREAM};
use crate::viterbi::DecodedPath;

/// Growing list of output words owned by one pipeline run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    words: Vec<u32>,
    closed: bool,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_decoded(&mut self, path: &DecodedPath) {
        debug_assert!(!self.closed, "output already terminated");
        self.words.extend_from_slice(&path.states);
        self.words.push(path.log_prob_bits);
        self.words.push(END_OF_SEQUENCE);
    }

    pub fn push_empty(&mut self) {
        debug_assert!(!self.closed, "output already terminated");
        self.words.push(END_OF_SEQUENCE);
    }

    /// Append the stream terminator. Idempotent.
    pub fn close(&mut self) {
        if !self.closed {
            self.words.push(END_OF_STREAM);
            self.closed = true;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Write the whole buffer to `path` in one go.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        hexio::store(path, &self.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_per_sequence() {
        let mut out = OutputBuffer::new();
        out.push_decoded(&DecodedPath {
            states: vec![1, 2, 2],
            log_prob_bits: 0xC098_0000,
        });
        out.push_empty();
        out.close();
        out.close();
        assert_eq!(
            out.words(),
            &[1, 2, 2, 0xC098_0000, 0xFFFF_FFFF, 0xFFFF_FFFF, 0]
        );
        assert!(out.is_closed());
    }
}
