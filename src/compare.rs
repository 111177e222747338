//! Line-by-line comparison of two output dumps.
//!
//! Both files are read whole and every line is trimmed. Files with different
//! line counts never match and are not compared line by line; otherwise each
//! differing line is reported with its 1-indexed number.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{OracleError, Result};

/// One line that differs between the two files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineMismatch {
    /// 1-indexed line number.
    pub line: usize,
    pub left: String,
    pub right: String,
}

impl fmt::Display for LineMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {} != {}", self.line, self.left, self.right)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompareReport {
    pub left_lines: usize,
    pub right_lines: usize,
    pub mismatches: Vec<LineMismatch>,
}

impl CompareReport {
    pub fn line_counts_match(&self) -> bool {
        self.left_lines == self.right_lines
    }

    pub fn is_match(&self) -> bool {
        self.line_counts_match() && self.mismatches.is_empty()
    }
}

/// Compare two texts already in memory.
pub fn compare_text(left: &str, right: &str) -> CompareReport {
    let left: Vec<&str> = left.lines().map(str::trim).collect();
    let right: Vec<&str> = right.lines().map(str::trim).collect();
    let mut report = CompareReport {
        left_lines: left.len(),
        right_lines: right.len(),
        mismatches: Vec::new(),
    };
    if !report.line_counts_match() {
        return report;
    }
    report.mismatches = left
        .iter()
        .zip(&right)
        .enumerate()
        .filter(|(_, (l, r))| l != r)
        .map(|(idx, (l, r))| LineMismatch {
            line: idx + 1,
            left: (*l).to_string(),
            right: (*r).to_string(),
        })
        .collect();
    report
}

/// Compare the files at `left` and `right`.
pub fn compare_files(left: impl AsRef<Path>, right: impl AsRef<Path>) -> Result<CompareReport> {
    let read = |path: &Path| fs::read_to_string(path).map_err(|e| OracleError::io(path, e));
    let left = read(left.as_ref())?;
    let right = read(right.as_ref())?;
    Ok(compare_text(&left, &right))
}
