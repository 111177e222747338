//! Hex stream files: one 32-bit word per line, written as bare hex digits.
//!
//! Reading skips blank lines and keeps file order. Writing emits exactly eight
//! lowercase, zero-padded digits per word and a trailing newline after every
//! word, buffered in full and flushed once.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{OracleError, Result};

/// Load every word of a hex stream file, in file order.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| OracleError::io(path, e))?;
    let words = read_words(BufReader::new(file), path)?;
    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), words = words.len(), "loaded hex stream");
    Ok(words)
}

/// Parse hex lines from any reader. `origin` only labels errors.
///
/// Bytes that are not UTF-8 are a malformed token on that line, not a read
/// failure.
pub fn read_words<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<u32>> {
    let mut words = Vec::new();
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw.map_err(|e| OracleError::io(origin, e))?;
        let bad_token = |token: &str| OracleError::Parse {
            path: origin.to_path_buf(),
            line: idx + 1,
            token: token.to_string(),
        };
        let line = std::str::from_utf8(&raw)
            .map_err(|_| bad_token(String::from_utf8_lossy(&raw).trim()))?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let word = parse_word(token).ok_or_else(|| bad_token(token))?;
        words.push(word);
    }
    Ok(words)
}

/// Parse one bare base-16 token. A leading `+` or `0x` is rejected.
fn parse_word(token: &str) -> Option<u32> {
    if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(token, 16).ok()
}

/// Render one word the way the hardware dumps it.
#[inline]
pub fn format_word(word: u32) -> String {
    format!("{word:08x}")
}

/// Serialize `words` to any writer, one per line.
pub fn write_words<W: Write>(mut writer: W, words: &[u32]) -> std::io::Result<()> {
    for word in words {
        writeln!(writer, "{word:08x}")?;
    }
    writer.flush()
}

/// Write `words` to `path`, replacing any existing file.
pub fn store(path: impl AsRef<Path>, words: &[u32]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| OracleError::io(path, e))?;
    write_words(BufWriter::new(file), words).map_err(|e| OracleError::io(path, e))?;
    #[cfg(feature = "tracing")]
    tracing::info!(path = %path.display(), values = words.len(), "wrote output");
    Ok(())
}
