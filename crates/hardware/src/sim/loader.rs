//! Program Image Loader.
//!
//! This module reads SP memory images. It performs:
//! 1. **File access:** Opens the image and maps I/O failures to [`SimError::ImageOpen`].
//! 2. **Parsing:** One hexadecimal 32-bit word per line; surrounding whitespace
//!    and blank lines are ignored.
//! 3. **Truncation:** Words beyond the SRAM height are dropped with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::common::error::SimError;
use crate::soc::memory::sram::Sram;

/// Reads an image file from disk.
///
/// # Arguments
///
/// * `path` - Path to the image file.
/// * `capacity` - Maximum number of words to keep (the SRAM height).
///
/// # Errors
///
/// [`SimError::ImageOpen`] if the file cannot be opened or read, and
/// [`SimError::ImageFormat`] for a line that is not a hex word.
pub fn load_image(path: &Path, capacity: usize) -> Result<Vec<u32>, SimError> {
    let file = File::open(path).map_err(|source| SimError::ImageOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse_image(BufReader::new(file), capacity).map_err(|e| match e {
        SimError::Io(source) => SimError::ImageOpen {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!(path = %path.display(), words = words.len(), "loaded program image");
    Ok(words)
}

/// Parses an image from any buffered reader.
///
/// # Errors
///
/// [`SimError::ImageFormat`] naming the one-based line number of the first
/// malformed line, or [`SimError::Io`] if reading fails.
///
/// # Examples
///
/// ```
/// use sp_core::sim::loader::parse_image;
///
/// let words = parse_image("00800005\n\n  31000000 \n".as_bytes(), 16).unwrap();
/// assert_eq!(words, vec![0x0080_0005, 0x3100_0000]);
/// ```
pub fn parse_image<R: BufRead>(reader: R, capacity: usize) -> Result<Vec<u32>, SimError> {
    let mut words = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if words.len() == capacity {
            warn!(capacity, "image larger than memory, truncating");
            break;
        }
        let word = parse_word(text).ok_or_else(|| SimError::ImageFormat {
            line: idx + 1,
            text: text.to_owned(),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// One to eight hex digits, either case.
fn parse_word(text: &str) -> Option<u32> {
    if text.len() > 8 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(text, 16).ok()
}

/// Copies an image into an SRAM starting at address 0.
pub fn install(sram: &mut Sram, image: &[u32]) {
    for (addr, &word) in image.iter().take(sram.height()).enumerate() {
        sram.poke(addr as u16, word);
    }
}
