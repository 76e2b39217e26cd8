//! `.ls8` program image parser.
//!
//! An image is a text file with one machine byte per line, written as
//! eight binary digits. Everything after a `#` is a comment, and blank
//! lines are skipped:
//!
//! ```text
//! # print8.ls8: print the number 8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Failure to read, parse, or place a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("failed to read program image")]
    Io(#[from] std::io::Error),

    /// A line was not eight binary digits after comment stripping.
    #[error("line {line}: expected 8 binary digits, found {text:?}")]
    BadLine { line: usize, text: String },

    /// The image does not fit in memory at the requested origin.
    #[error("{len}-byte image at origin {origin:#04X} runs past the end of memory")]
    AddressOutOfRange { origin: u8, len: usize },
}

/// Parse `.ls8` text into machine bytes.
///
/// # Errors
///
/// Returns [`LoadError::BadLine`] for any line that is not exactly
/// eight binary digits once comments and whitespace are stripped.
pub fn parse(text: &str) -> Result<Vec<u8>, LoadError> {
    let mut image = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let code = match raw.split_once('#') {
            Some((before, _)) => before.trim(),
            None => raw.trim(),
        };
        if code.is_empty() {
            continue;
        }

        let bad_line = || LoadError::BadLine {
            line: index + 1,
            text: code.to_string(),
        };
        if code.len() != 8 || !code.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(bad_line());
        }
        let byte = u8::from_str_radix(code, 2).map_err(|_| bad_line())?;
        image.push(byte);
    }

    Ok(image)
}

/// Read and parse a `.ls8` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any line fails to
/// parse.
pub fn load_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}
