//! Gzip compression of note text.
//!
//! Content is compressed before it is encrypted. Empty text maps to an empty
//! byte buffer and back, so an empty note never produces a gzip header.

use std::io::{Read, Write};

use flate2::bufread::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{KnotesError, Result};

/// Compress UTF-8 text into a gzip stream.
///
/// # Examples
///
/// ```
/// use knotes_core::codec::{compress, decompress};
///
/// let bytes = compress("café ☕").unwrap();
/// assert_eq!(decompress(&bytes).unwrap(), "café ☕");
/// assert!(compress("").unwrap().is_empty());
/// ```
pub fn compress(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .map_err(|e| KnotesError::Codec(format!("Failed to compress content: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| KnotesError::Codec(format!("Failed to compress content: {}", e)))
}

/// Inflate a gzip stream produced by [`compress`] back into text.
///
/// Concatenated gzip members decode as one text, in order.
///
/// # Errors
///
/// Returns `KnotesError::Codec` if the stream is corrupt, truncated, has
/// trailing bytes that are not a gzip member, or does not decode to valid
/// UTF-8. Partial output is never returned.
pub fn decompress(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Ok(String::new());
    }

    let mut decoder = MultiGzDecoder::new(bytes);
    let mut inflated = Vec::new();
    decoder
        .read_to_end(&mut inflated)
        .map_err(|e| KnotesError::Codec(format!("Failed to decompress content: {}", e)))?;

    let trailing = decoder.into_inner().len();
    if trailing > 0 {
        return Err(KnotesError::Codec(format!(
            "{} trailing bytes after gzip stream",
            trailing
        )));
    }

    String::from_utf8(inflated)
        .map_err(|e| KnotesError::Codec(format!("Decompressed content is not UTF-8: {}", e)))
}

/// Fraction of space saved by compression (0.75 means 75% smaller).
///
/// Returns 0.0 when `original_size` is zero.
pub fn compression_ratio(original_size: usize, compressed_size: usize) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    1.0 - (compressed_size as f64 / original_size as f64)
}
