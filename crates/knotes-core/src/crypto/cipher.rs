//! AES-256-GCM authenticated encryption for note payloads.
//!
//! Wire layout of an encrypted payload:
//!
//! ```text
//! [12-byte nonce][ciphertext][16-byte authentication tag]
//! ```
//!
//! A fresh random nonce is drawn for every call. Every decryption failure is
//! reported as the same `DecryptionFailure::Rejected` so error responses
//! cannot be used to tell a wrong key from tampered data.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::Rng;

use super::key::KEY_LENGTH;
use crate::error::{DecryptionFailure, KnotesError, Result};

/// Nonce length in bytes (96 bits for GCM).
pub const NONCE_LENGTH: usize = 12;

/// Authentication tag length in bytes (128 bits).
pub const TAG_LENGTH: usize = 16;

/// Encrypt `plaintext` under a 256-bit key.
///
/// Empty input returns an empty buffer without running the cipher.
///
/// # Errors
///
/// Returns `KnotesError::Validation` if `key` is not exactly 32 bytes.
///
/// # Examples
///
/// ```
/// use knotes_core::crypto::{decrypt, encrypt};
///
/// let key = [7u8; 32];
/// let sealed = encrypt(b"secret", &key).unwrap();
/// assert_eq!(decrypt(&sealed, &key).unwrap(), b"secret");
/// ```
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if plaintext.is_empty() {
        return Ok(Vec::new());
    }
    let cipher = new_cipher(key)?;

    let nonce = generate_nonce();
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| KnotesError::Validation("Encryption failed".to_string()))?;

    let mut buffer = Vec::with_capacity(NONCE_LENGTH + sealed.len());
    buffer.extend_from_slice(&nonce);
    buffer.extend_from_slice(&sealed);
    Ok(buffer)
}

/// Decrypt a buffer produced by [`encrypt`].
///
/// An empty buffer decrypts to an empty plaintext, mirroring [`encrypt`].
///
/// # Errors
///
/// - `KnotesError::Validation` if `key` is not exactly 32 bytes.
/// - `KnotesError::Decryption(Rejected)` if the buffer is truncated, the tag
///   does not verify, or the key is wrong.
pub fn decrypt(buffer: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if buffer.is_empty() {
        return Ok(Vec::new());
    }
    let cipher = new_cipher(key)?;

    if buffer.len() < NONCE_LENGTH + TAG_LENGTH {
        return Err(KnotesError::Decryption(DecryptionFailure::Rejected));
    }

    let (nonce, sealed) = buffer.split_at(NONCE_LENGTH);
    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| KnotesError::Decryption(DecryptionFailure::Rejected))
}

/// Relative size growth caused by encryption (0.5 means 50% larger).
///
/// Returns 0.0 when `original_size` is zero.
pub fn encryption_overhead(original_size: usize, encrypted_size: usize) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (encrypted_size as f64 - original_size as f64) / original_size as f64
}

fn new_cipher(key: &[u8]) -> Result<Aes256Gcm> {
    if key.len() != KEY_LENGTH {
        return Err(KnotesError::Validation(format!(
            "Key must be exactly {} bytes (got {})",
            KEY_LENGTH,
            key.len()
        )));
    }
    Aes256Gcm::new_from_slice(key)
        .map_err(|e| KnotesError::Validation(format!("Invalid AES key: {}", e)))
}

fn generate_nonce() -> [u8; NONCE_LENGTH] {
    let mut nonce = [0u8; NONCE_LENGTH];
    rand::rng().fill(&mut nonce);
    nonce
}
