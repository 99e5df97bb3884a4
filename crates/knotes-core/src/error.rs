//! Error types for Knotes core operations.
//!
//! One closed enum covers every failure the engine can report. Callers
//! pattern-match on the variant instead of inspecting messages.
//!
//! Access failures (`Unauthorized` and `Decryption`) are deliberately terse
//! in their `Display` output. The reason a decryption failed is available to
//! the orchestrating layer through [`KnotesError::decryption_failure`], but
//! is never part of the rendered message.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for Knotes operations.
pub type Result<T> = std::result::Result<T, KnotesError>;

/// Message shown to callers for any access failure.
pub const ACCESS_DENIED_MESSAGE: &str = "Cannot access this note";

/// Internal tag describing why decryption was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecryptionFailure {
    /// The note is password-shared and no password was supplied.
    PasswordRequired,

    /// The envelope claims to be encrypted but carries no salt.
    MetadataMissing,

    /// Authenticated decryption rejected the payload (wrong key, tampered or
    /// truncated data). Intentionally not broken down further.
    Rejected,
}

/// Core error type for Knotes operations.
#[derive(Debug, Error)]
pub enum KnotesError {
    /// Missing or unusable server configuration (fatal at startup)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed input to derivation, encryption or the write policy
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requester is not the owner of a private note
    #[error("Not authorized")]
    Unauthorized,

    /// Content could not be decrypted
    #[error("Decryption failed")]
    Decryption(DecryptionFailure),

    /// Compressed stream is corrupt or not valid UTF-8
    #[error("Codec error: {0}")]
    Codec(String),

    /// Note not found by ID
    #[error("Note not found: {0}")]
    NotFound(Uuid),

    /// Pin not found by ID
    #[error("Pin not found: {0}")]
    PinNotFound(Uuid),

    /// Note store failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl KnotesError {
    /// True for failures that must be rendered as a generic access denial.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, KnotesError::Unauthorized | KnotesError::Decryption(_))
    }

    /// The decryption failure tag, if this is a decryption error.
    pub fn decryption_failure(&self) -> Option<DecryptionFailure> {
        match self {
            KnotesError::Decryption(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Message safe to show to an end user.
    ///
    /// Both access failure kinds collapse into [`ACCESS_DENIED_MESSAGE`].
    pub fn public_message(&self) -> String {
        if self.is_access_denied() {
            ACCESS_DENIED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}
