//! Envelope data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::{Salt, SALT_LENGTH};
use crate::error::{KnotesError, Result};
use crate::identity::CallerId;

/// Confidentiality policy attached to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExposureMode {
    /// Stored compressed, in the clear.
    Public,
    /// Encrypted under a key derived from the owner's identity.
    Private,
    /// Encrypted under a key derived from a caller-supplied password.
    PasswordShared,
}

impl ExposureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExposureMode::Public => "PUBLIC",
            ExposureMode::Private => "PRIVATE",
            ExposureMode::PasswordShared => "PASSWORD_SHARED",
        }
    }

    pub fn is_encrypted(&self) -> bool {
        !matches!(self, ExposureMode::Public)
    }
}

impl fmt::Display for ExposureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExposureMode {
    type Err = KnotesError;

    /// Case-insensitive; accepts `-` or `_` in `password-shared`.
    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PUBLIC" => Ok(ExposureMode::Public),
            "PRIVATE" => Ok(ExposureMode::Private),
            "PASSWORD_SHARED" => Ok(ExposureMode::PasswordShared),
            _ => Err(KnotesError::Validation(format!(
                "Unknown exposure mode: {}",
                value
            ))),
        }
    }
}

/// Mode selection for a single write.
///
/// The password travels with the intent that needs it, so a password-shared
/// write without a password is visible at the call site.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum WriteIntent<'a> {
    Public,
    Private,
    PasswordShared { password: &'a str },
}

impl WriteIntent<'_> {
    pub fn mode(&self) -> ExposureMode {
        match self {
            WriteIntent::Public => ExposureMode::Public,
            WriteIntent::Private => ExposureMode::Private,
            WriteIntent::PasswordShared { .. } => ExposureMode::PasswordShared,
        }
    }
}

impl fmt::Debug for WriteIntent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteIntent::Public => f.write_str("Public"),
            WriteIntent::Private => f.write_str("Private"),
            WriteIntent::PasswordShared { .. } => f
                .debug_struct("PasswordShared")
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Mode information readable without touching payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMetadata {
    pub mode: ExposureMode,
    pub requires_password: bool,
}

/// Persisted representation of a note's content.
///
/// Immutable once built. New envelopes come from
/// [`ConfidentialityEngine::encode`](super::ConfidentialityEngine::encode);
/// persisted ones are rebuilt with [`ConfidentialEnvelope::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidentialEnvelope {
    payload: Option<Vec<u8>>,
    salt: Option<Salt>,
    mode: ExposureMode,
    owner: CallerId,
}

impl ConfidentialEnvelope {
    pub(crate) fn new(
        payload: Option<Vec<u8>>,
        salt: Option<Salt>,
        mode: ExposureMode,
        owner: CallerId,
    ) -> Self {
        debug_assert_eq!(salt.is_some(), mode.is_encrypted());
        Self {
            payload,
            salt,
            mode,
            owner,
        }
    }

    /// Rebuild an envelope read back from persistence.
    ///
    /// A missing salt on an encrypted mode is accepted here and reported as a
    /// decryption failure on read, so the record is never treated as public.
    ///
    /// # Errors
    ///
    /// Returns `KnotesError::Validation` if the salt is not exactly
    /// [`SALT_LENGTH`] bytes, a public envelope carries a salt, or an
    /// anonymous owner holds a confidential envelope.
    pub fn restore(
        payload: Option<Vec<u8>>,
        salt: Option<Vec<u8>>,
        mode: ExposureMode,
        owner: CallerId,
    ) -> Result<Self> {
        let salt = match salt {
            Some(bytes) => Some(Salt::try_from(bytes.as_slice()).map_err(|_| {
                KnotesError::Validation(format!(
                    "Salt must be exactly {} bytes (got {})",
                    SALT_LENGTH,
                    bytes.len()
                ))
            })?),
            None => None,
        };

        if mode == ExposureMode::Public && salt.is_some() {
            return Err(KnotesError::Validation(
                "Public envelopes cannot carry a salt".to_string(),
            ));
        }
        if mode.is_encrypted() && owner.is_anonymous() {
            return Err(KnotesError::Validation(
                "Anonymous notes cannot be confidential".to_string(),
            ));
        }

        Ok(Self {
            payload,
            salt,
            mode,
            owner,
        })
    }

    /// Stored bytes: compressed text, or nonce‖ciphertext‖tag.
    /// `None` means the note has no content at all.
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn salt(&self) -> Option<&Salt> {
        self.salt.as_ref()
    }

    pub fn mode(&self) -> ExposureMode {
        self.mode
    }

    pub fn owner(&self) -> &CallerId {
        &self.owner
    }

    pub fn requires_password(&self) -> bool {
        self.mode == ExposureMode::PasswordShared
    }

    pub fn metadata(&self) -> EnvelopeMetadata {
        EnvelopeMetadata {
            mode: self.mode,
            requires_password: self.requires_password(),
        }
    }
}

/// Mode and password requirement of an envelope. No key derivation.
pub fn metadata_of(envelope: &ConfidentialEnvelope) -> EnvelopeMetadata {
    envelope.metadata()
}
