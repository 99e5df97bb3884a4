//! Read-side authorization.
//!
//! [`check_access`] is a pure function of the envelope mode, the owner, the
//! requester and whether a password was supplied. It runs before any key is
//! derived and, when access is allowed, names the key derivation path the
//! read must take.

use crate::error::{DecryptionFailure, KnotesError};
use crate::identity::CallerId;

use super::types::ExposureMode;

/// Key derivation path for an allowed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPath {
    /// No key; payload is only compressed.
    Plain,
    /// Owner identity plus server secret.
    Owner,
    /// Caller-supplied password.
    Password,
}

/// Why a read was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Private note, requester is not the owner.
    Unauthorized,
    /// Password-shared note, no password supplied.
    PasswordRequired,
}

impl From<Denial> for KnotesError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthorized => KnotesError::Unauthorized,
            Denial::PasswordRequired => {
                KnotesError::Decryption(DecryptionFailure::PasswordRequired)
            }
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow(KeyPath),
    Deny(Denial),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow(_))
    }
}

/// Decide whether `requester` may read a note.
///
/// - Public: always allowed.
/// - Private: allowed only for the owner. The anonymous caller never owns a
///   private note.
/// - PasswordShared: allowed for anyone who supplies a password; identity is
///   irrelevant. Whether the password is correct is settled by decryption.
pub fn check_access(
    mode: ExposureMode,
    owner: &CallerId,
    requester: &CallerId,
    password_supplied: bool,
) -> AccessDecision {
    match mode {
        ExposureMode::Public => AccessDecision::Allow(KeyPath::Plain),
        ExposureMode::Private => {
            if !requester.is_anonymous() && requester == owner {
                AccessDecision::Allow(KeyPath::Owner)
            } else {
                AccessDecision::Deny(Denial::Unauthorized)
            }
        }
        ExposureMode::PasswordShared => {
            if password_supplied {
                AccessDecision::Allow(KeyPath::Password)
            } else {
                AccessDecision::Deny(Denial::PasswordRequired)
            }
        }
    }
}
