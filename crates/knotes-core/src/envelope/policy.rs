//! Encode-on-write and decode-on-read.
//!
//! The engine ties compression, key derivation and AEAD together:
//!
//! ```text
//! write: compress -> [derive key -> encrypt] -> envelope (+ salt)
//! read:  check_access -> [derive key -> decrypt] -> decompress
//! ```
//!
//! Every call is a pure function of its arguments plus the read-only engine
//! configuration and the CSPRNG, so one engine can serve any number of
//! threads without locking.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::codec;
use crate::config::EngineConfig;
use crate::crypto::{self, generate_salt, DerivedKey, KeyDeriver};
use crate::error::{DecryptionFailure, KnotesError, Result};
use crate::identity::CallerId;

use super::access::{check_access, AccessDecision, KeyPath};
use super::types::{ConfidentialEnvelope, ExposureMode, WriteIntent};

/// Content confidentiality engine.
#[derive(Debug, Clone)]
pub struct ConfidentialityEngine {
    keys: KeyDeriver,
}

impl ConfidentialityEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            keys: KeyDeriver::new(config),
        }
    }

    /// Key derivation used by this engine.
    pub fn keys(&self) -> &KeyDeriver {
        &self.keys
    }

    /// Build the envelope for one write.
    ///
    /// The effective mode is Public for an anonymous owner, whatever
    /// `intent` asks for. For an identified owner it is `intent`, defaulting
    /// to Private. Every confidential write draws a new salt.
    ///
    /// `content = None` produces an envelope without payload; the salt and
    /// mode are still recorded.
    ///
    /// # Errors
    ///
    /// Returns `KnotesError::Validation` if the effective mode is
    /// PasswordShared and the password is empty. The check runs before any
    /// compression, derivation or encryption.
    pub fn encode(
        &self,
        content: Option<&str>,
        intent: Option<WriteIntent<'_>>,
        owner: &CallerId,
    ) -> Result<ConfidentialEnvelope> {
        let intent = if owner.is_anonymous() {
            WriteIntent::Public
        } else {
            intent.unwrap_or(WriteIntent::Private)
        };

        if let WriteIntent::PasswordShared { password } = intent {
            if password.is_empty() {
                return Err(KnotesError::Validation(
                    "Password required for password-shared notes".to_string(),
                ));
            }
        }

        let mode = intent.mode();
        if mode == ExposureMode::Public {
            let payload = content.map(codec::compress).transpose()?;
            debug!(
                mode = %mode,
                payload_len = payload.as_ref().map_or(0, Vec::len),
                "Encoded note content"
            );
            return Ok(ConfidentialEnvelope::new(
                payload,
                None,
                mode,
                owner.clone(),
            ));
        }

        let salt = generate_salt();
        let payload = match content {
            Some(text) => {
                let compressed = codec::compress(text)?;
                let key = match intent {
                    WriteIntent::PasswordShared { password } => {
                        self.keys.derive_password_key(password, &salt)?
                    }
                    _ => self.keys.derive_owner_key(owner.as_str(), &salt)?,
                };
                Some(crypto::encrypt(&compressed, key.as_bytes())?)
            }
            None => None,
        };

        debug!(
            mode = %mode,
            payload_len = payload.as_ref().map_or(0, Vec::len),
            "Encoded note content"
        );
        Ok(ConfidentialEnvelope::new(
            payload,
            Some(salt),
            mode,
            owner.clone(),
        ))
    }

    /// Recover the plaintext of an envelope for `requester`.
    ///
    /// Returns `Ok(None)` for an envelope without content, once access has
    /// been granted.
    ///
    /// # Errors
    ///
    /// - `KnotesError::Unauthorized` if a private note is read by anyone but
    ///   its owner.
    /// - `KnotesError::Decryption` if a password-shared note is read without
    ///   a password, the password is wrong, the payload was tampered with,
    ///   or an encrypted envelope has no salt.
    /// - `KnotesError::Codec` if the decrypted stream is corrupt.
    pub fn decode(
        &self,
        envelope: &ConfidentialEnvelope,
        requester: &CallerId,
        password: Option<&str>,
    ) -> Result<Option<String>> {
        let password = password.filter(|value| !value.is_empty());

        let path = match check_access(
            envelope.mode(),
            envelope.owner(),
            requester,
            password.is_some(),
        ) {
            AccessDecision::Allow(path) => path,
            AccessDecision::Deny(denial) => {
                warn!(mode = %envelope.mode(), ?denial, "Note access denied");
                return Err(denial.into());
            }
        };

        let payload = match envelope.payload() {
            Some(payload) => payload,
            None => return Ok(None),
        };

        let compressed = match path {
            KeyPath::Plain => payload.to_vec(),
            KeyPath::Owner | KeyPath::Password => {
                let key = self.read_key(envelope, path, password)?;
                crypto::decrypt(payload, key.as_bytes()).inspect_err(|_| {
                    warn!(mode = %envelope.mode(), "Note decryption rejected");
                })?
            }
        };

        let text = codec::decompress(&compressed)?;
        debug!(mode = %envelope.mode(), payload_len = payload.len(), "Decoded note content");
        Ok(Some(text))
    }

    fn read_key(
        &self,
        envelope: &ConfidentialEnvelope,
        path: KeyPath,
        password: Option<&str>,
    ) -> Result<DerivedKey> {
        let salt = envelope.salt().ok_or_else(|| {
            warn!(mode = %envelope.mode(), "Encrypted note has no salt");
            KnotesError::Decryption(DecryptionFailure::MetadataMissing)
        })?;

        match (path, password) {
            (KeyPath::Password, Some(password)) => self.keys.derive_password_key(password, salt),
            (KeyPath::Password, None) => Err(KnotesError::Decryption(
                DecryptionFailure::PasswordRequired,
            )),
            _ => self
                .keys
                .derive_owner_key(envelope.owner().as_str(), salt),
        }
    }
}
