//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Two derivation paths share one KDF:
//! - owner keys mix the owner's identity with the server-wide secret, so a
//!   private note cannot be opened from its salt alone;
//! - password keys use the shared password only, so anyone holding the
//!   password can open the note without server configuration.

use std::sync::Arc;

use pbkdf2::pbkdf2_hmac;
use rand::Rng;
use sha2::Sha256;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::config::EngineConfig;
use crate::error::{KnotesError, Result};

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// Length of a per-note salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// A per-note salt.
pub type Salt = [u8; SALT_LENGTH];

/// A symmetric key derived from an owner identity or a password.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a fresh random salt.
///
/// Drawn from the thread-local CSPRNG, so concurrent callers never share
/// generator state.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LENGTH];
    rand::rng().fill(&mut salt);
    salt
}

/// Derives note keys under a fixed engine configuration.
#[derive(Debug, Clone)]
pub struct KeyDeriver {
    config: Arc<EngineConfig>,
}

impl KeyDeriver {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// Derive the key protecting a private note.
    ///
    /// Key material is `owner_id` followed by the server secret.
    ///
    /// # Errors
    ///
    /// Returns `KnotesError::Validation` if `owner_id` is empty or `salt` is
    /// not exactly [`SALT_LENGTH`] bytes.
    pub fn derive_owner_key(&self, owner_id: &str, salt: &[u8]) -> Result<DerivedKey> {
        if owner_id.is_empty() {
            return Err(KnotesError::Validation(
                "Owner ID cannot be empty".to_string(),
            ));
        }
        validate_salt(salt)?;

        let mut material = Zeroizing::new(String::with_capacity(
            owner_id.len() + self.config.server_secret().len(),
        ));
        material.push_str(owner_id);
        material.push_str(self.config.server_secret());

        Ok(self.derive(material.as_bytes(), salt))
    }

    /// Derive the key protecting a password-shared note.
    ///
    /// The server secret is not involved.
    ///
    /// # Errors
    ///
    /// Returns `KnotesError::Validation` if `password` is empty or `salt` is
    /// not exactly [`SALT_LENGTH`] bytes.
    pub fn derive_password_key(&self, password: &str, salt: &[u8]) -> Result<DerivedKey> {
        if password.is_empty() {
            return Err(KnotesError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }
        validate_salt(salt)?;

        Ok(self.derive(password.as_bytes(), salt))
    }

    fn derive(&self, material: &[u8], salt: &[u8]) -> DerivedKey {
        let mut key_bytes = [0u8; KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(material, salt, self.config.kdf_iterations(), &mut key_bytes);
        DerivedKey::from_bytes(key_bytes)
    }
}

fn validate_salt(salt: &[u8]) -> Result<()> {
    if salt.len() != SALT_LENGTH {
        return Err(KnotesError::Validation(format!(
            "Salt must be exactly {} bytes (got {})",
            SALT_LENGTH,
            salt.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SECRET: &str = "test-application-pepper-for-key-derivation";

    fn deriver_with_secret(secret: &str) -> KeyDeriver {
        let config = EngineConfig::new(secret)
            .unwrap()
            .with_kdf_iterations(1_000)
            .unwrap();
        KeyDeriver::new(Arc::new(config))
    }

    fn deriver() -> KeyDeriver {
        deriver_with_secret(SECRET)
    }

    #[test]
    fn test_owner_key_deterministic() {
        let deriver = deriver();
        let salt = generate_salt();

        let key1 = deriver.derive_owner_key("test-user-123", &salt).unwrap();
        let key2 = deriver.derive_owner_key("test-user-123", &salt).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
        assert_eq!(key1.as_bytes().len(), KEY_LENGTH);
    }

    #[test]
    fn test_password_key_deterministic() {
        let deriver = deriver();
        let salt = generate_salt();

        let key1 = deriver.derive_password_key("pw123", &salt).unwrap();
        let key2 = deriver.derive_password_key("pw123", &salt).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let deriver = deriver();

        let key1 = deriver.derive_owner_key("alice", &generate_salt()).unwrap();
        let key2 = deriver.derive_owner_key("alice", &generate_salt()).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_owner_different_key() {
        let deriver = deriver();
        let salt = generate_salt();

        let alice = deriver.derive_owner_key("alice", &salt).unwrap();
        let bob = deriver.derive_owner_key("bob", &salt).unwrap();

        assert_ne!(alice.as_bytes(), bob.as_bytes());
    }

    #[test]
    fn test_owner_key_depends_on_server_secret() {
        let salt = generate_salt();
        let other_secret = "another-application-pepper-for-key-derivation";

        let key1 = deriver().derive_owner_key("alice", &salt).unwrap();
        let key2 = deriver_with_secret(other_secret)
            .derive_owner_key("alice", &salt)
            .unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_password_key_ignores_server_secret() {
        let salt = generate_salt();
        let other_secret = "another-application-pepper-for-key-derivation";

        let key1 = deriver().derive_password_key("pw123", &salt).unwrap();
        let key2 = deriver_with_secret(other_secret)
            .derive_password_key("pw123", &salt)
            .unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_owner_and_password_paths_differ() {
        let deriver = deriver();
        let salt = generate_salt();

        let owner = deriver.derive_owner_key("same-value", &salt).unwrap();
        let password = deriver.derive_password_key("same-value", &salt).unwrap();

        assert_ne!(owner.as_bytes(), password.as_bytes());
    }

    #[test]
    fn test_known_pbkdf2_vector() {
        // RFC 7914 section 11, PBKDF2-HMAC-SHA256 with c = 1, first 32 bytes
        let config = EngineConfig::new(SECRET)
            .unwrap()
            .with_kdf_iterations(1)
            .unwrap();
        let deriver = KeyDeriver::new(Arc::new(config));
        let mut key_bytes = [0u8; KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(b"passwd", b"salt", 1, &mut key_bytes);
        assert_eq!(
            hex::encode(key_bytes),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
        // The salt length check guards the public API, so exercise the
        // internal path directly
        assert_eq!(deriver.derive(b"passwd", b"salt").as_bytes(), &key_bytes);
    }

    #[test]
    fn test_empty_owner_rejected() {
        let result = deriver().derive_owner_key("", &generate_salt());
        let err = result.unwrap_err();
        assert!(matches!(err, KnotesError::Validation(_)));
        assert!(err.to_string().contains("Owner ID cannot be empty"));
    }

    #[test]
    fn test_empty_password_rejected() {
        let result = deriver().derive_password_key("", &generate_salt());
        let err = result.unwrap_err();
        assert!(matches!(err, KnotesError::Validation(_)));
        assert!(err.to_string().contains("Password cannot be empty"));
    }

    #[test]
    fn test_wrong_salt_length_rejected() {
        let deriver = deriver();

        for bad in [&b"short"[..], &[0u8; 15][..], &[0u8; 17][..], &[][..]] {
            assert!(matches!(
                deriver.derive_owner_key("alice", bad),
                Err(KnotesError::Validation(_))
            ));
            assert!(matches!(
                deriver.derive_password_key("pw123", bad),
                Err(KnotesError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_salt_uniqueness() {
        let salts: HashSet<Salt> = (0..10_000).map(|_| generate_salt()).collect();
        assert_eq!(salts.len(), 10_000);
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = deriver()
            .derive_password_key("pw123", &generate_salt())
            .unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }

    #[test]
    fn test_derived_key_zeroizes_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<DerivedKey>();
    }
}
