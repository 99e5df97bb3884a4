//! Engine configuration.
//!
//! The server-wide secret is read exactly once, when the host process starts,
//! and validated eagerly. The engine receives the resulting [`EngineConfig`]
//! in its constructor and never consults the environment afterwards.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{KnotesError, Result};

/// Environment variable holding the server-wide secret.
pub const ENCRYPTION_KEY_ENV: &str = "KNOTES_ENCRYPTION_KEY";

/// Minimum length of the server secret, in characters.
pub const MIN_SERVER_SECRET_CHARS: usize = 32;

/// Default PBKDF2 iteration count.
///
/// Notes written by the legacy service used 1 000 iterations; hosts that must
/// read those notes configure that value explicitly.
pub const DEFAULT_KDF_ITERATIONS: u32 = 600_000;

/// Validated engine configuration.
#[derive(Debug)]
pub struct EngineConfig {
    server_secret: SecretString,
    kdf_iterations: u32,
}

impl EngineConfig {
    /// Build a configuration from an explicit secret.
    ///
    /// # Errors
    ///
    /// Returns `KnotesError::Configuration` if the secret is empty or shorter
    /// than [`MIN_SERVER_SECRET_CHARS`] characters.
    pub fn new(server_secret: impl Into<String>) -> Result<Self> {
        let secret: String = server_secret.into();
        validate_server_secret(&secret)?;
        Ok(Self {
            server_secret: SecretString::from(secret),
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
        })
    }

    /// Build a configuration from `KNOTES_ENCRYPTION_KEY`.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var(ENCRYPTION_KEY_ENV).map_err(|_| {
            KnotesError::Configuration(format!("{} is not set", ENCRYPTION_KEY_ENV))
        })?;
        Self::new(secret)
    }

    /// Override the PBKDF2 iteration count.
    pub fn with_kdf_iterations(mut self, iterations: u32) -> Result<Self> {
        if iterations == 0 {
            return Err(KnotesError::Configuration(
                "KDF iterations must be at least 1".to_string(),
            ));
        }
        self.kdf_iterations = iterations;
        Ok(self)
    }

    pub fn kdf_iterations(&self) -> u32 {
        self.kdf_iterations
    }

    pub(crate) fn server_secret(&self) -> &str {
        self.server_secret.expose_secret()
    }
}

fn validate_server_secret(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(KnotesError::Configuration(format!(
            "{} must be configured",
            ENCRYPTION_KEY_ENV
        )));
    }

    let length = secret.chars().count();
    if length < MIN_SERVER_SECRET_CHARS {
        return Err(KnotesError::Configuration(format!(
            "{} must be at least {} characters long (got {})",
            ENCRYPTION_KEY_ENV, MIN_SERVER_SECRET_CHARS, length
        )));
    }

    Ok(())
}
