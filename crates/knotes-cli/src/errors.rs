//! CLI error types for structured error handling.
//!
//! Engine failures are mapped onto a small set of exit codes. Access
//! failures always print the same message, whatever check refused them.

use std::fmt;

use knotes_core::KnotesError;

pub mod exit_codes {
    pub const GENERAL: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const ACCESS_DENIED: i32 = 3;
    pub const CONFIGURATION: i32 = 4;
    pub const CORRUPT_DATA: i32 = 5;
}

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Server secret or config file unusable
    Configuration(String),

    /// Caller may not read this note
    AccessDenied(String),

    /// Invalid user input
    InvalidInput(String),

    /// Stored envelope could not be decoded
    CorruptData(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Configuration(message)
            | CliError::AccessDenied(message)
            | CliError::InvalidInput(message)
            | CliError::CorruptData(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Configuration(_) => exit_codes::CONFIGURATION,
            CliError::AccessDenied(_) => exit_codes::ACCESS_DENIED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::CorruptData(_) => exit_codes::CORRUPT_DATA,
        }
    }
}

impl From<KnotesError> for CliError {
    fn from(err: KnotesError) -> Self {
        let message = err.public_message();
        match err {
            KnotesError::Configuration(_) => CliError::Configuration(message),
            KnotesError::Unauthorized | KnotesError::Decryption(_) => {
                CliError::AccessDenied(message)
            }
            KnotesError::Validation(_) => CliError::InvalidInput(message),
            KnotesError::Codec(_)
            | KnotesError::NotFound(_)
            | KnotesError::PinNotFound(_)
            | KnotesError::Storage(_) => {
                CliError::CorruptData(message)
            }
        }
    }
}

/// Exit code for any error reaching `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>()
        .map(CliError::exit_code)
        .unwrap_or(exit_codes::GENERAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knotes_core::DecryptionFailure;

    #[test]
    fn test_access_errors_share_message_and_code() {
        let unauthorized = CliError::from(KnotesError::Unauthorized);
        let wrong_password = CliError::from(KnotesError::Decryption(DecryptionFailure::Rejected));

        assert_eq!(unauthorized.exit_code(), exit_codes::ACCESS_DENIED);
        assert_eq!(wrong_password.exit_code(), exit_codes::ACCESS_DENIED);
        assert_eq!(unauthorized.to_string(), wrong_password.to_string());
    }

    #[test]
    fn test_exit_code_for_plain_anyhow() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), exit_codes::GENERAL);

        let err = anyhow::Error::new(CliError::invalid_input("bad"));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
    }
}
