//! Input handling for note bodies and passwords.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::cli::PasswordArgs;
use crate::errors::CliError;

/// Read a note password from the named environment variable or a prompt.
///
/// Returns `None` when neither source was requested.
pub fn read_password(
    args: &PasswordArgs,
    confirm: bool,
) -> anyhow::Result<Option<Zeroizing<String>>> {
    if let Some(var) = &args.password_env {
        let value = std::env::var(var).map_err(|_| {
            CliError::invalid_input(format!("Environment variable {} is not set", var))
        })?;
        if value.is_empty() {
            return Err(CliError::invalid_input(format!("{} is empty", var)).into());
        }
        return Ok(Some(Zeroizing::new(value)));
    }

    if !args.prompt {
        return Ok(None);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "No TTY available for --prompt. Use --password-env instead.",
        )
        .into());
    }

    let mut prompt = Password::new().with_prompt("Note password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    let password = prompt
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
    Ok(Some(Zeroizing::new(password)))
}

/// Read note body from --body, --input FILE, or stdin.
///
/// An empty body is kept as empty content.
pub fn read_note_body(body: Option<String>, input: Option<&str>) -> anyhow::Result<String> {
    if let Some(value) = body {
        return Ok(value);
    }
    if let Some(path) = input {
        return std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e));
    }
    if io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "No note content. Use --body, --input FILE, or pipe content on stdin.",
        )
        .into());
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(buffer)
}
