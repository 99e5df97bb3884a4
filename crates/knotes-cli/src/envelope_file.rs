//! On-disk envelope format.
//!
//! One JSON object per file. Binary fields are standard base64; the mode is
//! written the same way stored records name it (`PUBLIC`, `PRIVATE`,
//! `PASSWORD_SHARED`).

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use knotes_core::{CallerId, ConfidentialEnvelope, ExposureMode, Note};

use crate::errors::CliError;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct EnvelopeFile {
    pub format_version: u32,
    pub id: Uuid,
    pub owner: CallerId,
    pub mode: ExposureMode,
    pub requires_password: bool,
    pub salt: Option<String>,
    pub payload: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl EnvelopeFile {
    pub fn from_note(note: &Note) -> Self {
        let envelope = &note.envelope;
        Self {
            format_version: FORMAT_VERSION,
            id: note.id,
            owner: envelope.owner().clone(),
            mode: envelope.mode(),
            requires_password: envelope.requires_password(),
            salt: envelope.salt().map(|salt| STANDARD.encode(salt)),
            payload: envelope.payload().map(|payload| STANDARD.encode(payload)),
            created_at: note.created_at,
            modified_at: note.modified_at,
        }
    }

    /// Rebuild the note, validating the envelope fields.
    pub fn into_note(self) -> anyhow::Result<Note> {
        if self.format_version != FORMAT_VERSION {
            return Err(CliError::CorruptData(format!(
                "Unsupported envelope format version: {}",
                self.format_version
            ))
            .into());
        }
        let salt = decode_field("salt", self.salt.as_deref())?;
        let payload = decode_field("payload", self.payload.as_deref())?;
        let envelope = ConfidentialEnvelope::restore(payload, salt, self.mode, self.owner)
            .map_err(|e| CliError::CorruptData(e.to_string()))?;

        Ok(Note {
            id: self.id,
            envelope,
            created_at: self.created_at,
            modified_at: self.modified_at,
        })
    }
}

fn decode_field(name: &str, value: Option<&str>) -> anyhow::Result<Option<Vec<u8>>> {
    value
        .map(|encoded| {
            STANDARD
                .decode(encoded)
                .map_err(|e| CliError::CorruptData(format!("Invalid {} encoding: {}", name, e)))
        })
        .transpose()
        .map_err(Into::into)
}

pub fn write_envelope(note: &Note, path: Option<&str>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&EnvelopeFile::from_note(note))?;
    match path {
        Some(path) => std::fs::write(path, format!("{}\n", json))
            .map_err(|e| anyhow::anyhow!("Failed to write envelope {}: {}", path, e)),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

pub fn read_envelope(path: &Path) -> anyhow::Result<Note> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read envelope {}: {}", path.display(), e))?;
    let file: EnvelopeFile = serde_json::from_str(&contents).map_err(|e| {
        CliError::CorruptData(format!("Failed to parse envelope {}: {}", path.display(), e))
    })?;
    file.into_note()
}
