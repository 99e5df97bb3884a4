//! Note records handed to and from the note store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::envelope::{ConfidentialEnvelope, ExposureMode};
use crate::identity::CallerId;

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Unique identifier (UUIDv7, time ordered)
    pub id: Uuid,

    /// Content and its confidentiality metadata
    pub envelope: ConfidentialEnvelope,

    /// When this note was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl Note {
    pub fn owner(&self) -> &CallerId {
        self.envelope.owner()
    }

    pub fn metadata(&self) -> NoteMetadata {
        NoteMetadata::from(self)
    }
}

/// Metadata-only view of a note, for list views.
///
/// Built without reading the payload or deriving any key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMetadata {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub mode: ExposureMode,
    pub requires_password: bool,
}

impl From<&Note> for NoteMetadata {
    fn from(note: &Note) -> Self {
        let envelope = note.envelope.metadata();
        Self {
            id: note.id,
            created_at: note.created_at,
            modified_at: note.modified_at,
            mode: envelope.mode,
            requires_password: envelope.requires_password,
        }
    }
}

/// A user's bookmark on a public note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    pub id: Uuid,
    pub note_id: Uuid,
    pub user_id: CallerId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_serializes_mode() {
        let envelope = ConfidentialEnvelope::restore(
            None,
            Some(vec![0u8; 16]),
            ExposureMode::PasswordShared,
            CallerId::new("alice"),
        )
        .unwrap();
        let now = Utc::now();
        let note = Note {
            id: Uuid::now_v7(),
            envelope,
            created_at: now,
            modified_at: now,
        };

        let json = serde_json::to_value(note.metadata()).unwrap();
        assert_eq!(json["mode"], "PASSWORD_SHARED");
        assert_eq!(json["requires_password"], true);
        assert_eq!(json["id"], note.id.to_string());
    }
}
