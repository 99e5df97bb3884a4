//! Note service: the engine wired to a note store.
//!
//! Every operation takes the caller explicitly; there is no ambient
//! "current user".

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::envelope::{ConfidentialityEngine, ExposureMode, WriteIntent};
use crate::error::{KnotesError, Result};
use crate::identity::Caller;
use crate::storage::{Note, NoteMetadata, NoteStore};

/// Create, update, read and list notes on behalf of callers.
#[derive(Debug)]
pub struct NoteService<S: NoteStore> {
    engine: ConfidentialityEngine,
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(engine: ConfidentialityEngine, store: S) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &ConfidentialityEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn exists(&self, id: &Uuid) -> Result<bool> {
        self.store.exists(id)
    }

    /// Create a note owned by the caller.
    ///
    /// Unauthenticated callers always produce a public note.
    pub fn create(
        &self,
        content: Option<&str>,
        intent: Option<WriteIntent<'_>>,
        caller: &Caller,
    ) -> Result<Note> {
        let owner = caller.author();
        let envelope = self.engine.encode(content, intent, &owner)?;

        let now = Utc::now();
        let note = Note {
            id: Uuid::now_v7(),
            envelope,
            created_at: now,
            modified_at: now,
        };
        debug!(id = %note.id, mode = %note.envelope.mode(), "Saving note");

        self.store.insert(note.clone())?;
        Ok(note)
    }

    /// Replace a note's content, re-encoding it with a fresh salt.
    ///
    /// `intent = None` keeps the note's current mode; a password-shared note
    /// then needs its password again, since the old one is not stored.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the note does not exist.
    /// - `Unauthorized` if anyone but the owner updates a confidential note
    ///   or asks for a confidential mode.
    /// - `Validation` if an unauthenticated caller asks for a non-public
    ///   mode, or a password-shared update has no password.
    pub fn update(
        &self,
        id: &Uuid,
        content: Option<&str>,
        intent: Option<WriteIntent<'_>>,
        caller: &Caller,
    ) -> Result<Note> {
        let existing = self.find(id)?;

        if !caller.is_authenticated()
            && intent.is_some_and(|intent| intent.mode() != ExposureMode::Public)
        {
            return Err(KnotesError::Validation(
                "Anonymous notes cannot be confidential".to_string(),
            ));
        }

        let current_mode = existing.envelope.mode();
        let intent = match intent {
            Some(intent) => intent,
            None => match current_mode {
                ExposureMode::Public => WriteIntent::Public,
                ExposureMode::Private => WriteIntent::Private,
                ExposureMode::PasswordShared => WriteIntent::PasswordShared { password: "" },
            },
        };

        let confidential = current_mode.is_encrypted() || intent.mode().is_encrypted();
        if confidential && caller.author() != *existing.owner() {
            return Err(KnotesError::Unauthorized);
        }

        debug!(id = %id, mode = %intent.mode(), "Updating note");
        let envelope = self
            .engine
            .encode(content, Some(intent), existing.owner())?;

        let note = Note {
            id: existing.id,
            envelope,
            created_at: existing.created_at,
            modified_at: Utc::now(),
        };
        self.store.replace(note.clone())?;
        Ok(note)
    }

    /// Read a note's content as `caller`.
    ///
    /// Unauthenticated callers read as the anonymous id, so they can open
    /// public and password-shared notes only.
    pub fn read(
        &self,
        id: &Uuid,
        caller: &Caller,
        password: Option<&str>,
    ) -> Result<Option<String>> {
        let note = self.find(id)?;
        self.engine.decode(&note.envelope, &caller.author(), password)
    }

    /// Metadata for a note, without touching its content.
    pub fn metadata(&self, id: &Uuid) -> Result<NoteMetadata> {
        Ok(self.find(id)?.metadata())
    }

    /// IDs of the caller's notes. Empty for unauthenticated callers.
    pub fn list_ids(&self, caller: &Caller) -> Result<Vec<Uuid>> {
        if !caller.is_authenticated() {
            return Ok(Vec::new());
        }
        self.store.list_ids_by_owner(&caller.id)
    }

    /// Delete a note. A no-op for unauthenticated callers.
    ///
    /// Returns `true` if a note was removed.
    pub fn delete(&self, id: &Uuid, caller: &Caller) -> Result<bool> {
        if !caller.is_authenticated() {
            return Ok(false);
        }
        let removed = self.store.delete(id)?;
        if removed {
            info!(id = %id, "Deleted note");
        }
        Ok(removed)
    }

    fn find(&self, id: &Uuid) -> Result<Note> {
        self.store.get(id)?.ok_or(KnotesError::NotFound(*id))
    }
}
