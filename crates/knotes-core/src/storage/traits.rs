//! Note and pin store trait definitions.
//!
//! Persistence lives outside the engine. A `NoteStore` only moves finished
//! [`Note`] records in and out; it never sees plaintext or keys.

use uuid::Uuid;

use super::types::{Note, Pin};
use crate::error::Result;
use crate::identity::CallerId;

/// Storage interface for notes.
pub trait NoteStore: Send + Sync {
    /// Insert a new note.
    ///
    /// # Errors
    ///
    /// Returns `KnotesError::Storage` if a note with the same ID exists.
    fn insert(&self, note: Note) -> Result<()>;

    /// Get a note by ID.
    ///
    /// Returns `Ok(None)` if not found.
    fn get(&self, id: &Uuid) -> Result<Option<Note>>;

    /// Replace an existing note (last write wins).
    ///
    /// # Errors
    ///
    /// Returns `KnotesError::NotFound` if the note does not exist.
    fn replace(&self, note: Note) -> Result<()>;

    /// Delete a note. Returns `true` if a note was removed.
    fn delete(&self, id: &Uuid) -> Result<bool>;

    /// Check whether a note exists.
    fn exists(&self, id: &Uuid) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// IDs of notes owned by `owner`, oldest first.
    fn list_ids_by_owner(&self, owner: &CallerId) -> Result<Vec<Uuid>>;
}

/// Storage interface for pins.
pub trait PinStore: Send + Sync {
    /// Insert a new pin.
    fn insert(&self, pin: Pin) -> Result<()>;

    fn get(&self, id: &Uuid) -> Result<Option<Pin>>;

    /// Delete a pin. Returns `true` if a pin was removed.
    fn delete(&self, id: &Uuid) -> Result<bool>;

    /// Pins held by `user`, oldest first.
    fn list_by_user(&self, user: &CallerId) -> Result<Vec<Pin>>;

    /// Pins on `note_id`, from any user.
    fn list_by_note(&self, note_id: &Uuid) -> Result<Vec<Pin>>;

    /// Drop every pin on `note_id`. Returns how many were removed.
    fn delete_by_note(&self, note_id: &Uuid) -> Result<usize>;
}
