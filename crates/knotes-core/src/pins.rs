//! Per-user pins on public notes.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::envelope::ExposureMode;
use crate::error::{KnotesError, Result};
use crate::identity::Caller;
use crate::service::NoteService;
use crate::storage::{NoteStore, Pin, PinStore};

/// Pin, list and unpin notes on behalf of authenticated callers.
#[derive(Debug)]
pub struct PinService<S: NoteStore, P: PinStore> {
    notes: Arc<NoteService<S>>,
    pins: P,
}

impl<S: NoteStore, P: PinStore> PinService<S, P> {
    pub fn new(notes: Arc<NoteService<S>>, pins: P) -> Self {
        Self { notes, pins }
    }

    pub fn notes(&self) -> &NoteService<S> {
        &self.notes
    }

    /// The caller's pins, oldest first.
    pub fn list(&self, caller: &Caller) -> Result<Vec<Pin>> {
        require_authenticated(caller)?;
        self.pins.list_by_user(&caller.id)
    }

    /// Pin a note for the caller.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` for unauthenticated callers.
    /// - `NotFound` if the note does not exist.
    /// - `Validation` unless the note is public.
    pub fn pin(&self, note_id: &Uuid, caller: &Caller) -> Result<Pin> {
        require_authenticated(caller)?;

        let metadata = self.notes.metadata(note_id)?;
        if metadata.mode != ExposureMode::Public {
            return Err(KnotesError::Validation("Note cannot be pinned".to_string()));
        }

        let pin = Pin {
            id: Uuid::now_v7(),
            note_id: *note_id,
            user_id: caller.id.clone(),
            created_at: Utc::now(),
        };
        debug!(pin = %pin.id, note = %note_id, "Pinning note");
        self.pins.insert(pin.clone())?;
        Ok(pin)
    }

    /// Remove one of the caller's pins.
    ///
    /// Returns `false` without removing anything if the pin belongs to
    /// another user.
    pub fn unpin(&self, pin_id: &Uuid, caller: &Caller) -> Result<bool> {
        require_authenticated(caller)?;

        let pin = self
            .pins
            .get(pin_id)?
            .ok_or(KnotesError::PinNotFound(*pin_id))?;
        if pin.user_id != caller.id {
            return Ok(false);
        }
        self.pins.delete(pin_id)
    }

    /// True if any user has pinned the note.
    pub fn is_pinned(&self, note_id: &Uuid) -> Result<bool> {
        Ok(!self.pins.list_by_note(note_id)?.is_empty())
    }

    /// Delete a note together with every pin on it.
    pub fn delete_note(&self, note_id: &Uuid, caller: &Caller) -> Result<bool> {
        let removed = self.notes.delete(note_id, caller)?;
        if removed {
            let unpinned = self.pins.delete_by_note(note_id)?;
            if unpinned > 0 {
                info!(note = %note_id, pins = unpinned, "Removed pins of deleted note");
            }
        }
        Ok(removed)
    }
}

fn require_authenticated(caller: &Caller) -> Result<()> {
    if caller.is_authenticated() {
        Ok(())
    } else {
        Err(KnotesError::Unauthorized)
    }
}
