//! In-memory note and pin stores.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::traits::{NoteStore, PinStore};
use super::types::{Note, Pin};
use crate::error::{KnotesError, Result};
use crate::identity::CallerId;

/// `NoteStore` backed by a `HashMap` behind an `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: RwLock<HashMap<Uuid, Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, Note>>> {
        self.notes
            .read()
            .map_err(|_| KnotesError::Storage("Note store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Note>>> {
        self.notes
            .write()
            .map_err(|_| KnotesError::Storage("Note store lock poisoned".to_string()))
    }
}

impl NoteStore for MemoryNoteStore {
    fn insert(&self, note: Note) -> Result<()> {
        let mut notes = self.write()?;
        if notes.contains_key(&note.id) {
            return Err(KnotesError::Storage(format!(
                "Note already exists: {}",
                note.id
            )));
        }
        notes.insert(note.id, note);
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<Note>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn replace(&self, note: Note) -> Result<()> {
        let mut notes = self.write()?;
        match notes.get_mut(&note.id) {
            Some(existing) => {
                *existing = note;
                Ok(())
            }
            None => Err(KnotesError::NotFound(note.id)),
        }
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        Ok(self.write()?.remove(id).is_some())
    }

    fn list_ids_by_owner(&self, owner: &CallerId) -> Result<Vec<Uuid>> {
        let notes = self.read()?;
        let mut owned: Vec<&Note> = notes.values().filter(|note| note.owner() == owner).collect();
        owned.sort_by_key(|note| (note.created_at, note.id));
        Ok(owned.into_iter().map(|note| note.id).collect())
    }
}

/// `PinStore` backed by a `HashMap` behind an `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryPinStore {
    pins: RwLock<HashMap<Uuid, Pin>>,
}

impl MemoryPinStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, Pin>>> {
        self.pins
            .read()
            .map_err(|_| KnotesError::Storage("Pin store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Pin>>> {
        self.pins
            .write()
            .map_err(|_| KnotesError::Storage("Pin store lock poisoned".to_string()))
    }

    fn collect_sorted(&self, keep: impl Fn(&Pin) -> bool) -> Result<Vec<Pin>> {
        let pins = self.read()?;
        let mut matching: Vec<Pin> = pins.values().filter(|pin| keep(pin)).cloned().collect();
        matching.sort_by_key(|pin| (pin.created_at, pin.id));
        Ok(matching)
    }
}

impl PinStore for MemoryPinStore {
    fn insert(&self, pin: Pin) -> Result<()> {
        let mut pins = self.write()?;
        if pins.contains_key(&pin.id) {
            return Err(KnotesError::Storage(format!("Pin already exists: {}", pin.id)));
        }
        pins.insert(pin.id, pin);
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<Pin>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        Ok(self.write()?.remove(id).is_some())
    }

    fn list_by_user(&self, user: &CallerId) -> Result<Vec<Pin>> {
        self.collect_sorted(|pin| &pin.user_id == user)
    }

    fn list_by_note(&self, note_id: &Uuid) -> Result<Vec<Pin>> {
        self.collect_sorted(|pin| &pin.note_id == note_id)
    }

    fn delete_by_note(&self, note_id: &Uuid) -> Result<usize> {
        let mut pins = self.write()?;
        let before = pins.len();
        pins.retain(|_, pin| &pin.note_id != note_id);
        Ok(before - pins.len())
    }
}
