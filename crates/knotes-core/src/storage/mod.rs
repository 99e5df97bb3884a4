//! Note storage abstraction.
//!
//! Real persistence is supplied by the host. This module defines the
//! [`NoteStore`] and [`PinStore`] seams, the records that cross them, and
//! in-memory implementations used by tests and the CLI.

pub mod memory;
pub mod traits;
pub mod types;

pub use memory::{MemoryNoteStore, MemoryPinStore};
pub use traits::{NoteStore, PinStore};
pub use types::{Note, NoteMetadata, Pin};
