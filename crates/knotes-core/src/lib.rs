//! # Knotes Core
//!
//! Content confidentiality engine for the Knotes note service.
//!
//! This crate decides, per note, whether content is stored in the clear or
//! authenticated-encrypted, derives the matching key, and enforces who may
//! recover the plaintext. HTTP routing, persistence and authentication live
//! in the host; the engine only sees byte buffers, metadata and caller ids.
//!
//! ## Architecture
//!
//! - **codec**: gzip compression of note text
//! - **crypto**: PBKDF2 key derivation and AES-256-GCM
//! - **envelope**: exposure modes, the access decision and the engine
//! - **identity**: caller ids and the anonymous sentinel
//! - **storage**: note records and the `NoteStore` seam
//! - **service**: notes on top of the engine and a store
//! - **pins**: per-user pins on public notes
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use knotes_core::{CallerId, ConfidentialityEngine, EngineConfig, ExposureMode};
//!
//! let config = EngineConfig::new("an-application-secret-of-32-chars-or-more")
//!     .unwrap()
//!     .with_kdf_iterations(1_000)
//!     .unwrap();
//! let engine = ConfidentialityEngine::new(Arc::new(config));
//!
//! let owner = CallerId::new("u1");
//! let envelope = engine.encode(Some("hello"), None, &owner).unwrap();
//! assert_eq!(envelope.mode(), ExposureMode::Private);
//! assert_eq!(engine.decode(&envelope, &owner, None).unwrap().as_deref(), Some("hello"));
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod pins;
pub mod service;
pub mod storage;

pub use config::EngineConfig;
pub use envelope::{
    check_access, metadata_of, AccessDecision, ConfidentialEnvelope, ConfidentialityEngine,
    EnvelopeMetadata, ExposureMode, WriteIntent,
};
pub use error::{DecryptionFailure, KnotesError, Result};
pub use identity::{Caller, CallerId};
pub use pins::PinService;
pub use service::NoteService;
pub use storage::{
    MemoryNoteStore, MemoryPinStore, Note, NoteMetadata, NoteStore, Pin, PinStore,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
