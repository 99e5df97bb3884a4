//! Confidential envelopes for note content.
//!
//! A note's content is stored as a [`ConfidentialEnvelope`]: the payload
//! bytes, an optional salt and the [`ExposureMode`] that decides how the
//! payload was produced.
//!
//! | Mode             | Payload                           | Salt     |
//! |------------------|-----------------------------------|----------|
//! | `Public`         | gzip(text)                        | none     |
//! | `Private`        | nonce‖AES-GCM(gzip(text))‖tag     | 16 bytes |
//! | `PasswordShared` | nonce‖AES-GCM(gzip(text))‖tag     | 16 bytes |

pub mod access;
pub mod policy;
pub mod types;

pub use access::{check_access, AccessDecision, Denial, KeyPath};
pub use policy::ConfidentialityEngine;
pub use types::{metadata_of, ConfidentialEnvelope, EnvelopeMetadata, ExposureMode, WriteIntent};
