//! Cryptographic operations for Knotes.
//!
//! - **PBKDF2-HMAC-SHA256**: per-note key derivation from an owner identity
//!   (mixed with the server secret) or a shared password
//! - **AES-256-GCM**: authenticated encryption of compressed note content
//!
//! ## Security Model
//!
//! - Every confidential write draws a fresh 16-byte salt and a fresh 12-byte
//!   nonce from the OS-seeded CSPRNG
//! - Derived keys are zeroized from memory on drop
//! - Decryption failures are not differentiated, to avoid a key oracle
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of stored note payloads and salts
//! - Tampering with stored ciphertext
//!
//! We do NOT defend against:
//! - Compromise of the running server and its configuration
//! - Offline guessing of weak shared passwords

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt, encryption_overhead, NONCE_LENGTH, TAG_LENGTH};
pub use key::{generate_salt, DerivedKey, KeyDeriver, Salt, KEY_LENGTH, SALT_LENGTH};
