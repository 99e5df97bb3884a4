use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use knotes_core::crypto::SALT_LENGTH;
use knotes_core::{
    CallerId, ConfidentialityEngine, DecryptionFailure, EngineConfig, ExposureMode, KnotesError,
    WriteIntent,
};

const SECRET: &str = "test-application-pepper-for-key-derivation-security";

fn engine() -> ConfidentialityEngine {
    let config = EngineConfig::new(SECRET)
        .expect("valid secret")
        .with_kdf_iterations(1_000)
        .expect("valid iterations");
    ConfidentialityEngine::new(Arc::new(config))
}

#[test]
fn test_private_end_to_end() {
    let engine = engine();
    let owner = CallerId::new("u1");

    let envelope = engine
        .encode(Some("hello"), Some(WriteIntent::Private), &owner)
        .expect("encode should succeed");

    assert_eq!(envelope.mode(), ExposureMode::Private);
    assert_eq!(envelope.salt().map(|salt| salt.len()), Some(SALT_LENGTH));
    assert!(!envelope.requires_password());

    let plaintext = engine
        .decode(&envelope, &owner, None)
        .expect("owner can decode");
    assert_eq!(plaintext.as_deref(), Some("hello"));
}

#[test]
fn test_private_rejects_other_users() {
    let engine = engine();
    let envelope = engine
        .encode(Some("diary"), Some(WriteIntent::Private), &CallerId::new("alice"))
        .expect("encode should succeed");

    let alice = engine.decode(&envelope, &CallerId::new("alice"), None);
    assert_eq!(alice.expect("alice can decode").as_deref(), Some("diary"));

    let bob = engine.decode(&envelope, &CallerId::new("bob"), None);
    assert!(matches!(bob, Err(KnotesError::Unauthorized)));

    // A password does not help a non-owner
    let bob_with_password = engine.decode(&envelope, &CallerId::new("bob"), Some("diary"));
    assert!(matches!(bob_with_password, Err(KnotesError::Unauthorized)));

    let anonymous = engine.decode(&envelope, &CallerId::anonymous(), None);
    assert!(matches!(anonymous, Err(KnotesError::Unauthorized)));
}

#[test]
fn test_password_shared_access() {
    let engine = engine();
    let envelope = engine
        .encode(
            Some("secret"),
            Some(WriteIntent::PasswordShared { password: "pw123" }),
            &CallerId::new("alice"),
        )
        .expect("encode should succeed");

    assert!(envelope.requires_password());
    assert!(envelope.salt().is_some());

    for requester in [
        CallerId::new("alice"),
        CallerId::new("bob"),
        CallerId::anonymous(),
    ] {
        let opened = engine
            .decode(&envelope, &requester, Some("pw123"))
            .expect("correct password opens note");
        assert_eq!(opened.as_deref(), Some("secret"));

        let wrong = engine
            .decode(&envelope, &requester, Some("wrong"))
            .expect_err("wrong password fails");
        assert_eq!(wrong.decryption_failure(), Some(DecryptionFailure::Rejected));

        let missing = engine
            .decode(&envelope, &requester, None)
            .expect_err("missing password fails");
        assert_eq!(
            missing.decryption_failure(),
            Some(DecryptionFailure::PasswordRequired)
        );
    }
}

#[test]
fn test_access_failures_render_identically() {
    let engine = engine();
    let private = engine
        .encode(Some("a"), Some(WriteIntent::Private), &CallerId::new("alice"))
        .unwrap();
    let shared = engine
        .encode(
            Some("b"),
            Some(WriteIntent::PasswordShared { password: "pw123" }),
            &CallerId::new("alice"),
        )
        .unwrap();

    let unauthorized = engine
        .decode(&private, &CallerId::new("bob"), None)
        .unwrap_err();
    let wrong_password = engine
        .decode(&shared, &CallerId::new("bob"), Some("nope"))
        .unwrap_err();

    assert!(unauthorized.is_access_denied());
    assert!(wrong_password.is_access_denied());
    assert_eq!(unauthorized.public_message(), wrong_password.public_message());
}

#[test]
fn test_anonymous_author_cannot_create_private() {
    let engine = engine();

    let envelope = engine
        .encode(Some("hi"), Some(WriteIntent::Private), &CallerId::anonymous())
        .expect("encode should succeed");

    assert_eq!(envelope.mode(), ExposureMode::Public);
    assert!(envelope.salt().is_none());
    assert!(!envelope.requires_password());
}

#[test]
fn test_password_shared_without_password_is_validation_error() {
    let engine = engine();

    let result = engine.encode(
        Some("secret"),
        Some(WriteIntent::PasswordShared { password: "" }),
        &CallerId::new("alice"),
    );

    assert!(matches!(result, Err(KnotesError::Validation(_))));
}

#[test]
fn test_tampered_payload_never_decodes() {
    let engine = engine();
    let owner = CallerId::new("alice");
    let envelope = engine
        .encode(Some("integrity matters"), None, &owner)
        .unwrap();
    let payload = envelope.payload().expect("payload present").to_vec();

    for index in 0..payload.len() {
        let mut tampered = payload.clone();
        tampered[index] ^= 0x80;
        let forged = knotes_core::ConfidentialEnvelope::restore(
            Some(tampered),
            envelope.salt().map(|salt| salt.to_vec()),
            envelope.mode(),
            owner.clone(),
        )
        .unwrap();

        let err = engine.decode(&forged, &owner, None).unwrap_err();
        assert_eq!(err.decryption_failure(), Some(DecryptionFailure::Rejected));
    }
}

#[test]
fn test_identical_writes_produce_distinct_envelopes() {
    let engine = engine();
    let owner = CallerId::new("alice");

    let first = engine.encode(Some("same"), None, &owner).unwrap();
    let second = engine.encode(Some("same"), None, &owner).unwrap();

    assert_ne!(first.salt(), second.salt());
    assert_ne!(first.payload(), second.payload());
    assert_eq!(
        engine.decode(&first, &owner, None).unwrap(),
        engine.decode(&second, &owner, None).unwrap()
    );
}

#[test]
fn test_salts_unique_across_writes() {
    let engine = engine();
    let owner = CallerId::new("alice");

    let salts: HashSet<[u8; SALT_LENGTH]> = (0..200)
        .map(|_| *engine.encode(Some("x"), None, &owner).unwrap().salt().unwrap())
        .collect();

    assert_eq!(salts.len(), 200);
}

#[test]
fn test_multibyte_content_round_trips() {
    let engine = engine();
    let owner = CallerId::new("alice");
    let text = "Café, ação, Ünïcödé — ∞ ≈ 🚀";

    for intent in [
        WriteIntent::Public,
        WriteIntent::Private,
        WriteIntent::PasswordShared { password: "pässwörd" },
    ] {
        let envelope = engine.encode(Some(text), Some(intent), &owner).unwrap();
        let password = match intent {
            WriteIntent::PasswordShared { password } => Some(password),
            _ => None,
        };
        let decoded = engine.decode(&envelope, &owner, password).unwrap();
        assert_eq!(decoded.as_deref(), Some(text));
    }
}

#[test]
fn test_owner_key_bound_to_server_secret() {
    let owner = CallerId::new("alice");
    let envelope = engine().encode(Some("hello"), None, &owner).unwrap();

    let other = EngineConfig::new("a-completely-different-server-secret-value")
        .unwrap()
        .with_kdf_iterations(1_000)
        .unwrap();
    let other_engine = ConfidentialityEngine::new(Arc::new(other));

    let err = other_engine.decode(&envelope, &owner, None).unwrap_err();
    assert_eq!(err.decryption_failure(), Some(DecryptionFailure::Rejected));
}

#[test]
fn test_password_notes_independent_of_server_secret() {
    let envelope = engine()
        .encode(
            Some("shared"),
            Some(WriteIntent::PasswordShared { password: "pw123" }),
            &CallerId::new("alice"),
        )
        .unwrap();

    let other = EngineConfig::new("a-completely-different-server-secret-value")
        .unwrap()
        .with_kdf_iterations(1_000)
        .unwrap();
    let other_engine = ConfidentialityEngine::new(Arc::new(other));

    let opened = other_engine
        .decode(&envelope, &CallerId::anonymous(), Some("pw123"))
        .unwrap();
    assert_eq!(opened.as_deref(), Some("shared"));
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = Arc::new(engine());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let owner = CallerId::new(format!("user-{}", worker));
                let text = format!("note from worker {}", worker);
                let envelope = engine.encode(Some(&text), None, &owner).unwrap();
                let decoded = engine.decode(&envelope, &owner, None).unwrap();
                assert_eq!(decoded.as_deref(), Some(text.as_str()));
                *envelope.salt().unwrap()
            })
        })
        .collect();

    let salts: HashSet<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker panicked"))
        .collect();
    assert_eq!(salts.len(), 8);
}
