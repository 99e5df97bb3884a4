//! Process-environment helpers for unit tests.

use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the crate-wide env lock and restores the variable on drop.
pub struct ScopedEnv {
    key: &'static str,
    previous: Option<String>,
    _guard: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    pub fn set(key: &'static str, value: &str) -> Self {
        let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self {
            key,
            previous,
            _guard: guard,
        }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn test_scoped_env_restores_previous_value() {
    const KEY: &str = "KNOTES_TEST_SCOPED_ENV";
    {
        let _env = ScopedEnv::set(KEY, "inner");
        assert_eq!(std::env::var(KEY).as_deref(), Ok("inner"));
    }
    assert!(std::env::var(KEY).is_err());
}
