//! Environment isolation shared by the configuration integration tests.

use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use herald_config::{BOTH_ENV, DECLARE_ENV, POOL_ENV};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Serialises environment access and restores every touched variable on drop.
///
/// All herald selector variables are cleared on construction so ambient
/// values from the invoking shell cannot leak into assertions.
pub struct EnvGuard {
    previous: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn acquire() -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
        let mut guard = Self {
            previous: Vec::new(),
            _lock: lock,
        };
        for key in [POOL_ENV, DECLARE_ENV, BOTH_ENV] {
            guard.remember(key);
            // Environment mutation is `unsafe` in edition 2024; the mutex
            // keeps other tests in this binary from observing it mid-change.
            unsafe { std::env::remove_var(key) };
        }
        guard
    }

    pub fn set(&mut self, key: &'static str, value: &str) {
        self.remember(key);
        unsafe { std::env::set_var(key, value) };
    }

    fn remember(&mut self, key: &'static str) {
        if self.previous.iter().any(|(known, _)| *known == key) {
            return;
        }
        self.previous.push((key, std::env::var_os(key)));
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        while let Some((key, value)) = self.previous.pop() {
            match value {
                Some(os_value) => unsafe { std::env::set_var(key, os_value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
