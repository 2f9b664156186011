//! Helpers for tests that touch the real process environment.

use std::env;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::vars;

static PROCESS_ENV: Mutex<()> = Mutex::new(());

/// Holds the process-environment lock and restores every settings variable
/// to its previous value on drop.
pub struct ScopedEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    /// Lock the environment and clear every settings variable.
    pub fn clean() -> Self {
        let lock = PROCESS_ENV.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = vars::ALL
            .iter()
            .map(|&name| (name, env::var(name).ok()))
            .collect();
        for &name in vars::ALL {
            env::remove_var(name);
        }
        Self { saved, _lock: lock }
    }

    pub fn set(&self, name: &str, value: &str) {
        env::set_var(name, value);
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}
