//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation takes a global re-entrant mutex and returns an RAII guard
//! that restores the previous state when dropped, removing the variable if it
//! was absent before. Guards stacked on the same key restore in LIFO order.
//! Use [`scope`] or [`scope_with`] when a test must keep exclusive access to
//! the environment for its whole body.
//!
//! # Examples
//!
//! ```
//! use struct_scanner_test_helpers::env;
//!
//! let _g = env::set_var("KEY", "VALUE");
//! // `KEY` is set to `VALUE` for the duration of the guard.
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

/// Records the current value of `key`, then runs `mutator` under the lock.
fn mutate_env_var<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(val) = self.original.take() {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_set_var(&self.key, &val) };
        } else {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_remove_var(&self.key) };
        }
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use struct_scanner_test_helpers::env;
/// let _g = env::set_var("FOO", "bar");
/// assert!(matches!(std::env::var("FOO"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate_env_var` holds `ENV_MUTEX` while calling the mutator.
    mutate_env_var(key.into(), |k| unsafe { env_set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use struct_scanner_test_helpers::env;
/// let _g = env::remove_var("FOO");
/// assert!(std::env::var("FOO").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate_env_var` holds `ENV_MUTEX` while calling the mutator.
    mutate_env_var(key.into(), |k| unsafe { env_remove_var(k) })
}

/// RAII scope that holds the environment lock while retaining guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

/// Takes the lock, then keeps `guards` alive until the scope drops.
///
/// # Examples
/// ```
/// use struct_scanner_test_helpers::env;
///
/// let _scope = env::scope(vec![env::remove_var("FOO"), env::set_var("BAR", "1")]);
/// ```
pub fn scope(guards: Vec<EnvVarGuard>) -> EnvScope {
    EnvScope {
        _lock: ENV_MUTEX.lock(),
        guards,
    }
}

/// Takes the lock, then builds the guards while holding it.
///
/// # Examples
/// ```
/// use struct_scanner_test_helpers::env;
///
/// let _scope = env::scope_with(|| vec![env::set_var("PORT", "8080")]);
/// assert_eq!(std::env::var("PORT").ok().as_deref(), Some("8080"));
/// ```
pub fn scope_with<F>(builder: F) -> EnvScope
where
    F: FnOnce() -> Vec<EnvVarGuard>,
{
    let lock = ENV_MUTEX.lock();
    let guards = builder();
    EnvScope {
        _lock: lock,
        guards,
    }
}
