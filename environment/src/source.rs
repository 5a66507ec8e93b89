//! Injectable access to the process environment table.
//!
//! The detectors never call `std::env` directly; they read through a
//! [`ReadEnv`] so tests can substitute an [`InMemoryEnv`] instead of
//! mutating real process state.
//!
//! ```
//! use detect_environment::{ReadEnv, SystemEnv};
//!
//! fn app_env<E: ReadEnv>(env: &E) -> String {
//!     env.var("APP_ENV").unwrap_or_else(|_| "development".to_string())
//! }
//!
//! let _ = app_env(&SystemEnv);
//! ```

#[cfg(any(test, feature = "test-support"))]
use std::collections::HashMap;
use std::env;

pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

impl<E: ReadEnv + ?Sized> ReadEnv for &E {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        (**self).var(key)
    }
}

/// Zero-sized type, delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// Won't touch the global process environment.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnv {
    vars: HashMap<String, String>,
}

#[cfg(any(test, feature = "test-support"))]
impl InMemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.vars.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }
}

#[cfg(any(test, feature = "test-support"))]
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InMemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ReadEnv for InMemoryEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_env_delegation() {
        let std_result = std::env::var("PATH");
        let provider_result = SystemEnv.var("PATH");
        assert_eq!(std_result.is_ok(), provider_result.is_ok());
    }

    #[test]
    fn test_in_memory_env_set_and_remove() {
        let mut env = InMemoryEnv::new().with_var("APP_ENV", "staging");
        assert_eq!(env.var("APP_ENV").unwrap(), "staging");
        assert!(env.contains("APP_ENV"));

        env.remove("APP_ENV");
        assert!(matches!(env.var("APP_ENV"), Err(env::VarError::NotPresent)));
    }

    #[test]
    fn test_in_memory_env_from_iter() {
        let env: InMemoryEnv = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.var("B").unwrap(), "2");
        assert!(!env.contains("C"));
    }

    #[test]
    fn test_reference_impl() {
        fn read<E: ReadEnv>(env: E) -> Option<String> {
            env.var("KEY").ok()
        }

        let env = InMemoryEnv::new().with_var("KEY", "value");
        assert_eq!(read(&env).as_deref(), Some("value"));
    }
}
