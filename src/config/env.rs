//! Environment variable sources
//!
//! The resolver reads action inputs through [`VarEnv`] so that tests can
//! supply an in-memory environment instead of mutating the process one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Read-only access to environment variables
pub trait VarEnv: Send + Sync {
    /// Value of `key`, or `None` when unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;
}

/// Process environment
#[derive(Debug, Clone, Default)]
pub struct RealVarEnv;

impl RealVarEnv {
    pub fn new() -> Self {
        Self
    }
}

impl VarEnv for RealVarEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment for tests
///
/// # Examples
///
/// ```
/// use autopylot::config::{MockVarEnv, VarEnv};
///
/// let env = MockVarEnv::new().with("INPUT_CHECK", "all");
/// assert_eq!(env.var("INPUT_CHECK").as_deref(), Some("all"));
/// assert_eq!(env.var("INPUT_OUTPUT_DIR"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockVarEnv {
    vars: Arc<Mutex<HashMap<String, String>>>,
}

impl MockVarEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: &str, value: &str) {
        self.vars
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.vars.lock().unwrap().remove(key);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MockVarEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: Arc::new(Mutex::new(vars)),
        }
    }
}

impl VarEnv for MockVarEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.lock().unwrap().get(key).cloned()
    }
}
