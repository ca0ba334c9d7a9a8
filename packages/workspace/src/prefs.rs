//! # UI Preference Store
//!
//! Small key-value seam for editor-chrome preferences (panel
//! open/closed, last used palette tab). Injected into the session so
//! persistence of UI state is never ambient global state.

use std::collections::HashMap;

pub trait PrefStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String);

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).map(|v| v == "true")
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, value.to_string());
    }
}

/// In-memory store; real frontends back this with local storage.
#[derive(Debug, Default)]
pub struct MemoryPrefStore {
    values: HashMap<String, String>,
}

impl MemoryPrefStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}
