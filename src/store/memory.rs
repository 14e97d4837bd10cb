//! In-memory store, used by tests and one-shot CLI runs

use super::{PlanStore, StoreError};
use serde_json::Value;
use std::collections::HashMap;

/// Plan store that keeps values in a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PlanStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}
