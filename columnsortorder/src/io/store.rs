//! Key-value plugin configuration store.

use std::collections::BTreeMap;

use anyhow::Result;

/// Plugin-scoped string configuration.
///
/// Implementations are expected to serialize writes themselves; callers get
/// last-write-wins semantics and no locking.
pub trait ConfigStore {
    /// Read `key` for `plugin`. Missing keys are `Ok(None)`.
    fn get(&self, plugin: &str, key: &str) -> Result<Option<String>>;

    /// Persist `value` under `key` for `plugin`, replacing any previous value.
    fn set(&mut self, plugin: &str, key: &str, value: &str) -> Result<()>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &mut S {
    fn get(&self, plugin: &str, key: &str) -> Result<Option<String>> {
        (**self).get(plugin, key)
    }

    fn set(&mut self, plugin: &str, key: &str, value: &str) -> Result<()> {
        (**self).set(plugin, key, value)
    }
}

/// In-process store, keyed by `(plugin, key)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<(String, String), String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys across all plugins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, plugin: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .values
            .get(&(plugin.to_string(), key.to_string()))
            .cloned())
    }

    fn set(&mut self, plugin: &str, key: &str, value: &str) -> Result<()> {
        self.values
            .insert((plugin.to_string(), key.to_string()), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("plugin", "key").expect("get"), None);
    }

    fn write_value(mut store: impl ConfigStore) {
        store.set("plugin", "key", "value").expect("set");
    }

    #[test]
    fn set_is_visible_through_mut_ref() {
        let mut store = MemoryStore::new();
        write_value(&mut store);
        assert_eq!(
            store.get("plugin", "key").expect("get").as_deref(),
            Some("value")
        );
        assert_eq!(store.get("other", "key").expect("get"), None);
    }
}
