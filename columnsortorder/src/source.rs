//! Live question bank columns and the registry that supplies them.

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A column as currently provided by the question bank view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveColumn {
    /// Fully-qualified key (class, plus field path for custom fields).
    pub key: String,
    /// Fully-qualified implementation name.
    pub class: String,
    /// Internal short name, e.g. `checkbox`.
    pub name: String,
    /// Display title.
    pub title: String,
}

impl LiveColumn {
    /// Column whose key is its class name.
    pub fn new(class: &str, name: &str, title: &str) -> Self {
        Self {
            key: class.to_string(),
            class: class.to_string(),
            name: name.to_string(),
            title: title.to_string(),
        }
    }
}

/// Supplier of live columns. Results are read per call and never cached.
pub trait ColumnSource {
    /// Columns currently visible in the question bank, in display order.
    fn visible_columns(&self) -> Result<Vec<LiveColumn>>;

    /// Build the column registered under the fully-qualified `identifier`.
    ///
    /// `Ok(None)` means the identifier is unknown (e.g. its plugin is uninstalled);
    /// `Err` is reserved for failures of the source itself.
    fn instantiate(&self, identifier: &str) -> Result<Option<LiveColumn>>;
}

impl<C: ColumnSource + ?Sized> ColumnSource for &C {
    fn visible_columns(&self) -> Result<Vec<LiveColumn>> {
        (**self).visible_columns()
    }

    fn instantiate(&self, identifier: &str) -> Result<Option<LiveColumn>> {
        (**self).instantiate(identifier)
    }
}

pub type ColumnFactory = Box<dyn Fn() -> LiveColumn>;

struct Registration {
    identifier: String,
    visible: bool,
    factory: ColumnFactory,
}

/// Column constructors keyed by fully-qualified column identifier.
///
/// Visible columns enumerate in registration order.
#[derive(Default)]
pub struct ColumnRegistry {
    registrations: Vec<Registration>,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a visible column factory. Re-registering an identifier
    /// replaces it in place.
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> LiveColumn + 'static,
    {
        self.insert(identifier.into(), true, Box::new(factory))
    }

    /// Register a factory that can be instantiated but is not listed as visible.
    pub fn register_hidden<F>(&mut self, identifier: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> LiveColumn + 'static,
    {
        self.insert(identifier.into(), false, Box::new(factory))
    }

    /// Register a fixed column under its key.
    pub fn register_column(&mut self, column: LiveColumn, visible: bool) -> &mut Self {
        let identifier = column.key.clone();
        self.insert(identifier, visible, Box::new(move || column.clone()))
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.find(identifier).is_some()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn insert(&mut self, identifier: String, visible: bool, factory: ColumnFactory) -> &mut Self {
        let registration = Registration {
            identifier,
            visible,
            factory,
        };
        match self
            .registrations
            .iter_mut()
            .find(|existing| existing.identifier == registration.identifier)
        {
            Some(existing) => *existing = registration,
            None => self.registrations.push(registration),
        }
        self
    }

    fn find(&self, identifier: &str) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|registration| registration.identifier == identifier)
    }
}

impl fmt::Debug for ColumnRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.registrations.iter().map(|r| &r.identifier))
            .finish()
    }
}

impl ColumnSource for ColumnRegistry {
    fn visible_columns(&self) -> Result<Vec<LiveColumn>> {
        Ok(self
            .registrations
            .iter()
            .filter(|registration| registration.visible)
            .map(|registration| (registration.factory)())
            .collect())
    }

    fn instantiate(&self, identifier: &str) -> Result<Option<LiveColumn>> {
        Ok(self
            .find(identifier)
            .map(|registration| (registration.factory)()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_columns_follow_registration_order() {
        let mut registry = ColumnRegistry::new();
        registry
            .register_column(LiveColumn::new("b\\second", "second", "Second"), true)
            .register_column(LiveColumn::new("a\\first", "first", "First"), true)
            .register_column(LiveColumn::new("c\\hidden", "hidden", "Hidden"), false);

        let keys: Vec<String> = registry
            .visible_columns()
            .expect("visible")
            .into_iter()
            .map(|column| column.key)
            .collect();
        assert_eq!(keys, vec!["b\\second", "a\\first"]);
        assert!(registry.contains("c\\hidden"));
    }

    #[test]
    fn instantiate_unknown_identifier_is_none() {
        let registry = ColumnRegistry::new();
        assert_eq!(registry.instantiate("qbank_gone\\col").expect("lookup"), None);
    }

    #[test]
    fn reregistering_replaces_in_place() {
        let mut registry = ColumnRegistry::new();
        registry.register("a\\col", || LiveColumn::new("a\\col", "col", "Old"));
        registry.register("a\\col", || LiveColumn::new("a\\col", "col", "New"));

        assert_eq!(registry.len(), 1);
        let column = registry.instantiate("a\\col").expect("lookup").expect("known");
        assert_eq!(column.title, "New");
    }
}
