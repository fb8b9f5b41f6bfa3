//! Column catalog file: a TOML list of columns loaded into a registry.
//!
//! ```toml
//! [[columns]]
//! class = "qbank_viewquestiontype\\question_type_column"
//! name = "qtype"
//! title = "T"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::source::{ColumnRegistry, LiveColumn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub columns: Vec<CatalogColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogColumn {
    /// Defaults to `class` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub class: String,
    pub name: String,
    pub title: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl CatalogColumn {
    pub fn to_live(&self) -> LiveColumn {
        LiveColumn {
            key: self.key.clone().unwrap_or_else(|| self.class.clone()),
            class: self.class.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
        }
    }
}

impl Catalog {
    pub fn validate(&self) -> Result<()> {
        for (index, column) in self.columns.iter().enumerate() {
            if column.class.trim().is_empty() {
                bail!("columns[{}]: class must be non-empty", index);
            }
            let key = column.key.as_deref().unwrap_or(&column.class);
            if key.contains(',') {
                bail!("columns[{}]: key must not contain ','", index);
            }
        }
        Ok(())
    }

    pub fn into_registry(self) -> ColumnRegistry {
        let mut registry = ColumnRegistry::new();
        for column in self.columns {
            let visible = column.visible;
            registry.register_column(column.to_live(), visible);
        }
        registry
    }
}

/// Load and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read catalog {}", path.display()))?;
    let catalog: Catalog = toml::from_str(&contents)
        .with_context(|| format!("parse column catalog {}", path.display()))?;
    catalog
        .validate()
        .with_context(|| format!("validate column catalog {}", path.display()))?;
    debug!(path = %path.display(), columns = catalog.columns.len(), "catalog loaded");
    Ok(catalog)
}
