//! Column order manager: persisted enabled/disabled lists over a config store.
//!
//! Both lists are loaded once when the manager is built. Every mutation
//! rewrites the affected lists through [`ConfigStore::set`] and updates the
//! in-memory snapshot, so later calls on the same manager see their own writes.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::core::identifier::{CHECKBOX_NAME, is_custom_field, short_name};
use crate::core::order::ColumnOrder;
use crate::core::positions::ColumnPositions;
use crate::core::sort;
use crate::io::store::ConfigStore;
use crate::source::ColumnSource;

/// Config plugin that owns the persisted lists.
pub const PLUGIN: &str = "qbank_columnsortorder";
/// Persisted enabled order.
pub const ENABLED_KEY: &str = "columnsortorderenabled";
/// Older name of the enabled order, read only when `ENABLED_KEY` is unset.
pub const LEGACY_ENABLED_KEY: &str = "columnsortorder";
/// Persisted disabled set.
pub const DISABLED_KEY: &str = "columnsortorderdisabled";

/// Visible column as listed for the ordering screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub class: String,
    pub name: String,
    pub colname: String,
}

/// Disabled column as listed for the ordering screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabledColumn {
    pub disabledname: String,
}

/// Persist `columns` as the new enabled order, replacing whatever was stored.
///
/// Duplicates are not checked here.
pub fn set_column_order<S, I, T>(store: &mut S, columns: I) -> Result<()>
where
    S: ConfigStore + ?Sized,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let raw = columns
        .into_iter()
        .map(|column| column.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",");
    debug!(columns = %raw, "setting column order");
    store
        .set(PLUGIN, ENABLED_KEY, &raw)
        .context("persist column order")
}

pub struct ColumnManager<S, C> {
    store: S,
    source: C,
    enabled: ColumnOrder,
    disabled: ColumnOrder,
}

impl<S: ConfigStore, C> ColumnManager<S, C> {
    /// Load both persisted lists from `store`.
    ///
    /// Missing or blank values load as empty lists.
    pub fn load(store: S, source: C) -> Result<Self> {
        let enabled_raw = match store.get(PLUGIN, ENABLED_KEY).context("read enabled columns")? {
            Some(raw) => raw,
            None => store
                .get(PLUGIN, LEGACY_ENABLED_KEY)
                .context("read legacy column order")?
                .unwrap_or_default(),
        };
        let disabled_raw = store
            .get(PLUGIN, DISABLED_KEY)
            .context("read disabled columns")?
            .unwrap_or_default();

        let enabled = ColumnOrder::parse(&enabled_raw);
        let disabled = ColumnOrder::parse(&disabled_raw);
        debug!(
            enabled = enabled.len(),
            disabled = disabled.len(),
            "column order loaded"
        );
        Ok(Self {
            store,
            source,
            enabled,
            disabled,
        })
    }

    pub fn enabled(&self) -> &ColumnOrder {
        &self.enabled
    }

    pub fn disabled(&self) -> &ColumnOrder {
        &self.disabled
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Order `live` by the persisted enabled order.
    ///
    /// See [`sort::sort_columns`] for the merge rules.
    pub fn sort_columns(&self, live: &ColumnPositions) -> ColumnPositions {
        let sorted = sort::sort_columns(&self.enabled, live);
        debug!(live = live.len(), sorted = sorted.len(), "columns sorted");
        sorted
    }

    /// Drop every disabled identifier containing `plugin` from both lists.
    pub fn remove_unused_columns(&mut self, plugin: &str) -> Result<()> {
        let mut enabled = self.enabled.clone();
        let mut disabled = self.disabled.clone();
        let matched = disabled.matching(plugin);
        for (_, id) in &matched {
            enabled.remove(id);
            disabled.remove(id);
        }
        info!(plugin, removed = matched.len(), "removed unused columns");
        self.update_config(enabled, disabled)
    }

    /// Move every disabled identifier containing `plugin` into the enabled
    /// order at the position it held in the disabled list.
    pub fn enable_columns(&mut self, plugin: &str) -> Result<()> {
        let mut enabled = self.enabled.clone();
        let mut disabled = self.disabled.clone();
        let matched = disabled.matching(plugin);
        for (position, id) in &matched {
            disabled.remove(id);
            enabled.insert_at(*position, id.as_str());
        }
        info!(plugin, enabled = matched.len(), "enabled columns");
        self.update_config(enabled, disabled)
    }

    /// Move every enabled identifier containing `plugin` into the disabled
    /// list at the position it held in the enabled order.
    pub fn disable_columns(&mut self, plugin: &str) -> Result<()> {
        let mut enabled = self.enabled.clone();
        let mut disabled = self.disabled.clone();
        let matched = enabled.matching(plugin);
        for (position, id) in &matched {
            enabled.remove(id);
            disabled.insert_at(*position, id.as_str());
        }
        info!(plugin, disabled = matched.len(), "disabled columns");
        self.update_config(enabled, disabled)
    }

    /// Single write point for both lists.
    ///
    /// The list that gains identifiers is written before the list that loses
    /// them, so a failed second write leaves a moved column in both stored
    /// lists rather than in neither. The snapshot follows each successful
    /// write.
    ///
    /// An empty list is never written, so emptying a list through a mutation
    /// leaves the previously stored value in place.
    fn update_config(&mut self, enabled: ColumnOrder, disabled: ColumnOrder) -> Result<()> {
        if disabled.len() > self.disabled.len() {
            self.write_disabled(disabled)?;
            self.write_enabled(enabled)?;
        } else {
            self.write_enabled(enabled)?;
            self.write_disabled(disabled)?;
        }
        debug!(
            enabled = self.enabled.len(),
            disabled = self.disabled.len(),
            "column config updated"
        );
        Ok(())
    }

    fn write_enabled(&mut self, enabled: ColumnOrder) -> Result<()> {
        if !enabled.is_empty() {
            self.store
                .set(PLUGIN, ENABLED_KEY, &enabled.to_raw())
                .context("persist enabled columns")?;
        }
        self.enabled = enabled;
        Ok(())
    }

    fn write_disabled(&mut self, disabled: ColumnOrder) -> Result<()> {
        if !disabled.is_empty() {
            self.store
                .set(PLUGIN, DISABLED_KEY, &disabled.to_raw())
                .context("persist disabled columns")?;
        }
        self.disabled = disabled;
        Ok(())
    }
}

impl<S, C: ColumnSource> ColumnManager<S, C> {
    /// Visible columns except the checkbox, in source order.
    pub fn columns(&self) -> Result<Vec<ColumnSummary>> {
        let visible = self
            .source
            .visible_columns()
            .context("list visible columns")?;
        Ok(visible
            .into_iter()
            .filter(|column| column.name != CHECKBOX_NAME)
            .map(|column| ColumnSummary {
                colname: short_name(&column.key).to_string(),
                class: column.class,
                name: column.title,
            })
            .collect())
    }

    /// Display names of disabled columns, in disabled-list order.
    ///
    /// Custom-field columns report their field name. Other identifiers are
    /// instantiated through the column source for their title; identifiers the
    /// source does not know are skipped.
    pub fn disabled_columns(&self) -> Result<Vec<DisabledColumn>> {
        let mut listed = Vec::with_capacity(self.disabled.len());
        for id in self.disabled.iter() {
            if is_custom_field(id) {
                listed.push(DisabledColumn {
                    disabledname: short_name(id).to_string(),
                });
                continue;
            }
            match self
                .source
                .instantiate(id)
                .with_context(|| format!("instantiate column {}", id))?
            {
                Some(column) => listed.push(DisabledColumn {
                    disabledname: column.title,
                }),
                None => warn!(column = id, "skipping unknown disabled column"),
            }
        }
        Ok(listed)
    }

    /// [`Self::columns`], logging failures and falling back to an empty list.
    pub fn columns_or_empty(&self) -> Vec<ColumnSummary> {
        self.columns().unwrap_or_else(|err| {
            error!(error = %format!("{:#}", err), "listing columns failed");
            Vec::new()
        })
    }

    /// [`Self::disabled_columns`], logging failures and falling back to an
    /// empty list.
    pub fn disabled_columns_or_empty(&self) -> Vec<DisabledColumn> {
        self.disabled_columns().unwrap_or_else(|err| {
            error!(error = %format!("{:#}", err), "listing disabled columns failed");
            Vec::new()
        })
    }
}
