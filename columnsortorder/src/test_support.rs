//! Test-only helpers for building stores and column sources.

use std::path::PathBuf;

use crate::io::store::{ConfigStore, MemoryStore};
use crate::manager::{DISABLED_KEY, ENABLED_KEY, PLUGIN};
use crate::source::{ColumnRegistry, LiveColumn};

/// Memory store holding the given lists. Empty lists are left unset.
pub fn store_with(enabled: &[&str], disabled: &[&str]) -> MemoryStore {
    let mut store = MemoryStore::new();
    if !enabled.is_empty() {
        store
            .set(PLUGIN, ENABLED_KEY, &enabled.join(","))
            .expect("set enabled");
    }
    if !disabled.is_empty() {
        store
            .set(PLUGIN, DISABLED_KEY, &disabled.join(","))
            .expect("set disabled");
    }
    store
}

/// Registry mirroring a stock question bank: checkbox first, a custom field,
/// and one column that can be instantiated but is not visible.
pub fn sample_registry() -> ColumnRegistry {
    let mut registry = ColumnRegistry::new();
    registry
        .register_column(
            LiveColumn::new("core_question\\local\\bank\\checkbox_column", "checkbox", "Select"),
            true,
        )
        .register_column(
            LiveColumn::new("qbank_viewquestiontype\\question_type_column", "qtype", "T"),
            true,
        )
        .register_column(
            LiveColumn::new(
                "qbank_viewquestionname\\question_name_idnumber_tags_column",
                "questionname",
                "Question",
            ),
            true,
        )
        .register_hidden("qbank_editquestion\\edit_menu_column", || {
            LiveColumn::new("qbank_editquestion\\edit_menu_column", "editmenu", "Actions")
        })
        .register_column(
            LiveColumn {
                key: "qbank_customfields\\custom_field_column\\field_42".to_string(),
                class: "qbank_customfields\\custom_field_column".to_string(),
                name: "field_42".to_string(),
                title: "Difficulty".to_string(),
            },
            true,
        );
    registry
}

/// Temporary directory plus a config path inside it.
pub fn temp_config() -> (tempfile::TempDir, PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("columnsortorder.toml");
    (temp, path)
}
