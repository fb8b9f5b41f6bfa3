//! Config store persisted as a TOML file (one table per plugin).

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::store::ConfigStore;

type PluginTables = BTreeMap<String, BTreeMap<String, String>>;

/// File-backed [`ConfigStore`].
///
/// The file is read once on open. Every `set` rewrites the whole file
/// atomically (temp file + rename).
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
    tables: PluginTables,
}

impl TomlFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "config file missing, starting empty");
            return Ok(Self {
                path,
                tables: PluginTables::new(),
            });
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("read config {}", path.display()))?;
        let tables: PluginTables =
            toml::from_str(&contents).with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), plugins = tables.len(), "config loaded");
        Ok(Self { path, tables })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let mut buf = toml::to_string_pretty(&self.tables).context("serialize config toml")?;
        if !buf.ends_with('\n') {
            buf.push('\n');
        }
        write_atomic(&self.path, &buf)
    }
}

impl ConfigStore for TomlFileStore {
    fn get(&self, plugin: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .tables
            .get(plugin)
            .and_then(|table| table.get(key))
            .cloned())
    }

    fn set(&mut self, plugin: &str, key: &str, value: &str) -> Result<()> {
        debug!(path = %self.path.display(), plugin, key, "writing config value");
        self.tables
            .entry(plugin.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Sibling scratch file the store is written to before it replaces `path`:
/// the file name with `.tmp` appended, so `store.cfg` stages in `store.cfg.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("config"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;
    }
    let staged = temp_path(path);
    fs::write(&staged, contents)
        .with_context(|| format!("stage config {}", staged.display()))?;
    if let Err(err) = fs::rename(&staged, path) {
        let _ = fs::remove_file(&staged);
        return Err(err).with_context(|| format!("replace config {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_is_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = TomlFileStore::open(temp.path().join("missing.toml")).expect("open");
        assert_eq!(store.get("qbank_columnsortorder", "x").expect("get"), None);
    }

    #[test]
    fn set_persists_across_reopen() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("config.toml");

        let mut store = TomlFileStore::open(&path).expect("open");
        store
            .set("qbank_columnsortorder", "columnsortorderenabled", "a\\b,c\\d")
            .expect("set");

        let reopened = TomlFileStore::open(&path).expect("reopen");
        assert_eq!(
            reopened
                .get("qbank_columnsortorder", "columnsortorderenabled")
                .expect("get")
                .as_deref(),
            Some("a\\b,c\\d")
        );
        assert_eq!(reopened.path(), path.as_path());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn temp_path_keeps_the_config_extension() {
        assert_eq!(
            temp_path(Path::new("/srv/qbank/columns.toml")),
            PathBuf::from("/srv/qbank/columns.toml.tmp")
        );
        assert_eq!(
            temp_path(Path::new("settings.cfg")),
            PathBuf::from("settings.cfg.tmp")
        );
        assert_eq!(temp_path(Path::new("store")), PathBuf::from("store.tmp"));
    }

    #[test]
    fn set_works_for_non_toml_file_names() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("columns.cfg");

        let mut store = TomlFileStore::open(&path).expect("open");
        store
            .set("qbank_columnsortorder", "columnsortorderdisabled", "e\\f")
            .expect("set");

        assert!(path.exists());
        assert!(!temp.path().join("columns.cfg.tmp").exists());
        assert!(!temp.path().join("columns.toml.tmp").exists());
    }

    #[test]
    fn non_string_value_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[qbank_columnsortorder]\ncolumnsortorderenabled = 3\n").expect("write");

        let err = TomlFileStore::open(&path).expect_err("should fail");
        assert!(format!("{:#}", err).contains("parse config"));
    }
}
