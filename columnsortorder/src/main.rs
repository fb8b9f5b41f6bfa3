//! Question bank column order tool.
//!
//! Reads and rewrites the persisted column order in a TOML config store
//! (`columnsortorder.toml` by default). Listing commands also need a column
//! catalog describing the columns the question bank offers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

use columnsortorder::core::positions::ColumnPositions;
use columnsortorder::io::catalog::load_catalog;
use columnsortorder::io::toml_store::TomlFileStore;
use columnsortorder::logging;
use columnsortorder::manager::{ColumnManager, set_column_order};
use columnsortorder::source::ColumnRegistry;

#[derive(Parser)]
#[command(
    name = "columnsortorder",
    version,
    about = "Manage the question bank column order"
)]
struct Cli {
    /// Config store file.
    #[arg(long, global = true, default_value = "columnsortorder.toml")]
    config: PathBuf,

    /// Column catalog file (`[[columns]]` entries).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the enabled order and the disabled columns.
    Show,
    /// Replace the enabled order.
    SetOrder {
        /// Fully-qualified column identifiers, first to last.
        #[arg(required = true)]
        columns: Vec<String>,
    },
    /// Enable every disabled column whose identifier contains PLUGIN.
    Enable { plugin: String },
    /// Disable every enabled column whose identifier contains PLUGIN.
    Disable { plugin: String },
    /// Forget every disabled column whose identifier contains PLUGIN.
    Remove { plugin: String },
    /// List visible columns (requires --catalog).
    Columns {
        #[arg(long)]
        json: bool,
    },
    /// List disabled columns by display name (requires --catalog).
    Disabled {
        #[arg(long)]
        json: bool,
    },
    /// Merge a live column order (`key=position` pairs) with the persisted one.
    Sort {
        #[arg(value_parser = parse_live_entry)]
        live: Vec<(String, i64)>,
    },
}

fn main() {
    if let Err(err) = logging::init("warn") {
        eprintln!("{:#}", err);
    }
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = TomlFileStore::open(&cli.config)?;
    match cli.command {
        Command::Show => cmd_show(store),
        Command::SetOrder { columns } => {
            let mut store = store;
            set_column_order(&mut store, &columns)
        }
        Command::Enable { plugin } => load_manager(store, None)?.enable_columns(&plugin),
        Command::Disable { plugin } => load_manager(store, None)?.disable_columns(&plugin),
        Command::Remove { plugin } => load_manager(store, None)?.remove_unused_columns(&plugin),
        Command::Columns { json } => {
            let manager = load_manager(store, Some(require_catalog(&cli.catalog, "columns")?))?;
            let columns = manager.columns()?;
            if json {
                return print_json(&columns);
            }
            for column in columns {
                println!("{}\t{}\t{}", column.colname, column.name, column.class);
            }
            Ok(())
        }
        Command::Disabled { json } => {
            let manager = load_manager(store, Some(require_catalog(&cli.catalog, "disabled")?))?;
            let disabled = manager.disabled_columns()?;
            if json {
                return print_json(&disabled);
            }
            for column in disabled {
                println!("{}", column.disabledname);
            }
            Ok(())
        }
        Command::Sort { live } => {
            let live: ColumnPositions = live.into_iter().collect();
            let sorted = load_manager(store, None)?.sort_columns(&live);
            for (key, position) in sorted.iter() {
                println!("{}={}", key, position);
            }
            Ok(())
        }
    }
}

fn cmd_show(store: TomlFileStore) -> Result<()> {
    let manager = load_manager(store, None)?;
    for id in manager.enabled().iter() {
        println!("enabled: {}", id);
    }
    for id in manager.disabled().iter() {
        println!("disabled: {}", id);
    }
    Ok(())
}

fn load_manager(
    store: TomlFileStore,
    catalog: Option<&Path>,
) -> Result<ColumnManager<TomlFileStore, ColumnRegistry>> {
    let registry = match catalog {
        Some(path) => load_catalog(path)?.into_registry(),
        None => ColumnRegistry::new(),
    };
    ColumnManager::load(store, registry).context("load column order")
}

fn require_catalog<'a>(catalog: &'a Option<PathBuf>, command: &str) -> Result<&'a Path> {
    match catalog {
        Some(path) => Ok(path.as_path()),
        None => bail!("`{}` requires --catalog", command),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{}", payload);
    Ok(())
}

fn parse_live_entry(raw: &str) -> Result<(String, i64), String> {
    let (key, position) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=POSITION, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty column key in '{}'", raw));
    }
    let position = position
        .parse::<i64>()
        .map_err(|err| format!("invalid position in '{}': {}", raw, err))?;
    Ok((key.to_string(), position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_set_order() {
        let cli = Cli::parse_from(["columnsortorder", "set-order", "a\\x", "b\\y"]);
        match cli.command {
            Command::SetOrder { columns } => assert_eq!(columns, vec!["a\\x", "b\\y"]),
            _ => panic!("expected set-order"),
        }
        assert_eq!(cli.config, PathBuf::from("columnsortorder.toml"));
    }

    #[test]
    fn parse_global_config_after_subcommand() {
        let cli = Cli::parse_from(["columnsortorder", "show", "--config", "other.toml"]);
        assert!(matches!(cli.command, Command::Show));
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn parse_sort_entries() {
        let cli = Cli::parse_from(["columnsortorder", "sort", "col_y=0", "col_z=1"]);
        match cli.command {
            Command::Sort { live } => assert_eq!(
                live,
                vec![("col_y".to_string(), 0), ("col_z".to_string(), 1)]
            ),
            _ => panic!("expected sort"),
        }
    }

    #[test]
    fn live_entry_requires_position() {
        assert!(parse_live_entry("col_y").is_err());
        assert!(parse_live_entry("col_y=x").is_err());
        assert!(parse_live_entry("=1").is_err());
    }
}
