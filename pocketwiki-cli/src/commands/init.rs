//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use pocketwiki_core::EntryStore;

const DEFAULT_CONFIG: &str = r#"# pocketwiki configuration
site:
  title: "pocketwiki"

# Directory holding one .md file per entry
entries_dir: "entries"

server:
  listen_addr: "127.0.0.1:8000"
"#;

const STARTER_ENTRY: &str = r#"# Wiki

Welcome to your new wiki. Every page is a Markdown file in the entries directory.

The converter understands a small subset of Markdown:

*Headings marked with #
*Lists marked with a leading star
***bold** text
*[Links](/wiki/Wiki)

Use **Create New Page** in the sidebar to add entries.
"#;

/// Initialize a new pocketwiki project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_entries(root)?;

    println!("✓ pocketwiki initialized in {:?}", root);
    println!("  - Edit pocketwiki.yml to customize site metadata");
    println!("  - Run `pocketwiki serve` and open the printed address");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("pocketwiki.yml");
    if config_path.exists() {
        println!("pocketwiki.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_entries(root: &Path) -> Result<()> {
    let store = EntryStore::new(root.join("entries"));
    store
        .ensure()
        .with_context(|| format!("Failed to create {:?}", store.root()))?;

    if store.get_entry("Wiki")?.is_none() {
        store.save_entry("Wiki", STARTER_ENTRY)?;
        println!("Created starter entry \"Wiki\"");
    }
    Ok(())
}
