//! One-shot Markdown rendering to stdout.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use pocketwiki_core::render;

/// Convert a single Markdown file and print the HTML.
pub fn render_page(file: &Path) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    println!("{}", render(&content));
    Ok(())
}
