//! # pocketwiki-core
//!
//! Core library for the pocketwiki wiki server.
//!
//! This crate provides the Markdown-to-HTML converter, the file-backed
//! entry store, title search, and configuration parsing. It has no HTTP
//! surface of its own; the `pocketwiki` binary wires these pieces to a
//! web server.

pub mod config;
pub mod markdown;
pub mod search;
pub mod store;

pub use config::{Config, ConfigError};
pub use markdown::render;
pub use search::{search_titles, SearchOutcome};
pub use store::{EntryStore, StoreError};
