//! # pocketwiki-render
//!
//! Template rendering library for pocketwiki.
//!
//! This crate handles HTML page chrome using Askama; the entry body
//! itself is pre-rendered HTML produced by `pocketwiki-core`.

pub mod templates;

pub use templates::{
    EntryTemplate, ErrorTemplate, FormTemplate, IndexTemplate, NotFoundTemplate,
};
