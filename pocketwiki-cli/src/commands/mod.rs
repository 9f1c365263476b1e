//! CLI command implementations.

mod init;
mod page;
mod serve;

pub use init::init_project;
pub use page::render_page;
pub use serve::serve;
