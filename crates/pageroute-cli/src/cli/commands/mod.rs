//! CLI command handlers. Each command is in its own file.

mod completions;
mod import;
mod list;
mod remove_page;
mod resolve;

pub use completions::{run_completions, run_manpage};
pub use import::run_import;
pub use list::{run_pages, run_redirects};
pub use remove_page::run_remove_page;
pub use resolve::run_resolve;
