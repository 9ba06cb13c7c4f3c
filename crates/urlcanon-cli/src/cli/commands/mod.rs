//! CLI command handlers. Each command is in its own file.

mod batch;
mod canon;
mod completions;
mod config;
mod explain;

pub use batch::{run_batch, BatchOptions};
pub use canon::run_canon;
pub use completions::{run_completions, run_man};
pub use config::run_config;
pub use explain::run_explain;
