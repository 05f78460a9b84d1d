pub mod aggregate;
pub mod classify;
pub mod exec;

pub use aggregate::{content_changes, content_history, find_wrappers, ChangeReport, ContentHistory, TreeLayout};
pub use classify::{is_wrapper, skips_subdir};
pub use exec::exec;
