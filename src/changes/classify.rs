use crate::model::{ContentEntry, EntryKind};

/// File name prefixes of XML support files that sit next to tool wrappers.
const NON_WRAPPER_PREFIXES: &[&str] = &["macros", "tool_dependencies", "repository_dependencies"];

/// Subdirectories of a tool that never hold wrappers.
const SKIPPED_SUBDIR_PREFIXES: &[&str] = &["tool-data", "test-data"];

/// A tool wrapper is an XML file that is not one of the known support files.
pub fn is_wrapper(entry: &ContentEntry) -> bool {
    entry.kind == EntryKind::File
        && entry.name.ends_with(".xml")
        && !NON_WRAPPER_PREFIXES
            .iter()
            .any(|prefix| entry.name.starts_with(prefix))
}

pub fn skips_subdir(entry: &ContentEntry) -> bool {
    SKIPPED_SUBDIR_PREFIXES
        .iter()
        .any(|prefix| entry.name.starts_with(prefix))
}
