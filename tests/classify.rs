use ghstats::changes::{is_wrapper, skips_subdir};
use ghstats::model::{ContentEntry, EntryKind};

fn file(name: &str) -> ContentEntry {
    ContentEntry::file(name, &format!("tools/x/{name}"))
}

#[test]
fn tool_xml_is_a_wrapper() {
    assert!(is_wrapper(&file("tool.xml")));
    assert!(is_wrapper(&file("bwa_mem.xml")));
}

#[test]
fn support_files_are_not_wrappers() {
    assert!(!is_wrapper(&file("macros.xml")));
    assert!(!is_wrapper(&file("macros_conversion.xml")));
    assert!(!is_wrapper(&file("tool_dependencies.xml")));
    assert!(!is_wrapper(&file("repository_dependencies.xml")));
}

#[test]
fn other_extensions_are_not_wrappers() {
    assert!(!is_wrapper(&file("tool.py")));
    assert!(!is_wrapper(&file("tool.xml.sample")));
    assert!(!is_wrapper(&file(".shed.yml")));
}

#[test]
fn only_files_can_be_wrappers() {
    assert!(!is_wrapper(&ContentEntry::dir("tool.xml", "tools/x/tool.xml")));
    let link = ContentEntry {
        kind: EntryKind::Symlink,
        ..file("tool.xml")
    };
    assert!(!is_wrapper(&link));
}

#[test]
fn data_directories_are_skipped() {
    assert!(skips_subdir(&ContentEntry::dir("test-data", "tools/x/test-data")));
    assert!(skips_subdir(&ContentEntry::dir("tool-data", "tools/x/tool-data")));
    assert!(!skips_subdir(&ContentEntry::dir("subtool", "tools/x/subtool")));
}
