//! Scan a real directory, preselect with globs and assemble the payload,
//! everything the binary does apart from the interactive session.

use std::fs;

use tempfile::TempDir;
use treeyank::error::PickError;
use treeyank::file_scanner::{ScanOptions, scan_entries};
use treeyank::payload::build_payload;
use treeyank::tree::{Tree, flatten};
use treeyank::tree_builder::{apply_preselection, build_tree, compile_patterns};

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/parser")).unwrap();
    fs::create_dir_all(root.join("node_modules/left-pad")).unwrap();
    fs::write(root.join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();
    fs::write(root.join("src/parser/mod.rs"), "pub mod lexer;").unwrap();
    fs::write(root.join("src/parser/lexer.rs"), "pub struct Lexer;").unwrap();
    fs::write(root.join("src/notes.md"), "# Notes").unwrap();
    fs::write(root.join("node_modules/left-pad/index.js"), "module.exports = 1;").unwrap();
    dir
}

fn scanned_tree(dir: &TempDir) -> Tree {
    let entries = scan_entries(&ScanOptions::new(dir.path())).unwrap();
    build_tree(&entries)
}

#[test]
fn scan_builds_a_sorted_tree_without_default_ignores() {
    let dir = project();
    let tree = scanned_tree(&dir);

    let paths: Vec<String> = flatten(&tree)
        .iter()
        .map(|row| row.path.clone())
        .collect();
    assert_eq!(
        paths,
        vec![
            "Cargo.toml",
            "src/",
            "src/main.rs",
            "src/notes.md",
            "src/parser/",
            "src/parser/lexer.rs",
            "src/parser/mod.rs",
        ]
    );
}

#[test]
fn preselected_globs_flow_into_the_payload() {
    let dir = project();
    let mut tree = scanned_tree(&dir);

    let patterns = compile_patterns(&["src/**/*.rs".to_string()]).unwrap();
    assert_eq!(apply_preselection(&mut tree, &patterns), 3);
    assert!(tree.get("src/parser").unwrap().is_selected());
    assert!(!tree.get("src").unwrap().is_selected());
    assert!(tree.is_partially_selected(tree.get("src").unwrap()));

    let files = tree.selected_files();
    assert_eq!(
        files,
        vec!["src/main.rs", "src/parser/lexer.rs", "src/parser/mod.rs"]
    );

    let payload = build_payload(dir.path(), &files);
    assert_eq!(payload.file_count, 3);
    assert!(payload.unreadable.is_empty());
    assert_eq!(
        payload.text,
        "src/main.rs\n```rust\nfn main() {}\n\n```\n\n\
         src/parser/lexer.rs\n```rust\npub struct Lexer;\n```\n\n\
         src/parser/mod.rs\n```rust\npub mod lexer;\n```"
    );
}

#[test]
fn toggling_a_directory_then_one_file_leaves_the_rest() {
    let dir = project();
    let mut tree = scanned_tree(&dir);

    tree.toggle("src").unwrap();
    tree.toggle("src/notes.md").unwrap();

    assert!(!tree.get("src").unwrap().is_selected());
    assert!(tree.get("src/parser").unwrap().is_selected());
    let payload = build_payload(dir.path(), &tree.selected_files());
    assert!(payload.text.starts_with("src/main.rs\n```rust\n"));
    assert!(!payload.text.contains("notes.md"));
}

#[test]
fn file_removed_after_scan_gets_placeholder() {
    let dir = project();
    let mut tree = scanned_tree(&dir);
    tree.toggle("Cargo.toml").unwrap();
    tree.toggle("src/notes.md").unwrap();
    fs::remove_file(dir.path().join("Cargo.toml")).unwrap();

    let payload = build_payload(dir.path(), &tree.selected_files());
    assert_eq!(payload.unreadable, vec!["Cargo.toml"]);
    assert_eq!(
        payload.text,
        "Cargo.toml\n```toml\n[ERROR READING FILE]\n```\n\nsrc/notes.md\n```markdown\n# Notes\n```"
    );
}

#[test]
fn bad_select_glob_is_rejected_up_front() {
    let err = compile_patterns(&["src/[".to_string()]).unwrap_err();
    assert!(matches!(err, PickError::InvalidGlob { ref pattern, .. } if pattern == "src/["));
}

#[test]
fn missing_root_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan_entries(&ScanOptions::new(dir.path().join("nope"))).unwrap_err();
    assert!(matches!(err, PickError::StartupPath { .. }));
}
