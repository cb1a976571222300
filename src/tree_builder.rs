use crate::error::{PickError, PickResult};
use crate::file_scanner::ScannedEntry;
use crate::tree::{NodeKind, Tree};
use glob::Pattern;
use tracing::{info, warn};

/// Builds the selection tree from a pre-order scan.
///
/// * `entries` **must** list every directory before its contents.
/// * An entry whose parent is missing is skipped with a warning instead of
///   aborting the whole build.
pub fn build_tree(entries: &[ScannedEntry]) -> Tree {
    let mut tree = Tree::new();
    for entry in entries {
        let kind = if entry.is_dir {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        if let Err(err) = tree.insert(kind, entry.rel_path.as_str()) {
            warn!(%err, "skipping entry while building tree");
        }
    }
    tree
}

pub fn compile_patterns(raw: &[String]) -> PickResult<Vec<Pattern>> {
    raw.iter()
        .map(|s| {
            Pattern::new(s).map_err(|source| PickError::InvalidGlob {
                pattern: s.clone(),
                source,
            })
        })
        .collect()
}

/// Preselects every file matching one of `patterns` (paths relative to the root).
pub fn apply_preselection(tree: &mut Tree, patterns: &[Pattern]) -> usize {
    if patterns.is_empty() {
        return 0;
    }
    let matched = tree.select_matching(|rel_path| patterns.iter().any(|p| p.matches(rel_path)));
    info!(matched, "preselected files from --select patterns");
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rel_path: &str, is_dir: bool) -> ScannedEntry {
        ScannedEntry {
            rel_path: rel_path.to_string(),
            is_dir,
        }
    }

    fn entries() -> Vec<ScannedEntry> {
        vec![
            entry("a.ts", false),
            entry("src", true),
            entry("src/b.ts", false),
            entry("src/c.md", false),
            entry("tests", true),
            entry("tests/test_b.ts", false),
        ]
    }

    #[test]
    fn builds_nested_tree_in_scan_order() {
        let tree = build_tree(&entries());
        assert_eq!(tree.len(), 6);
        let roots: Vec<&str> = tree
            .roots()
            .iter()
            .map(|&id| tree.node(id).rel_path())
            .collect();
        assert_eq!(roots, vec!["a.ts", "src", "tests"]);
        assert!(tree.get("src").unwrap().is_dir());
        assert!(tree.get("src").unwrap().is_expanded());
    }

    #[test]
    fn orphaned_entries_are_skipped() {
        let mut scan = entries();
        scan.push(entry("ghost/file.rs", false));
        let tree = build_tree(&scan);
        assert_eq!(tree.len(), 6);
        assert!(tree.get("ghost/file.rs").is_none());
    }

    #[test]
    fn preselection_marks_matching_files_and_parents() {
        let mut tree = build_tree(&entries());
        let patterns = compile_patterns(&["src/*.ts".into(), "src/*.md".into()]).unwrap();
        assert_eq!(apply_preselection(&mut tree, &patterns), 2);
        assert!(tree.get("src").unwrap().is_selected());
        assert_eq!(tree.selected_files(), vec!["src/b.ts", "src/c.md"]);
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        let err = compile_patterns(&["src/[".into()]).unwrap_err();
        assert!(matches!(err, PickError::InvalidGlob { ref pattern, .. } if pattern == "src/["));
    }
}
