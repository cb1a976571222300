use crate::error::{PickError, PickResult};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Substrings that hide an entry (and everything below it) unless
/// `--no-default-ignores` is given.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] =
    &["node_modules", ".git", "dist", "build", "out", "coverage"];

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    /// An entry is skipped when its root-relative path contains any of these.
    pub ignore_patterns: Vec<String>,
    /// Also honour `.gitignore` / `.ignore` files.
    pub respect_gitignore: bool,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            respect_gitignore: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedEntry {
    /// `/`-separated path relative to the scan root.
    pub rel_path: String,
    pub is_dir: bool,
}

/// Walks `options.root` depth-first, siblings sorted by name.
///
/// Entries come out in pre-order, so a directory always precedes its
/// contents. The root itself is not part of the result.
pub fn scan_entries(options: &ScanOptions) -> PickResult<Vec<ScannedEntry>> {
    let root = options.root.as_path();
    if !root.exists() {
        return Err(PickError::StartupPath {
            path: root.to_path_buf(),
            reason: "does not exist".into(),
        });
    }
    if !root.is_dir() {
        return Err(PickError::StartupPath {
            path: root.to_path_buf(),
            reason: "is not a directory".into(),
        });
    }

    let mut walker = WalkBuilder::new(root);
    walker
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    if options.respect_gitignore {
        walker
            .git_ignore(true)
            .git_exclude(true)
            .ignore(true)
            .parents(true)
            .require_git(false);
    }

    let filter_root = root.to_path_buf();
    let patterns = options.ignore_patterns.clone();
    walker.filter_entry(move |entry| {
        let Some(rel_path) = relative_path(&filter_root, entry.path()) else {
            return true;
        };
        !patterns
            .iter()
            .any(|pattern| !pattern.is_empty() && rel_path.contains(pattern.as_str()))
    });

    let mut entries = Vec::new();
    for result in walker.build() {
        let dirent = match result {
            Ok(v) => v,
            Err(err) => {
                warn!(%err, "skipping entry during scan");
                continue;
            }
        };
        if dirent.depth() == 0 {
            continue;
        }
        let Some(rel_path) = relative_path(root, dirent.path()) else {
            continue;
        };
        let is_dir = dirent.file_type().is_some_and(|ft| ft.is_dir());
        entries.push(ScannedEntry { rel_path, is_dir });
    }

    debug!(root = %root.display(), entries = entries.len(), "scan finished");
    Ok(entries)
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
