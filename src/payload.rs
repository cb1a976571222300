use crate::error::{PickError, PickResult};
use crate::language;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Substituted for the contents of a file that could not be read.
pub const READ_ERROR_PLACEHOLDER: &str = "[ERROR READING FILE]";

/// The text handed to the clipboard, plus what went into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    pub text: String,
    pub file_count: usize,
    pub unreadable: Vec<String>,
}

impl Payload {
    /// Rough estimate: GPT-style token ≈ 4 chars (good enough for a summary line)
    pub fn approx_tokens(&self) -> usize {
        self.text.chars().count() / 4
    }
}

/// Concatenates each file as
///
/// ````text
/// path/to/file.rs
/// ```rust
/// <contents>
/// ```
/// ````
///
/// separated by blank lines. Paths are relative to `root`. A file that cannot
/// be read gets [`READ_ERROR_PLACEHOLDER`] as its contents and the remaining
/// files are still processed.
pub fn build_payload<S: AsRef<str>>(root: &Path, files: &[S]) -> Payload {
    let mut out = String::new();
    let mut unreadable = Vec::new();

    for rel_path in files {
        let rel_path = rel_path.as_ref();
        let content = match read_file(root, rel_path) {
            Ok(content) => content,
            Err(err) => {
                warn!(%err, "substituting placeholder for unreadable file");
                unreadable.push(rel_path.to_string());
                READ_ERROR_PLACEHOLDER.to_string()
            }
        };
        let tag = language::tag_for(rel_path);
        out.push_str(&format!("{rel_path}\n```{tag}\n{content}\n```\n\n"));
    }

    Payload {
        text: out.trim().to_string(),
        file_count: files.len(),
        unreadable,
    }
}

fn read_file(root: &Path, rel_path: &str) -> PickResult<String> {
    let path = root.join(rel_path);
    fs::read_to_string(&path).map_err(|source| PickError::FileRead { path, source })
}
