//! Error types for the filesystem and delivery edges of treeyank.
//!
//! Tree errors live next to the tree model in [`crate::tree::TreeError`].

use std::path::PathBuf;
use thiserror::Error;

pub type PickResult<T> = Result<T, PickError>;

#[derive(Error, Debug)]
pub enum PickError {
    /// The scan root cannot be used; nothing can be shown.
    #[error("cannot scan '{path}': {reason}")]
    StartupPath { path: PathBuf, reason: String },

    #[error("invalid --select pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("could not read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard delivery failed: {0}")]
    ClipboardDelivery(String),
}
