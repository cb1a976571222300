//! In-memory file tree: selection model, flattened view and search filter.
mod flatten;
mod model;
mod search;

pub use flatten::{Row, flatten, flatten_all};
pub use model::{Node, NodeId, NodeKind, Tree, TreeError};
pub use search::{SearchFilter, filter_rows};
