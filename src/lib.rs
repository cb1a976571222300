//! Interactive file picker: scan a directory into a tree, let the user tick
//! files in a terminal UI, and copy their fenced contents to the clipboard.

pub mod cli;
pub mod clipboard;
pub mod error;
pub mod file_scanner;
pub mod language;
pub mod logging;
pub mod payload;
pub mod tree;
pub mod tree_builder;
pub mod tui;
pub mod workflow;
