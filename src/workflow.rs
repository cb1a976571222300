use crate::payload::{self, Payload};
use crate::{cli, clipboard, file_scanner, tree_builder, tui};
use anyhow::{Context, Result};
use tracing::{error, info};

// Where the payload ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Clipboard,
    Stdout,
}

// Lines printed once the payload has been delivered.
fn summary_lines(payload: &Payload, files: &[&str], destination: Destination) -> Vec<String> {
    let mut lines = Vec::with_capacity(files.len() + 2);
    lines.push(match destination {
        Destination::Clipboard => format!(
            "✅ Copied {} files (≈ {} tokens) to the clipboard.",
            payload.file_count,
            payload.approx_tokens()
        ),
        Destination::Stdout => format!(
            "(--print: {} files (≈ {} tokens) written to stdout. Clipboard not affected.)",
            payload.file_count,
            payload.approx_tokens()
        ),
    });
    lines.extend(files.iter().map(|path| format!("  {path}")));
    if !payload.unreadable.is_empty() {
        lines.push(format!(
            "⚠️ {} file(s) could not be read and were replaced with {}",
            payload.unreadable.len(),
            payload::READ_ERROR_PLACEHOLDER
        ));
    }
    lines
}

// Clipboard failures are reported, never propagated: the run still ends
// normally once the picker has closed.
fn deliver(payload: &Payload, destination: Destination) -> bool {
    match destination {
        Destination::Stdout => {
            println!("{}", payload.text);
            true
        }
        Destination::Clipboard => match clipboard::copy_text_to_clipboard(payload.text.clone()) {
            Ok(()) => true,
            Err(err) => {
                error!(%err, "clipboard delivery failed");
                false
            }
        },
    }
}

// Main orchestrator: scan, pick, assemble, deliver.
pub fn run_treeyank(cli_args: cli::Cli) -> Result<()> {
    let scan_options = cli_args.scan_options();
    let preselect_patterns = tree_builder::compile_patterns(&cli_args.select)?;

    let entries = file_scanner::scan_entries(&scan_options)?;
    let mut tree = tree_builder::build_tree(&entries);
    info!(
        root = %scan_options.root.display(),
        nodes = tree.len(),
        "scan finished"
    );
    if tree.is_empty() {
        println!(
            "No files found under {} after applying ignore patterns.",
            scan_options.root.display()
        );
        return Ok(());
    }
    tree_builder::apply_preselection(&mut tree, &preselect_patterns);

    let Some(tree) = tui::run_tui(tree).context("interactive selection failed")? else {
        println!("Selection cancelled. Nothing was copied.");
        return Ok(());
    };

    let files = tree.selected_files();
    if files.is_empty() {
        println!("No files selected. Nothing was copied.");
        return Ok(());
    }

    let payload = payload::build_payload(&scan_options.root, &files);
    let destination = if cli_args.print {
        Destination::Stdout
    } else {
        Destination::Clipboard
    };
    if !deliver(&payload, destination) {
        eprintln!("❌ Could not copy to the clipboard. Re-run with --print to get the text on stdout.");
        return Ok(());
    }

    for line in summary_lines(&payload, &files, destination) {
        match destination {
            Destination::Clipboard => println!("{line}"),
            Destination::Stdout => eprintln!("{line}"),
        }
    }
    Ok(())
}
