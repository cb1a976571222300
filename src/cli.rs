use crate::file_scanner::{DEFAULT_IGNORE_PATTERNS, ScanOptions};
use clap::Parser;
use std::path::PathBuf;

/// treeyank – pick files from a tree and copy them, fenced, to the clipboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root to scan (defaults to CWD)
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,

    /// Comma-separated substrings; any path containing one is hidden.
    #[arg(long, value_delimiter = ',', value_name = "PATTERNS")]
    pub ignore: Vec<String>,

    /// Do not hide node_modules, .git, dist, build, out and coverage.
    #[arg(long)]
    pub no_default_ignores: bool,

    /// Also hide files ignored by .gitignore / .ignore
    #[arg(long)]
    pub gitignore: bool,

    // Glob patterns to preselect files (e.g., "src/**/*.rs").
    /// Paths are relative to the root directory.
    /// Can be specified multiple times using --select <PATTERN_1> --select <PATTERN_2> ...
    #[arg(long, value_name = "PATTERN")]
    pub select: Vec<String>,

    /// Print the result to stdout instead of copying it to the clipboard.
    #[arg(long)]
    pub print: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, value_name = "FILE", env = "TREEYANK_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn scan_options(&self) -> ScanOptions {
        let mut ignore_patterns: Vec<String> = if self.no_default_ignores {
            Vec::new()
        } else {
            DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect()
        };
        ignore_patterns.extend(
            self.ignore
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        );
        ScanOptions {
            root: self.path.clone(),
            ignore_patterns,
            respect_gitignore: self.gitignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_scan_the_current_directory() {
        let cli = Cli::try_parse_from(["treeyank"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("."));
        assert!(!cli.print);
        let options = cli.scan_options();
        assert_eq!(options.ignore_patterns, DEFAULT_IGNORE_PATTERNS);
        assert!(!options.respect_gitignore);
    }

    #[test]
    fn path_flag_and_extra_ignores() {
        let cli = Cli::try_parse_from([
            "treeyank",
            "-p",
            "/tmp/project",
            "--ignore",
            "target, .venv",
            "--gitignore",
        ])
        .unwrap();
        let options = cli.scan_options();
        assert_eq!(options.root, PathBuf::from("/tmp/project"));
        assert!(options.respect_gitignore);
        assert_eq!(
            &options.ignore_patterns[DEFAULT_IGNORE_PATTERNS.len()..],
            ["target", ".venv"]
        );
    }

    #[test]
    fn default_ignores_can_be_dropped() {
        let cli =
            Cli::try_parse_from(["treeyank", "--no-default-ignores", "--ignore", "vendor"]).unwrap();
        assert_eq!(cli.scan_options().ignore_patterns, vec!["vendor".to_string()]);
    }

    #[test]
    fn select_is_repeatable() {
        let cli = Cli::try_parse_from([
            "treeyank",
            "--select",
            "src/**/*.rs",
            "--select",
            "Cargo.toml",
        ])
        .unwrap();
        assert_eq!(cli.select, vec!["src/**/*.rs", "Cargo.toml"]);
    }
}
