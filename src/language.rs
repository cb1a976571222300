use std::path::Path;

/// Code-fence language tag for a file, looked up by extension first and then
/// by well-known file names. Unknown files are tagged `text`.
pub fn tag_for(file_name: &str) -> &'static str {
    let path = Path::new(file_name);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if let Some(tag) = tag_for_extension(&ext) {
        return tag;
    }

    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    tag_for_basename(&base)
}

fn tag_for_extension(ext: &str) -> Option<&'static str> {
    let tag = match ext {
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "tsx" => "tsx",
        "jsx" => "jsx",
        "json" => "json",
        "css" => "css",
        "scss" => "scss",
        "sass" => "sass",
        "less" => "less",
        "html" | "htm" => "html",
        "md" | "markdown" => "markdown",
        "yml" | "yaml" => "yaml",
        "sh" | "bash" => "bash",
        "zsh" => "zsh",
        "py" => "python",
        "go" => "go",
        "rs" => "rust",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "php" => "php",
        "rb" => "ruby",
        "pl" => "perl",
        "swift" => "swift",
        "kt" => "kotlin",
        "dart" => "dart",
        "sql" => "sql",
        "ini" => "ini",
        "env" => "env",
        "toml" => "toml",
        "xml" => "xml",
        "dockerfile" => "docker",
        "makefile" => "makefile",
        "vue" => "vue",
        "svelte" => "svelte",
        "txt" | "lock" | "log" => "text",
        _ => return None,
    };
    Some(tag)
}

fn tag_for_basename(base: &str) -> &'static str {
    match base {
        ".bashrc" | ".bash_profile" | ".profile" => "bash",
        ".zshrc" | ".zshenv" => "zsh",
        "dockerfile" => "docker",
        "makefile" => "makefile",
        "license" => "text",
        "readme" => "markdown",
        // Only the bare names; the dot-files fall through to plain text.
        "gitignore" => "gitignore",
        "npmrc" => "ini",
        _ if base == ".env" || base.ends_with(".env") => "env",
        _ if base.starts_with("readme.") => "markdown",
        _ if base.ends_with("prettierrc") || base.ends_with("eslintrc") => "json",
        _ => "text",
    }
}
