//! Architectural Enforcement
//!
//! Source scanners behind the workspace's architectural tests. They read the
//! production sources of every member and report lines that break a rule:
//!
//! - No blocking I/O inside `async fn` bodies (the TUI and the companion share
//!   one current-thread runtime, so a blocking call freezes the page)
//!
//! The scan is line based. Everything from the first `#[cfg(test)]` in a file
//! onwards is treated as test code and skipped.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Source directories checked, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["companion/core/src", "tui/src"];

/// A blocking call pattern and its description
struct BlockingPattern {
    needle: &'static str,
    kind: &'static str,
}

const BLOCKING_PATTERNS: &[BlockingPattern] = &[
    BlockingPattern {
        needle: "std::fs::",
        kind: "Blocking file I/O",
    },
    BlockingPattern {
        needle: "std::net::",
        kind: "Blocking network I/O",
    },
    BlockingPattern {
        needle: "std::process::Command",
        kind: "Blocking process I/O",
    },
    BlockingPattern {
        needle: "reqwest::blocking",
        kind: "Blocking HTTP client",
    },
    BlockingPattern {
        needle: "std::io::stdin()",
        kind: "Blocking stdin",
    },
    BlockingPattern {
        needle: "std::thread::sleep",
        kind: "Blocking sleep",
    },
];

/// One rule violation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// File the line is in
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// What was found
    pub kind: &'static str,
    /// The offending line, trimmed
    pub source: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} - {}: {}",
            self.path.display(),
            self.line,
            self.kind,
            self.source
        )
    }
}

/// Workspace root, two levels above this crate
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Scan every production directory for blocking I/O in async code
pub fn find_blocking_io_violations() -> Vec<Violation> {
    let root = workspace_root();
    PRODUCTION_DIRS
        .iter()
        .flat_map(|dir| scan_directory(&root.join(dir)))
        .collect()
}

/// Scan all `.rs` files under `dir`; a missing directory yields nothing
pub fn scan_directory(dir: &Path) -> Vec<Violation> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .flat_map(|entry| match fs::read_to_string(entry.path()) {
            Ok(content) => scan_source(entry.path(), &content),
            Err(_) => Vec::new(),
        })
        .collect()
}

/// Scan one file's contents
pub fn scan_source(path: &Path, content: &str) -> Vec<Violation> {
    let lines: Vec<&str> = content
        .lines()
        .take_while(|line| !line.trim_start().starts_with("#[cfg(test)]"))
        .collect();

    let mut violations = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let code = line.split("//").next().unwrap_or(line);
        if code.trim().is_empty() || !is_in_async_function(&lines, idx) {
            continue;
        }

        for pattern in BLOCKING_PATTERNS {
            if code.contains(pattern.needle) {
                violations.push(Violation {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    kind: pattern.kind,
                    source: line.trim().to_string(),
                });
            }
        }
    }
    violations
}

/// Whether `line` opens a function, with any qualifiers in front
pub fn is_fn_signature(line: &str) -> bool {
    const QUALIFIERS: &[&str] = &[
        "pub(crate) ",
        "pub(super) ",
        "pub ",
        "const ",
        "async ",
        "unsafe ",
        "extern \"C\" ",
    ];

    let mut rest = line.trim_start();
    loop {
        match QUALIFIERS.iter().find(|q| rest.starts_with(*q)) {
            Some(q) => rest = &rest[q.len()..],
            None => return rest.starts_with("fn "),
        }
    }
}

/// Whether the nearest enclosing function above `idx` is async
pub fn is_in_async_function(lines: &[&str], idx: usize) -> bool {
    for line in lines[..=idx].iter().rev() {
        if is_fn_signature(line) {
            return line.contains("async fn ");
        }
        let trimmed = line.trim_start();
        if trimmed.starts_with("mod ") || trimmed.starts_with("impl") {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(code: &str) -> Vec<Violation> {
        scan_source(Path::new("sample.rs"), code)
    }

    #[test]
    fn test_fn_signature_detection() {
        assert!(is_fn_signature("fn main() {"));
        assert!(is_fn_signature("    pub async fn run(&mut self) {"));
        assert!(is_fn_signature("pub(crate) fn helper() {"));
        assert!(!is_fn_signature("let f = fn_ptr;"));
        assert!(!is_fn_signature("// fn commented() {"));
    }

    #[test]
    fn test_blocking_io_in_async_fn_detected() {
        let violations = scan(
            "pub async fn load() {\n    let s = std::fs::read_to_string(\"a\");\n}\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].kind, "Blocking file I/O");
    }

    #[test]
    fn test_blocking_io_in_sync_fn_allowed() {
        let violations = scan(
            "pub fn load_config() {\n    let s = std::fs::read_to_string(\"config.toml\");\n}\n",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_test_module_skipped() {
        let violations = scan(
            "fn ok() {}\n#[cfg(test)]\nmod tests {\n    async fn t() {\n        std::fs::read(\"x\");\n    }\n}\n",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_comment_ignored() {
        let violations = scan("async fn f() {\n    // std::fs::read is not used here\n}\n");
        assert!(violations.is_empty());
    }
}
