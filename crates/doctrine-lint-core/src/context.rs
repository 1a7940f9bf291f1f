//! The file under validation.

use std::path::{Path, PathBuf};
use tracing::debug;

/// One file read for validation.
///
/// Created per invocation and discarded afterwards.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Path the file was read from.
    pub path: PathBuf,
    /// Raw file contents.
    pub text: String,
    /// Verdict of the syntax gate, once it has run.
    pub syntax_valid: Option<bool>,
}

impl SourceUnit {
    /// Creates a unit from text already in memory.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            syntax_valid: None,
        }
    }

    /// Reads `path` if it has one of `extensions`.
    ///
    /// Returns `None` for a wrong extension, a missing file or unreadable
    /// (including non UTF-8) contents.
    #[must_use]
    pub fn load(path: &Path, extensions: &[String]) -> Option<Self> {
        if !has_extension(path, extensions) {
            debug!("Skipping {}: extension not handled", path.display());
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(text) => Some(Self::new(path, text)),
            Err(e) => {
                debug!("Skipping {}: {e}", path.display());
                None
            }
        }
    }
}

/// Whether `path` ends in one of `extensions` (compared case-insensitively).
#[must_use]
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn php() -> Vec<String> {
        vec!["php".to_string()]
    }

    #[test]
    fn extension_filter() {
        assert!(has_extension(Path::new("User.php"), &php()));
        assert!(has_extension(Path::new("User.PHP"), &php()));
        assert!(!has_extension(Path::new("User.php.bak"), &php()));
        assert!(!has_extension(Path::new("Makefile"), &php()));
    }

    #[test]
    fn load_reads_matching_file() {
        let mut file = tempfile::Builder::new().suffix(".php").tempfile().unwrap();
        write!(file, "<?php\nclass A {{}}\n").unwrap();

        let unit = SourceUnit::load(file.path(), &php()).unwrap();
        assert!(unit.text.contains("class A"));
        assert_eq!(unit.syntax_valid, None);
    }

    #[test]
    fn load_skips_missing_and_foreign_files() {
        assert!(SourceUnit::load(Path::new("/nonexistent/User.php"), &php()).is_none());

        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(SourceUnit::load(file.path(), &php()).is_none());
    }
}
