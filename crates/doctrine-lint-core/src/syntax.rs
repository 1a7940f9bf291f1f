//! Syntax gate: confirms a file parses before pattern-based extraction.
//!
//! The gate does not interpret the checker's output. Anything other than a
//! clean exit rejects the file, including a checker that cannot be started.

use crate::context::SourceUnit;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Verdict of a syntax check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxVerdict {
    /// The file parses.
    Valid,
    /// The file was rejected; `output` is what the checker printed.
    Invalid {
        /// Raw checker output (stdout followed by stderr).
        output: String,
    },
}

impl SyntaxVerdict {
    /// Returns true for [`SyntaxVerdict::Valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Something that can judge whether a source file parses.
///
/// Any `Fn(&SourceUnit) -> SyntaxVerdict` closure is a checker, which lets
/// tests run the pipeline without a PHP installation.
pub trait SyntaxChecker: Send + Sync {
    /// Checks `unit`.
    fn check(&self, unit: &SourceUnit) -> SyntaxVerdict;
}

impl<F> SyntaxChecker for F
where
    F: Fn(&SourceUnit) -> SyntaxVerdict + Send + Sync,
{
    fn check(&self, unit: &SourceUnit) -> SyntaxVerdict {
        self(unit)
    }
}

/// Errors raised while running an external checker.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GateError {
    /// The checker binary could not be started.
    #[error("Failed to run syntax checker `{binary}`: {source}")]
    #[diagnostic(
        code(doctrine_lint::gate::spawn),
        help("Install PHP or point `php_binary` in doctrine-lint.toml at it")
    )]
    Spawn {
        /// Binary that failed to start.
        binary: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Runs `php -l` on the file.
#[derive(Debug, Clone)]
pub struct PhpLint {
    binary: PathBuf,
}

impl PhpLint {
    /// Creates a checker that runs `binary -l <file>`.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Returns the configured binary.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Runs the checker and reports whether it exited cleanly.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Spawn`] if the binary cannot be started.
    pub fn run(&self, path: &Path) -> Result<SyntaxVerdict, GateError> {
        let output = Command::new(&self.binary)
            .arg("-l")
            .arg(path)
            .output()
            .map_err(|source| GateError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        debug!(
            "{} -l {} exited with {}",
            self.binary.display(),
            path.display(),
            output.status
        );

        if output.status.success() {
            return Ok(SyntaxVerdict::Valid);
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        if text.trim().is_empty() {
            text = format!("{} -l exited with {}", self.binary.display(), output.status);
        }
        Ok(SyntaxVerdict::Invalid { output: text })
    }
}

impl Default for PhpLint {
    fn default() -> Self {
        Self::new("php")
    }
}

impl SyntaxChecker for PhpLint {
    fn check(&self, unit: &SourceUnit) -> SyntaxVerdict {
        match self.run(&unit.path) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("{e}");
                SyntaxVerdict::Invalid {
                    output: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_checkers() {
        let checker = |unit: &SourceUnit| {
            if unit.text.contains('{') {
                SyntaxVerdict::Valid
            } else {
                SyntaxVerdict::Invalid {
                    output: "no braces".to_string(),
                }
            }
        };
        assert!(checker.check(&SourceUnit::new("a.php", "class A {}")).is_valid());
        assert!(!checker.check(&SourceUnit::new("a.php", "class A")).is_valid());
    }

    #[test]
    fn missing_binary_fails_closed() {
        let gate = PhpLint::new("/nonexistent/bin/php-for-doctrine-lint");
        let verdict = gate.check(&SourceUnit::new("a.php", "<?php"));
        match verdict {
            SyntaxVerdict::Invalid { output } => {
                assert!(output.contains("Failed to run syntax checker"));
            }
            SyntaxVerdict::Valid => panic!("missing checker must reject the file"),
        }
    }

    #[test]
    fn run_reports_spawn_error() {
        let gate = PhpLint::new("/nonexistent/bin/php-for-doctrine-lint");
        let err = gate.run(Path::new("a.php")).unwrap_err();
        assert!(matches!(err, GateError::Spawn { .. }));
    }
}
