//! Diagnostics, per-file reports and their text renderings.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A mapping rule violation.
    Error,
    /// The file could not be checked at all; reported alone.
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

/// A suggested fix for a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One reported finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g., "DL002").
    pub code: String,
    /// Rule name (e.g., "missing-primary-key").
    pub rule: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// 1-based source line, when the finding has a single anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Property or method the finding is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            message: message.into(),
            line: None,
            subject: None,
            suggestion: None,
        }
    }

    /// Anchors this diagnostic to a source line.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Names the property or method this diagnostic is about.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a suggestion to this diagnostic.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Whether this diagnostic halts validation.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// Formats the diagnostic as a block of the text report.
    ///
    /// Fatal diagnostics render their message verbatim, since it is the raw
    /// output of the syntax checker.
    #[must_use]
    pub fn format(&self) -> String {
        if self.is_fatal() {
            return self.message.trim_end().to_string();
        }
        let mut output = format!("[{}] {}", self.code, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = write!(output, "\n  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.code, self.message)
    }
}

/// Everything found in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// Path of the validated file.
    pub path: PathBuf,
    /// Diagnostics in rule registration order.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Creates an empty report for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Returns true if nothing was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns true if the syntax gate rejected the file.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// Process exit status for this report: 0 when clean, 2 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            2
        }
    }

    /// Renders the report for the error channel.
    ///
    /// A clean report renders as the empty string. Otherwise a header line
    /// is followed by a blank line and each diagnostic, separated by blank
    /// lines.
    #[must_use]
    pub fn render_text(&self) -> String {
        if self.is_clean() {
            return String::new();
        }

        let header = if self.is_fatal() {
            format!("PHP syntax error in {}:", self.path.display())
        } else {
            format!(
                "Doctrine mapping issues in {} ({} found):",
                self.path.display(),
                self.diagnostics.len()
            )
        };

        let blocks: Vec<String> = self.diagnostics.iter().map(Diagnostic::format).collect();
        format!("{header}\n\n{}\n", blocks.join("\n\n"))
    }

    /// Renders one `path:line: severity [CODE] message` line per diagnostic.
    ///
    /// Diagnostics without a line number use line 1.
    #[must_use]
    pub fn render_compact(&self) -> String {
        let mut output = String::new();
        for d in &self.diagnostics {
            let message = d.message.lines().next().unwrap_or_default();
            let _ = writeln!(
                output,
                "{}:{}: {} [{}] {}",
                self.path.display(),
                d.line.unwrap_or(1),
                d.severity,
                d.code,
                message
            );
        }
        output
    }
}

/// Result of validating several files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Reports for files that were in scope, clean ones included.
    pub reports: Vec<FileReport>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the report of one checked file.
    pub fn push(&mut self, report: FileReport) {
        self.files_checked += 1;
        self.reports.push(report);
    }

    /// Total number of diagnostics across all files.
    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.reports.iter().map(|r| r.diagnostics.len()).sum()
    }

    /// Returns true if any file has diagnostics.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        self.reports.iter().any(|r| !r.is_clean())
    }

    /// Process exit status for the whole run.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.has_diagnostics() {
            2
        } else {
            0
        }
    }

    /// Reports that have at least one diagnostic.
    pub fn failing(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| !r.is_clean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_diagnostic() -> Diagnostic {
        Diagnostic::new(
            "DL007",
            "string-column-without-length",
            Severity::Error,
            "String column without length: $email",
        )
        .at_line(21)
        .with_subject("email")
    }

    #[test]
    fn format_includes_help() {
        let d = make_diagnostic().with_suggestion(Suggestion::new("Add length: 255"));
        insta::assert_snapshot!(d.format(), @r"
        [DL007] String column without length: $email
          = help: Add length: 255
        ");
    }

    #[test]
    fn display_is_single_line() {
        insta::assert_snapshot!(
            make_diagnostic().to_string(),
            @"error [DL007] String column without length: $email"
        );
    }

    #[test]
    fn clean_report_renders_nothing() {
        let report = FileReport::new("src/Entity/User.php");
        assert!(report.render_text().is_empty());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn report_separates_blocks_with_blank_lines() {
        let mut report = FileReport::new("src/Entity/User.php");
        report.diagnostics.push(Diagnostic::new(
            "DL001",
            "missing-namespace",
            Severity::Error,
            "Missing namespace declaration",
        ));
        report.diagnostics.push(make_diagnostic());

        assert_eq!(report.exit_code(), 2);
        assert_eq!(
            report.render_text(),
            "Doctrine mapping issues in src/Entity/User.php (2 found):\n\n\
             [DL001] Missing namespace declaration\n\n\
             [DL007] String column without length: $email\n"
        );
    }

    #[test]
    fn fatal_report_uses_syntax_header() {
        let mut report = FileReport::new("src/Entity/User.php");
        report.diagnostics.push(Diagnostic::new(
            "DL000",
            "syntax-error",
            Severity::Fatal,
            "PHP Parse error: syntax error, unexpected end of file\n",
        ));

        assert!(report.is_fatal());
        assert_eq!(
            report.render_text(),
            "PHP syntax error in src/Entity/User.php:\n\n\
             PHP Parse error: syntax error, unexpected end of file\n"
        );
    }

    #[test]
    fn compact_uses_line_or_one() {
        let mut report = FileReport::new("a.php");
        report.diagnostics.push(make_diagnostic());
        report.diagnostics.push(Diagnostic::new(
            "DL001",
            "missing-namespace",
            Severity::Error,
            "Missing namespace declaration",
        ));
        insta::assert_snapshot!(report.render_compact(), @r"
        a.php:21: error [DL007] String column without length: $email
        a.php:1: error [DL001] Missing namespace declaration
        ");
    }

    #[test]
    fn lint_result_counts() {
        let mut result = LintResult::new();
        result.push(FileReport::new("a.php"));
        assert_eq!(result.exit_code(), 0);

        let mut dirty = FileReport::new("b.php");
        dirty.diagnostics.push(make_diagnostic());
        result.push(dirty);

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.diagnostic_count(), 1);
        assert_eq!(result.failing().count(), 1);
        assert_eq!(result.exit_code(), 2);
    }
}
