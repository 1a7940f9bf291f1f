//! The validation pipeline: load, classify, gate, extract, evaluate.

use crate::classifier;
use crate::config::Config;
use crate::context::SourceUnit;
use crate::extractor::extract;
use crate::model::ClassDeclaration;
use crate::rule::{Rule, RuleBox};
use crate::syntax::{PhpLint, SyntaxChecker, SyntaxVerdict};
use crate::types::{Diagnostic, FileReport, Severity};

use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Code of the diagnostic raised by the syntax gate.
pub const SYNTAX_ERROR_CODE: &str = "DL000";

/// Rule name of the diagnostic raised by the syntax gate.
pub const SYNTAX_ERROR_RULE: &str = "syntax-error";

/// Errors that can occur while building an analyzer.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum AnalyzerError {
    /// Glob pattern error.
    #[error("Invalid exclude pattern `{pattern}`: {source}")]
    #[diagnostic(code(doctrine_lint::analyzer::glob))]
    Glob {
        /// Pattern as configured.
        pattern: String,
        /// Underlying pattern error.
        source: glob::PatternError,
    },
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Wrong extension, missing, excluded or not entity-like. Nothing to say.
    NotApplicable,
    /// The file was validated.
    Checked(FileReport),
}

impl Outcome {
    /// Process exit status: 0 unless a checked file has diagnostics.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotApplicable => 0,
            Self::Checked(report) => report.exit_code(),
        }
    }

    /// The report, if the file was checked.
    #[must_use]
    pub fn report(&self) -> Option<&FileReport> {
        match self {
            Self::NotApplicable => None,
            Self::Checked(report) => Some(report),
        }
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    syntax_checker: Option<Box<dyn SyntaxChecker>>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the default `php -l` syntax gate.
    #[must_use]
    pub fn syntax_checker<C: SyntaxChecker + 'static>(mut self, checker: C) -> Self {
        self.syntax_checker = Some(Box::new(checker));
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let mut patterns = self.exclude_patterns;
        patterns.extend(config.analyzer.exclude.iter().cloned());

        let exclude = patterns
            .into_iter()
            .map(|pattern| match glob::Pattern::new(&pattern) {
                Ok(compiled) => Ok((pattern, compiled)),
                Err(source) => Err(AnalyzerError::Glob { pattern, source }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let syntax_checker = self
            .syntax_checker
            .unwrap_or_else(|| Box::new(PhpLint::new(config.analyzer.php_binary.clone())));

        Ok(Analyzer {
            rules: self.rules,
            exclude,
            config,
            syntax_checker,
        })
    }
}

/// Runs the validation pipeline over single files.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    exclude: Vec<(String, glob::Pattern)>,
    config: Config,
    syntax_checker: Box<dyn SyntaxChecker>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates the file at `path`.
    ///
    /// Never fails: anything that keeps the file from being validated makes
    /// it [`Outcome::NotApplicable`].
    #[must_use]
    pub fn validate_path(&self, path: &Path) -> Outcome {
        if self.should_exclude(path) {
            debug!("Excluding: {}", path.display());
            return Outcome::NotApplicable;
        }

        let Some(unit) = SourceUnit::load(path, &self.config.analyzer.extensions) else {
            return Outcome::NotApplicable;
        };

        if !classifier::is_in_scope(&unit.path, &unit.text, &self.config.analyzer.entity_dirs) {
            debug!("Not entity-like: {}", path.display());
            return Outcome::NotApplicable;
        }

        Outcome::Checked(self.validate_unit(unit))
    }

    /// Validates an already loaded, in-scope unit.
    ///
    /// A syntax gate failure yields a report holding only the fatal
    /// diagnostic.
    #[must_use]
    pub fn validate_unit(&self, mut unit: SourceUnit) -> FileReport {
        info!("Validating {}", unit.path.display());
        let mut report = FileReport::new(unit.path.clone());

        let verdict = self.syntax_checker.check(&unit);
        unit.syntax_valid = Some(verdict.is_valid());
        if let SyntaxVerdict::Invalid { output } = verdict {
            info!("Syntax gate rejected {}", unit.path.display());
            report.diagnostics.push(Diagnostic::new(
                SYNTAX_ERROR_CODE,
                SYNTAX_ERROR_RULE,
                Severity::Fatal,
                output,
            ));
            return report;
        }

        let class = extract(&unit.text);
        report.diagnostics = self.evaluate(&class);

        info!(
            "{}: {} diagnostic(s)",
            unit.path.display(),
            report.diagnostics.len()
        );
        report
    }

    /// Runs every enabled rule over `class`, in registration order.
    #[must_use]
    pub fn evaluate(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        if !class.is_located() {
            debug!("No class declaration found");
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            diagnostics.extend(rule.check(class));
        }
        diagnostics
    }

    /// Checks if a path should be excluded.
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.exclude.iter().any(|(raw, pattern)| {
            if pattern.matches(&path_str) {
                return true;
            }

            // "**/vendor/**" also excludes absolute and relative paths
            // containing "/vendor/".
            let normalized = raw.replace("**", "");
            normalized.len() > 1 && path_str.contains(&normalized)
        })
    }
}
