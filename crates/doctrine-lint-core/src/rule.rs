//! The rule trait.

use crate::model::ClassDeclaration;
use crate::types::{Diagnostic, Severity};

/// A check over one extracted class.
///
/// Rules are pure: they see only the [`ClassDeclaration`] and never touch
/// the file system, so each can be tested against a declaration built by
/// [`extract`](crate::extract) from an inline PHP snippet.
///
/// # Example
///
/// ```ignore
/// use doctrine_lint_core::{ClassDeclaration, Diagnostic, Rule};
///
/// pub struct NoTablePrefix;
///
/// impl Rule for NoTablePrefix {
///     fn name(&self) -> &'static str { "no-table-prefix" }
///     fn code(&self) -> &'static str { "DL900" }
///
///     fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "missing-primary-key").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL002").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks one class and returns its diagnostics in a stable order.
    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic>;

    /// Creates a diagnostic stamped with this rule's code, name and severity.
    fn diagnostic(&self, message: String) -> Diagnostic {
        Diagnostic::new(self.code(), self.name(), self.default_severity(), message)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
