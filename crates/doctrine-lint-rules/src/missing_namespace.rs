//! Rule requiring a `namespace` declaration.
//!
//! # Rationale
//!
//! Doctrine resolves `targetEntity` and repository classes by fully
//! qualified name, and Composer autoloading maps namespaces to directories.
//! A mapped class in the global namespace is almost always a mistake.

use doctrine_lint_core::{ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for missing-namespace.
pub const CODE: &str = "DL001";

/// Rule name for missing-namespace.
pub const NAME: &str = "missing-namespace";

/// Requires the file to declare a namespace.
#[derive(Debug, Clone, Default)]
pub struct MissingNamespace;

impl MissingNamespace {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MissingNamespace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Mapped classes must declare a namespace"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        if !class.is_located() || class.namespace.is_some() {
            return Vec::new();
        }

        vec![self
            .diagnostic(format!("Missing namespace declaration for class {}", class.name))
            .with_suggestion(Suggestion::new(
                "Add a namespace such as `namespace App\\Entity;` after `<?php`",
            ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_php(&MissingNamespace::new(), code)
    }

    #[test]
    fn test_detects_missing_namespace() {
        let diagnostics = check_code("<?php\n#[ORM\\Entity]\nclass User {}\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, CODE);
        assert!(diagnostics[0].message.contains("Missing namespace"));
    }

    #[test]
    fn test_allows_namespaced_class() {
        let diagnostics = check_code("<?php\nnamespace App\\Entity;\nclass User {}\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_ignores_file_without_class() {
        assert!(check_code("<?php\nfunction helper() {}\n").is_empty());
    }
}
