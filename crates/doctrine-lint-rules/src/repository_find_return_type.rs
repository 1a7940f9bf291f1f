//! Rule requiring return types on repository finder methods.
//!
//! `find*` methods on a Doctrine repository feed entities into typed code;
//! an undeclared return type hides whether they return one entity, a list
//! or `null`.

use doctrine_lint_core::{
    ClassDeclaration, ClassKind, Diagnostic, MethodSignature, Rule, Suggestion, Visibility,
};

/// Rule code for repository-find-return-type.
pub const CODE: &str = "DL020";

/// Rule name for repository-find-return-type.
pub const NAME: &str = "repository-find-return-type";

/// Requires declared return types on public `find*` repository methods.
#[derive(Debug, Clone, Default)]
pub struct RepositoryFindReturnType;

impl RepositoryFindReturnType {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RepositoryFindReturnType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Public find* methods of repositories must declare a return type"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        if class.kind != ClassKind::Repository {
            return Vec::new();
        }

        let offending: Vec<&MethodSignature> = class
            .methods
            .iter()
            .filter(|m| m.visibility == Visibility::Public)
            .filter(|m| m.name.starts_with("find") && m.return_type.is_none())
            .collect();
        let Some(first) = offending.first() else {
            return Vec::new();
        };

        let names: Vec<String> = offending.iter().map(|m| format!("{}()", m.name)).collect();
        vec![self
            .diagnostic(format!(
                "Repository methods without a return type: {}",
                names.join(", ")
            ))
            .at_line(first.line)
            .with_suggestion(Suggestion::new(
                "Declare `: ?Entity`, `: array` or another concrete return type",
            ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_php(&RepositoryFindReturnType::new(), code)
    }

    #[test]
    fn test_detects_untyped_finders() {
        let diagnostics = check_code(
            r"<?php
namespace App\Repository;

class UserRepository extends ServiceEntityRepository
{
    public function findActive()
    {
        return [];
    }

    public function findOneByEmail(string $email): ?User
    {
        return null;
    }

    private function findInternal() {}

    public function countActive() {}

    public function findByRole($role) {}
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        insta::assert_snapshot!(
            diagnostics[0].message,
            @"Repository methods without a return type: findActive(), findByRole()"
        );
        assert_eq!(diagnostics[0].line, Some(6));
    }

    #[test]
    fn test_ignores_non_repository() {
        let diagnostics = check_code(
            "<?php\nclass UserFinder extends ServiceEntityRepository {\npublic function findAll() {}\n}\n",
        );
        assert!(diagnostics.is_empty());
    }
}
