//! Rule requiring an explicit `length` on string columns.
//!
//! Only columns that spell out `type: 'string'` (or `Types::STRING`) are
//! checked; a bare `#[Column]` on a `string` property is left alone.

use crate::util::{column_type, property_list};
use doctrine_lint_core::{ClassDeclaration, Diagnostic, Property, Rule, Suggestion};

/// Rule code for string-column-without-length.
pub const CODE: &str = "DL007";

/// Rule name for string-column-without-length.
pub const NAME: &str = "string-column-without-length";

/// Requires `length` on explicit string columns.
#[derive(Debug, Clone, Default)]
pub struct StringColumnWithoutLength;

impl StringColumnWithoutLength {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for StringColumnWithoutLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "String columns must declare a length"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        let offending: Vec<&Property> = class
            .properties
            .iter()
            .filter(|p| {
                column_type(p).is_some_and(|(column, ty)| ty == "string" && !column.has_arg("length"))
            })
            .collect();
        let Some(first) = offending.first() else {
            return Vec::new();
        };

        vec![self
            .diagnostic(format!(
                "String column without length: {}",
                property_list(offending.iter().copied())
            ))
            .at_line(first.line)
            .with_suggestion(Suggestion::new("Add `length: 255` (or the real limit) to #[ORM\\Column]"))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_php(&StringColumnWithoutLength::new(), code)
    }

    #[test]
    fn test_reports_once_for_many_columns() {
        let diagnostics = check_code(
            r"<?php
class User
{
    #[ORM\Column(type: 'string')]
    private string $email;

    #[ORM\Column(type: Types::STRING, nullable: true)]
    private ?string $nickname;

    #[ORM\Column(type: 'string', length: 64)]
    private string $token;
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        insta::assert_snapshot!(
            diagnostics[0].message,
            @"String column without length: $email, $nickname"
        );
    }

    #[test]
    fn test_positional_length_counts() {
        let diagnostics = check_code(
            "<?php\nclass User {\n#[ORM\\Column('email', 'string', 180)]\nprivate string $email;\n}\n",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_implicit_string_is_ignored() {
        let diagnostics = check_code("<?php\nclass User {\n#[ORM\\Column]\nprivate string $email;\n}\n");
        assert!(diagnostics.is_empty());
    }
}
