//! Rule comparing a property's declared PHP type with its column type.
//!
//! # Detected Patterns
//!
//! - `#[Column(type: 'integer')] private string $count`
//! - `#[Column(type: 'datetime_immutable')] private \DateTime $at`
//!
//! Untyped and `mixed` properties, column types outside the compatibility
//! table and `custom_types` are skipped. A union type passes when any
//! member is compatible.

use crate::util::column_type;
use doctrine_lint_core::mapping::compatible_php_types;
use doctrine_lint_core::{ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for type-mismatch.
pub const CODE: &str = "DL009";

/// Rule name for type-mismatch.
pub const NAME: &str = "type-mismatch";

/// Checks declared property types against mapped column types.
#[derive(Debug, Clone, Default)]
pub struct TypeMismatch {
    /// Application-defined types, never checked.
    pub custom_types: Vec<String>,
}

impl TypeMismatch {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips additional application-defined type names.
    #[must_use]
    pub fn with_custom_types(mut self, types: impl IntoIterator<Item = String>) -> Self {
        self.custom_types.extend(types);
        self
    }
}

impl Rule for TypeMismatch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Declared PHP types must be compatible with the mapped Doctrine type"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for prop in &class.properties {
            let Some((_, column)) = column_type(prop) else {
                continue;
            };
            if self.custom_types.contains(&column) {
                continue;
            }
            let Some(allowed) = compatible_php_types(&column) else {
                continue;
            };
            let Some(declared) = &prop.ty else {
                continue;
            };

            let members = declared.short_names();
            if members.is_empty() || members.iter().any(|m| m == "mixed") {
                continue;
            }
            if members.iter().any(|m| allowed.contains(&m.as_str())) {
                continue;
            }

            diagnostics.push(
                self.diagnostic(format!(
                    "PHP type '{}' of ${} does not match Doctrine type '{column}'",
                    declared.name(),
                    prop.name
                ))
                .at_line(prop.line)
                .with_subject(&prop.name)
                .with_suggestion(Suggestion::new(format!(
                    "Declare the property as {}",
                    allowed.join(" or ")
                ))),
            );
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_php(&TypeMismatch::new(), code)
    }

    #[test]
    fn test_detects_each_mismatch() {
        let diagnostics = check_code(
            r"<?php
class Event
{
    #[ORM\Column(type: 'integer')]
    private string $attendees;

    #[ORM\Column(type: Types::DATETIME_IMMUTABLE)]
    private \DateTime $startsAt;

    #[ORM\Column(type: 'boolean')]
    private bool $public;
}
",
        );
        assert_eq!(diagnostics.len(), 2);
        insta::assert_snapshot!(
            diagnostics[0].message,
            @"PHP type 'string' of $attendees does not match Doctrine type 'integer'"
        );
        assert!(diagnostics[1].message.contains("Doctrine type 'datetime_immutable'"));
        assert_eq!(diagnostics[1].subject.as_deref(), Some("startsAt"));
    }

    #[test]
    fn test_accepts_compatible_shapes() {
        let diagnostics = check_code(
            r"<?php
class Event
{
    #[ORM\Column(type: 'bigint')]
    private ?string $views = null;

    #[ORM\Column(type: 'datetime_immutable')]
    private ?\DateTimeInterface $endsAt = null;

    #[ORM\Column(type: 'decimal', precision: 10, scale: 2)]
    private string|null $price = null;

    #[ORM\Column(type: 'json')]
    private array $tags = [];

    #[ORM\Column(type: 'integer')]
    private int|string $legacyId;

    #[ORM\Column(type: 'integer')]
    private mixed $anything;

    #[ORM\Column(type: 'uuid')]
    private Uuid $uuid;
}
",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
    }

    #[test]
    fn test_custom_types_are_skipped() {
        let rule = TypeMismatch::new().with_custom_types(["integer".to_string()]);
        let diagnostics = check_php(
            &rule,
            "<?php\nclass A {\n#[ORM\\Column(type: 'integer')]\nprivate string $n;\n}\n",
        );
        assert!(diagnostics.is_empty());
    }
}
