//! Rule flagging `#[GeneratedValue]` in a class with no identifier.

use crate::util::property_list;
use doctrine_lint_core::{ClassDeclaration, Diagnostic, Property, Rule, Suggestion};

/// Rule code for orphan-generated-value.
pub const CODE: &str = "DL003";

/// Rule name for orphan-generated-value.
pub const NAME: &str = "orphan-generated-value";

/// `#[GeneratedValue]` only applies to `#[Id]` properties.
#[derive(Debug, Clone, Default)]
pub struct OrphanGeneratedValue;

impl OrphanGeneratedValue {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OrphanGeneratedValue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "#[GeneratedValue] requires an #[Id] property"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        if class.any_property_has("Id") {
            return Vec::new();
        }

        let generated: Vec<&Property> = class
            .properties
            .iter()
            .filter(|p| p.has_attribute("GeneratedValue"))
            .collect();
        let Some(first) = generated.first() else {
            return Vec::new();
        };

        vec![self
            .diagnostic(format!(
                "#[GeneratedValue] on {} but no #[Id] property in {}",
                property_list(generated.iter().copied()),
                class.name
            ))
            .at_line(first.line)
            .with_suggestion(Suggestion::new(
                "Add #[ORM\\Id] next to #[ORM\\GeneratedValue]",
            ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_php(&OrphanGeneratedValue::new(), code)
    }

    #[test]
    fn test_detects_generated_value_without_id() {
        let diagnostics = check_code(
            r"<?php
#[ORM\Entity]
class Order
{
    #[ORM\GeneratedValue]
    #[ORM\Column]
    private ?int $id = null;
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("GeneratedValue"));
        assert!(diagnostics[0].message.contains("no #[Id]"));
        assert_eq!(diagnostics[0].line, Some(7));
    }

    #[test]
    fn test_allows_generated_id() {
        let diagnostics = check_code(
            r"<?php
#[ORM\Entity]
class Order
{
    #[ORM\Id, ORM\GeneratedValue, ORM\Column]
    private ?int $id = null;
}
",
        );
        assert!(diagnostics.is_empty());
    }
}
