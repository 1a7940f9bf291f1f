//! Rule flagging writable public properties.
//!
//! # Rationale
//!
//! Doctrine tracks changes through the unit of work and hydrates through
//! reflection. Public writable state lets callers bypass invariants kept by
//! setters and lifecycle callbacks. `public readonly` and
//! `public private(set)` are allowed, as are static properties, which are
//! never mapped.

use crate::util::property_list;
use doctrine_lint_core::{ClassDeclaration, Diagnostic, Property, Rule, Suggestion, Visibility};

/// Rule code for mutable-public-property.
pub const CODE: &str = "DL005";

/// Rule name for mutable-public-property.
pub const NAME: &str = "mutable-public-property";

/// Forbids public properties that are not readonly.
#[derive(Debug, Clone, Default)]
pub struct MutablePublicProperty;

impl MutablePublicProperty {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MutablePublicProperty {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Public properties must be readonly"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        let offending: Vec<&Property> = class
            .properties
            .iter()
            .filter(|p| p.write_visibility == Visibility::Public && !p.readonly && !p.is_static)
            .collect();
        let Some(first) = offending.first() else {
            return Vec::new();
        };

        vec![self
            .diagnostic(format!(
                "Public properties must be readonly or private: {}",
                property_list(offending.iter().copied())
            ))
            .at_line(first.line)
            .with_suggestion(Suggestion::new(
                "Make the property private with accessors, or declare it `public readonly`",
            ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_php(&MutablePublicProperty::new(), code)
    }

    #[test]
    fn test_detects_public_properties_once() {
        let diagnostics = check_code(
            r"<?php
#[ORM\Entity]
class Product
{
    #[ORM\Column(length: 100)]
    public string $name;

    #[ORM\Column]
    public int $stock;

    var $legacy;
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        insta::assert_snapshot!(
            diagnostics[0].message,
            @"Public properties must be readonly or private: $name, $stock, $legacy"
        );
        assert_eq!(diagnostics[0].line, Some(6));
    }

    #[test]
    fn test_allows_readonly_and_static() {
        let diagnostics = check_code(
            r"<?php
#[ORM\Entity]
class Product
{
    #[ORM\Column(length: 100)]
    public readonly string $name;

    public static int $instances = 0;

    private int $stock;
}
",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_allows_restricted_write_visibility() {
        let diagnostics = check_code(
            r"<?php
#[ORM\Entity]
class Account
{
    #[ORM\Column(length: 34)]
    public private(set) string $iban;

    #[ORM\Column]
    protected(set) int $balance = 0;

    #[ORM\Column(length: 80)]
    public string $owner, $nickname;
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        insta::assert_snapshot!(
            diagnostics[0].message,
            @"Public properties must be readonly or private: $owner, $nickname"
        );
    }

    #[test]
    fn test_detects_promoted_public_property() {
        let diagnostics = check_code(
            r"<?php
#[ORM\Embeddable]
class Money
{
    public function __construct(public string $currency) {}
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("$currency"));
    }

    #[test]
    fn test_readonly_class_is_allowed() {
        let diagnostics = check_code(
            r"<?php
#[ORM\Embeddable]
final readonly class Money
{
    public function __construct(public string $currency) {}
}
",
        );
        assert!(diagnostics.is_empty());
    }
}
