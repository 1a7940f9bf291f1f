//! Rule requiring `targetEntity` on every association.
//!
//! The target is not inferred from the property type; it must be written,
//! by name or in the attribute's first target slot.

use doctrine_lint_core::{ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for missing-target-entity.
pub const CODE: &str = "DL013";

/// Rule name for missing-target-entity.
pub const NAME: &str = "missing-target-entity";

/// Requires a resolvable `targetEntity` on associations.
#[derive(Debug, Clone, Default)]
pub struct MissingTargetEntity;

impl MissingTargetEntity {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MissingTargetEntity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Associations must declare targetEntity"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        class
            .associations()
            .filter(|(_, assoc)| assoc.target_entity.is_none())
            .map(|(prop, assoc)| {
                self.diagnostic(format!("${}: {} is missing targetEntity", prop.name, assoc.kind))
                    .at_line(prop.line)
                    .with_subject(&prop.name)
                    .with_suggestion(Suggestion::new("Add `targetEntity: Target::class`"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    #[test]
    fn test_detects_missing_target() {
        let diagnostics = check_php(
            &MissingTargetEntity::new(),
            r"<?php
class Order
{
    #[ORM\ManyToOne(inversedBy: 'orders')]
    private Customer $customer;

    #[ORM\OneToMany(mappedBy: 'order', targetEntity: OrderLine::class)]
    private Collection $lines;

    #[ORM\OneToOne('App\Entity\Invoice')]
    private ?Invoice $invoice = null;

    #[ORM\ManyToMany]
    private Collection $tags;
}
",
        );
        assert_eq!(diagnostics.len(), 2);
        insta::assert_snapshot!(
            diagnostics[0].message,
            @"$customer: ManyToOne is missing targetEntity"
        );
        assert!(diagnostics[1].message.contains("ManyToMany"));
    }
}
