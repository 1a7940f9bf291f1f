//! Rule requiring `mappedBy` on `OneToMany`.
//!
//! Doctrine only supports bidirectional `OneToMany`: the foreign key lives
//! on the `ManyToOne` side, which this side must point at.

use doctrine_lint_core::{AssociationKind, ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for one-to-many-missing-mapped-by.
pub const CODE: &str = "DL012";

/// Rule name for one-to-many-missing-mapped-by.
pub const NAME: &str = "one-to-many-missing-mapped-by";

/// Requires `mappedBy` on `OneToMany` associations.
#[derive(Debug, Clone, Default)]
pub struct OneToManyMissingMappedBy;

impl OneToManyMissingMappedBy {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OneToManyMissingMappedBy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "OneToMany associations must declare mappedBy"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        class
            .associations()
            .filter(|(_, assoc)| {
                assoc.kind == AssociationKind::OneToMany && assoc.mapped_by.is_none()
            })
            .map(|(prop, _)| {
                self.diagnostic(format!(
                    "${}: OneToMany requires mappedBy naming the ManyToOne property on the target",
                    prop.name
                ))
                .at_line(prop.line)
                .with_subject(&prop.name)
                .with_suggestion(Suggestion::new(
                    "Add mappedBy, or use ManyToMany with a unique JoinTable for a unidirectional link",
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_php(&OneToManyMissingMappedBy::new(), code)
    }

    #[test]
    fn test_detects_missing_mapped_by() {
        let diagnostics = check_code(
            r"<?php
class Category
{
    #[ORM\OneToMany(targetEntity: Product::class)]
    private Collection $products;
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("OneToMany"));
        assert!(diagnostics[0].message.contains("mappedBy"));
    }

    #[test]
    fn test_positional_mapped_by_counts() {
        let diagnostics = check_code(
            "<?php\nclass Category {\n#[ORM\\OneToMany('category', Product::class)]\nprivate Collection $products;\n}\n",
        );
        assert!(diagnostics.is_empty());
    }
}
