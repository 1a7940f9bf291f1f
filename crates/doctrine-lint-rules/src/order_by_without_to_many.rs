//! Rule flagging `#[OrderBy]` on anything but a collection association.

use doctrine_lint_core::{ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for order-by-without-to-many.
pub const CODE: &str = "DL017";

/// Rule name for order-by-without-to-many.
pub const NAME: &str = "order-by-without-to-many";

/// Requires a `OneToMany` or `ManyToMany` next to `#[OrderBy]`.
#[derive(Debug, Clone, Default)]
pub struct OrderByWithoutToMany;

impl OrderByWithoutToMany {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OrderByWithoutToMany {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "#[OrderBy] requires a OneToMany or ManyToMany association"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        class
            .properties
            .iter()
            .filter(|p| p.has_attribute("OrderBy"))
            .filter(|p| !p.association.as_ref().is_some_and(|a| a.kind.is_to_many()))
            .map(|p| {
                self.diagnostic(format!(
                    "${}: #[OrderBy] without a OneToMany or ManyToMany association",
                    p.name
                ))
                .at_line(p.line)
                .with_subject(&p.name)
                .with_suggestion(Suggestion::new(
                    "Remove #[OrderBy]; only collections have an order",
                ))
            })
            .collect()
    }
}
