//! Rule flagging `#[JoinColumn]` where there is nothing to join.
//!
//! Join columns belong to the owning side of a `OneToOne` or `ManyToOne`.
//! A `ManyToMany` configures its columns inside `#[JoinTable]` instead.

use doctrine_lint_core::{ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for join-column-without-association.
pub const CODE: &str = "DL015";

/// Rule name for join-column-without-association.
pub const NAME: &str = "join-column-without-association";

/// Requires a to-one association next to `#[JoinColumn]`.
#[derive(Debug, Clone, Default)]
pub struct JoinColumnWithoutAssociation;

impl JoinColumnWithoutAssociation {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for JoinColumnWithoutAssociation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "#[JoinColumn] requires a OneToOne or ManyToOne association"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        class
            .properties
            .iter()
            .filter(|p| p.has_attribute("JoinColumn"))
            .filter(|p| {
                !p.association
                    .as_ref()
                    .is_some_and(|a| a.kind.is_to_one())
            })
            .map(|p| {
                self.diagnostic(format!(
                    "${}: #[JoinColumn] without a OneToOne or ManyToOne association",
                    p.name
                ))
                .at_line(p.line)
                .with_subject(&p.name)
                .with_suggestion(Suggestion::new(
                    "Add the association attribute, or remove #[JoinColumn]",
                ))
            })
            .collect()
    }
}
