//! Rule forbidding associations inside embeddables.

use crate::util::property_list;
use doctrine_lint_core::{ClassDeclaration, ClassKind, Diagnostic, Property, Rule, Suggestion};

/// Rule code for embeddable-association.
pub const CODE: &str = "DL014";

/// Rule name for embeddable-association.
pub const NAME: &str = "embeddable-association";

/// Embeddables may only map columns.
#[derive(Debug, Clone, Default)]
pub struct EmbeddableAssociation;

impl EmbeddableAssociation {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EmbeddableAssociation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Embeddables cannot contain associations"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        if class.kind != ClassKind::Embeddable {
            return Vec::new();
        }

        let offending: Vec<&Property> = class.associations().map(|(p, _)| p).collect();
        let Some(first) = offending.first() else {
            return Vec::new();
        };

        vec![self
            .diagnostic(format!(
                "Embeddable {} cannot contain associations: {}",
                class.name,
                property_list(offending.iter().copied())
            ))
            .at_line(first.line)
            .with_suggestion(Suggestion::new(
                "Move the association to the entity that embeds this class",
            ))]
    }
}
