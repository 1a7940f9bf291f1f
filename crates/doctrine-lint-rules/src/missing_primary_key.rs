//! Rule requiring entities to declare an identifier.
//!
//! Doctrine refuses to build metadata for an entity without `#[Id]`.
//! Embeddables and mapped superclasses are exempt.

use doctrine_lint_core::{ClassDeclaration, ClassKind, Diagnostic, Rule, Suggestion};

/// Rule code for missing-primary-key.
pub const CODE: &str = "DL002";

/// Rule name for missing-primary-key.
pub const NAME: &str = "missing-primary-key";

/// Requires at least one `#[Id]` property on an entity.
#[derive(Debug, Clone, Default)]
pub struct MissingPrimaryKey;

impl MissingPrimaryKey {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MissingPrimaryKey {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Entities must mark a primary key property with #[Id]"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        if class.kind != ClassKind::Entity || class.any_property_has("Id") {
            return Vec::new();
        }

        vec![self
            .diagnostic(format!(
                "Missing #[Id]: entity {} has no primary key property",
                class.name
            ))
            .with_suggestion(Suggestion::new(
                "Add #[ORM\\Id] and #[ORM\\GeneratedValue] to the identifier property",
            ))]
    }
}
