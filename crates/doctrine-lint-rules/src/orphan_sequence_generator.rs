//! Rule flagging `#[SequenceGenerator]` without `#[GeneratedValue]`.

use doctrine_lint_core::{ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for orphan-sequence-generator.
pub const CODE: &str = "DL004";

/// Rule name for orphan-sequence-generator.
pub const NAME: &str = "orphan-sequence-generator";

/// A sequence definition is only read for a generated identifier.
#[derive(Debug, Clone, Default)]
pub struct OrphanSequenceGenerator;

impl OrphanSequenceGenerator {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OrphanSequenceGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "#[SequenceGenerator] requires #[GeneratedValue]"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        if class.any_property_has("GeneratedValue") {
            return Vec::new();
        }
        let Some(prop) = class
            .properties
            .iter()
            .find(|p| p.has_attribute("SequenceGenerator"))
        else {
            return Vec::new();
        };

        vec![self
            .diagnostic(format!(
                "#[SequenceGenerator] on ${} has no effect without #[GeneratedValue]",
                prop.name
            ))
            .at_line(prop.line)
            .with_subject(&prop.name)
            .with_suggestion(Suggestion::new(
                "Add #[ORM\\GeneratedValue(strategy: 'SEQUENCE')]",
            ))]
    }
}
