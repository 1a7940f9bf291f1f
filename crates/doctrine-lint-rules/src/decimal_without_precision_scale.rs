//! Rule requiring `precision` and `scale` on decimal columns.

use crate::util::{column_type, property_list};
use doctrine_lint_core::{ClassDeclaration, Diagnostic, Property, Rule, Suggestion};

/// Rule code for decimal-without-precision-scale.
pub const CODE: &str = "DL008";

/// Rule name for decimal-without-precision-scale.
pub const NAME: &str = "decimal-without-precision-scale";

/// Requires both `precision` and `scale` on decimal columns.
#[derive(Debug, Clone, Default)]
pub struct DecimalWithoutPrecisionScale;

impl DecimalWithoutPrecisionScale {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DecimalWithoutPrecisionScale {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Decimal columns must declare precision and scale"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        let offending: Vec<&Property> = class
            .properties
            .iter()
            .filter(|p| {
                column_type(p).is_some_and(|(column, ty)| {
                    ty == "decimal" && !(column.has_arg("precision") && column.has_arg("scale"))
                })
            })
            .collect();
        let Some(first) = offending.first() else {
            return Vec::new();
        };

        vec![self
            .diagnostic(format!(
                "Decimal column without precision and scale: {}",
                property_list(offending.iter().copied())
            ))
            .at_line(first.line)
            .with_suggestion(Suggestion::new("Add e.g. `precision: 10, scale: 2` to #[ORM\\Column]"))]
    }
}
