//! Rule flagging `#[Column(type: ...)]` values that are not DBAL types.
//!
//! Types registered by the application (`Type::addType`) can be declared
//! through the `custom_types` option:
//!
//! ```toml
//! [rules.unknown-column-type]
//! custom_types = ["money", "point"]
//! ```

use crate::util::column_type;
use doctrine_lint_core::mapping::KNOWN_COLUMN_TYPES;
use doctrine_lint_core::{ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for unknown-column-type.
pub const CODE: &str = "DL006";

/// Rule name for unknown-column-type.
pub const NAME: &str = "unknown-column-type";

/// Requires column types to be known DBAL types.
#[derive(Debug, Clone, Default)]
pub struct UnknownColumnType {
    /// Extra type names accepted as known.
    pub custom_types: Vec<String>,
}

impl UnknownColumnType {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts additional application-defined type names.
    #[must_use]
    pub fn with_custom_types(mut self, types: impl IntoIterator<Item = String>) -> Self {
        self.custom_types.extend(types);
        self
    }

    fn is_known(&self, ty: &str) -> bool {
        KNOWN_COLUMN_TYPES.contains(&ty) || self.custom_types.iter().any(|t| t == ty)
    }
}

impl Rule for UnknownColumnType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Column types must be registered DBAL types"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        let unknown: Vec<(usize, String)> = class
            .properties
            .iter()
            .filter_map(|p| {
                let (_, ty) = column_type(p)?;
                (!self.is_known(&ty)).then(|| (p.line, format!("'{ty}' on ${}", p.name)))
            })
            .collect();
        let Some((line, _)) = unknown.first() else {
            return Vec::new();
        };

        let listed: Vec<&str> = unknown.iter().map(|(_, s)| s.as_str()).collect();
        vec![self
            .diagnostic(format!("Unknown column type {}", listed.join(", ")))
            .at_line(*line)
            .with_suggestion(Suggestion::new(
                "Use a Types::* constant, or list the custom type under [rules.unknown-column-type] custom_types",
            ))]
    }
}
