//! Rule requiring collection properties to be initialised in the constructor.
//!
//! # Rationale
//!
//! Doctrine only injects a `PersistentCollection` into entities it loads. A
//! freshly constructed entity keeps whatever the constructor assigned, so an
//! unassigned `Collection` property is uninitialised until the first flush.
//!
//! Any `$this->prop = ...` assignment in the constructor body counts; the
//! assigned value is not inspected. Promoted properties are initialised by
//! definition.

use crate::util::property_list;
use doctrine_lint_core::{ClassDeclaration, Diagnostic, Property, Rule, Suggestion};

/// Rule code for uninitialized-collection.
pub const CODE: &str = "DL018";

/// Rule name for uninitialized-collection.
pub const NAME: &str = "uninitialized-collection";

/// Requires constructor assignment of `Collection` properties.
#[derive(Debug, Clone, Default)]
pub struct UninitializedCollection;

impl UninitializedCollection {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UninitializedCollection {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Collection properties must be initialized in the constructor"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        let body = class
            .constructor()
            .and_then(|c| c.body.as_deref())
            .unwrap_or_default();

        let offending: Vec<&Property> = class
            .properties
            .iter()
            .filter(|p| !p.promoted && !p.is_static)
            .filter(|p| p.ty.as_ref().is_some_and(|t| t.is_collection()))
            .filter(|p| !assigns_property(body, &p.name))
            .collect();
        let Some(first) = offending.first() else {
            return Vec::new();
        };

        vec![self
            .diagnostic(format!(
                "Collection properties not initialized in the constructor: {}",
                property_list(offending.iter().copied())
            ))
            .at_line(first.line)
            .with_suggestion(Suggestion::new(
                "Assign `$this->prop = new ArrayCollection();` in __construct()",
            ))]
    }
}

/// Whether `body` contains `$this->name = ...` or `??=` (not `==`).
fn assigns_property(body: &str, name: &str) -> bool {
    body.match_indices("$this").any(|(start, matched)| {
        let rest = body[start + matched.len()..].trim_start();
        let Some(rest) = rest.strip_prefix("->") else {
            return false;
        };
        let Some(rest) = rest.trim_start().strip_prefix(name) else {
            return false;
        };
        if rest.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            return false;
        }
        let rest = rest.trim_start();
        rest.starts_with("??=") || (rest.starts_with('=') && !rest.starts_with("=="))
    })
}
