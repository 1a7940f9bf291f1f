//! Rule flagging `#[HasLifecycleCallbacks]` with nothing to call.

use doctrine_lint_core::mapping::LIFECYCLE_EVENTS;
use doctrine_lint_core::{AttributeUsage, ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for unused-lifecycle-callbacks.
pub const CODE: &str = "DL019";

/// Rule name for unused-lifecycle-callbacks.
pub const NAME: &str = "unused-lifecycle-callbacks";

/// Requires at least one lifecycle event marker when the class opts in.
#[derive(Debug, Clone, Default)]
pub struct UnusedLifecycleCallbacks;

impl UnusedLifecycleCallbacks {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_lifecycle_event(attr: &AttributeUsage) -> bool {
    LIFECYCLE_EVENTS.contains(&attr.short_name())
}

impl Rule for UnusedLifecycleCallbacks {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "#[HasLifecycleCallbacks] requires a lifecycle callback method"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        if !class.has_attribute("HasLifecycleCallbacks") {
            return Vec::new();
        }

        let has_callback = class
            .methods
            .iter()
            .flat_map(|m| &m.attributes)
            .chain(class.properties.iter().flat_map(|p| &p.attributes))
            .any(is_lifecycle_event);
        if has_callback {
            return Vec::new();
        }

        vec![self
            .diagnostic(format!(
                "#[HasLifecycleCallbacks] on {} but no lifecycle callback is declared",
                class.name
            ))
            .with_suggestion(Suggestion::new(
                "Add e.g. #[ORM\\PrePersist] to a method, or remove #[ORM\\HasLifecycleCallbacks]",
            ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_php(&UnusedLifecycleCallbacks::new(), code)
    }

    #[test]
    fn test_detects_marker_without_callbacks() {
        let diagnostics = check_code(
            r"<?php
#[ORM\Entity]
#[ORM\HasLifecycleCallbacks]
class Page
{
    public function touch(): void {}
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("HasLifecycleCallbacks"));
        assert!(diagnostics[0].message.contains("no lifecycle callback"));
    }

    #[test]
    fn test_allows_any_event() {
        for event in LIFECYCLE_EVENTS {
            let code = format!(
                "<?php\n#[ORM\\HasLifecycleCallbacks]\nclass Page {{\n#[ORM\\{event}]\npublic function hook(): void {{}}\n}}\n"
            );
            assert!(check_code(&code).is_empty(), "{event}");
        }
    }

    #[test]
    fn test_ignores_classes_without_marker() {
        assert!(check_code("<?php\n#[ORM\\Entity]\nclass Page {}\n").is_empty());
    }
}
