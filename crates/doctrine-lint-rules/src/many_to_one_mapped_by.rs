//! Rule flagging `mappedBy` on a `ManyToOne`.
//!
//! A `ManyToOne` is always the owning side; it can only take `inversedBy`.

use doctrine_lint_core::{AssociationKind, ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for many-to-one-mapped-by.
pub const CODE: &str = "DL011";

/// Rule name for many-to-one-mapped-by.
pub const NAME: &str = "many-to-one-mapped-by";

/// Forbids `mappedBy` on `ManyToOne` associations.
#[derive(Debug, Clone, Default)]
pub struct ManyToOneMappedBy;

impl ManyToOneMappedBy {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ManyToOneMappedBy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "ManyToOne is the owning side and cannot use mappedBy"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        class
            .associations()
            // Both keys present is reported by both-mapped-by-inversed-by.
            .filter(|(_, assoc)| {
                assoc.kind == AssociationKind::ManyToOne
                    && assoc.mapped_by.is_some()
                    && assoc.inversed_by.is_none()
            })
            .map(|(prop, _)| {
                self.diagnostic(format!(
                    "${}: ManyToOne cannot use mappedBy; it is always the owning side",
                    prop.name
                ))
                .at_line(prop.line)
                .with_subject(&prop.name)
                .with_suggestion(Suggestion::new("Replace mappedBy with inversedBy"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_php(&ManyToOneMappedBy::new(), code)
    }

    #[test]
    fn test_detects_mapped_by() {
        let diagnostics = check_code(
            r"<?php
class Comment
{
    #[ORM\ManyToOne(targetEntity: Post::class, mappedBy: 'comments')]
    private Post $post;
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("ManyToOne"));
        assert!(diagnostics[0].message.contains("mappedBy"));
        assert_eq!(diagnostics[0].line, Some(5));
    }

    #[test]
    fn test_defers_to_both_keys_rule() {
        let diagnostics = check_code(
            r"<?php
class Comment
{
    #[ORM\ManyToOne(targetEntity: Post::class, mappedBy: 'comments', inversedBy: 'comments')]
    private Post $post;
}
",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_allows_inversed_by() {
        let diagnostics = check_code(
            "<?php\nclass Comment {\n#[ORM\\ManyToOne(Post::class, inversedBy: 'comments')]\nprivate Post $post;\n}\n",
        );
        assert!(diagnostics.is_empty());
    }
}
