//! Rule flagging `#[JoinTable]` outside a `ManyToMany`.

use doctrine_lint_core::{AssociationKind, ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for join-table-without-many-to-many.
pub const CODE: &str = "DL016";

/// Rule name for join-table-without-many-to-many.
pub const NAME: &str = "join-table-without-many-to-many";

/// Requires a `ManyToMany` association next to `#[JoinTable]`.
#[derive(Debug, Clone, Default)]
pub struct JoinTableWithoutManyToMany;

impl JoinTableWithoutManyToMany {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for JoinTableWithoutManyToMany {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "#[JoinTable] requires a ManyToMany association"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        class
            .properties
            .iter()
            .filter(|p| p.has_attribute("JoinTable"))
            .filter(|p| {
                p.association.as_ref().map(|a| a.kind) != Some(AssociationKind::ManyToMany)
            })
            .map(|p| {
                self.diagnostic(format!(
                    "${}: #[JoinTable] is only valid on a ManyToMany association",
                    p.name
                ))
                .at_line(p.line)
                .with_subject(&p.name)
                .with_suggestion(Suggestion::new(
                    "Use #[JoinColumn] for to-one associations",
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::check_php;

    #[test]
    fn test_detects_join_table_on_many_to_one() {
        let diagnostics = check_php(
            &JoinTableWithoutManyToMany::new(),
            r"<?php
class Article
{
    #[ORM\ManyToOne(targetEntity: Author::class)]
    #[ORM\JoinTable(name: 'article_author')]
    private Author $author;

    #[ORM\ManyToMany(targetEntity: Tag::class)]
    #[ORM\JoinTable(
        name: 'article_tags',
        joinColumns: [new ORM\JoinColumn(name: 'article_id', referencedColumnName: 'id')],
    )]
    private Collection $tags;
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("JoinTable"));
        assert!(diagnostics[0].message.contains("ManyToMany"));
        assert_eq!(diagnostics[0].subject.as_deref(), Some("author"));
    }
}
