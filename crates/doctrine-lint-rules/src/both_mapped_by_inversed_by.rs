//! Rule flagging associations that claim both sides of a relationship.
//!
//! `mappedBy` marks the inverse side and `inversedBy` the owning side. One
//! attribute cannot be both.

use doctrine_lint_core::{ClassDeclaration, Diagnostic, Rule, Suggestion};

/// Rule code for both-mapped-by-inversed-by.
pub const CODE: &str = "DL010";

/// Rule name for both-mapped-by-inversed-by.
pub const NAME: &str = "both-mapped-by-inversed-by";

/// Forbids `mappedBy` and `inversedBy` on the same association.
#[derive(Debug, Clone, Default)]
pub struct BothMappedByInversedBy;

impl BothMappedByInversedBy {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BothMappedByInversedBy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "An association cannot declare both mappedBy and inversedBy"
    }

    fn check(&self, class: &ClassDeclaration) -> Vec<Diagnostic> {
        class
            .associations()
            .filter(|(_, assoc)| assoc.mapped_by.is_some() && assoc.inversed_by.is_some())
            .map(|(prop, assoc)| {
                self.diagnostic(format!(
                    "${}: {} declares both mappedBy and inversedBy",
                    prop.name, assoc.kind
                ))
                .at_line(prop.line)
                .with_subject(&prop.name)
                .with_suggestion(Suggestion::new(
                    "Keep inversedBy on the owning side and mappedBy on the inverse side",
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
    fn test_reports_each_property() {
        let diagnostics = check_php(
            &BothMappedByInversedBy::new(),
            r"<?php
#[ORM\Entity]
class Team
{
    #[ORM\OneToMany(targetEntity: Player::class, mappedBy: 'team', inversedBy: 'teams')]
    private Collection $players;

    #[ORM\ManyToMany(Tag::class, 'teams', 'labels')]
    private Collection $tags;

    #[ORM\ManyToOne(targetEntity: League::class, inversedBy: 'teams')]
    private League $league;
}
",
        );
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.contains("both mappedBy and inversedBy"));
        assert_eq!(diagnostics[0].subject.as_deref(), Some("players"));
        assert_eq!(diagnostics[1].subject.as_deref(), Some("tags"));
    }
}
