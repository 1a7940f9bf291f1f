//! Rule registry and presets.

use crate::{
    BothMappedByInversedBy, DecimalWithoutPrecisionScale, EmbeddableAssociation,
    JoinColumnWithoutAssociation, JoinTableWithoutManyToMany, ManyToOneMappedBy,
    MissingNamespace, MissingPrimaryKey, MissingTargetEntity, MutablePublicProperty,
    OneToManyMissingMappedBy, OrderByWithoutToMany, OrphanGeneratedValue,
    OrphanSequenceGenerator, RepositoryFindReturnType, StringColumnWithoutLength, TypeMismatch,
    UninitializedCollection, UnknownColumnType, UnusedLifecycleCallbacks,
};
use doctrine_lint_core::{Config, RuleBox};
use tracing::debug;

/// Preset configurations for doctrine-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule.
    Recommended,
    /// Only mappings Doctrine itself rejects or silently ignores, for
    /// gradual adoption.
    Minimal,
}

impl Preset {
    /// Parses a preset name as written in `doctrine-lint.toml`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => all_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns every rule with default settings, in reporting order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    rules_with(&[])
}

/// Returns the minimal set of rules.
///
/// Excludes the style rules: missing-namespace, mutable-public-property,
/// string-column-without-length, uninitialized-collection and
/// repository-find-return-type.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MissingPrimaryKey::new()),
        Box::new(OrphanGeneratedValue::new()),
        Box::new(OrphanSequenceGenerator::new()),
        Box::new(UnknownColumnType::new()),
        Box::new(DecimalWithoutPrecisionScale::new()),
        Box::new(TypeMismatch::new()),
        Box::new(BothMappedByInversedBy::new()),
        Box::new(ManyToOneMappedBy::new()),
        Box::new(OneToManyMissingMappedBy::new()),
        Box::new(MissingTargetEntity::new()),
        Box::new(EmbeddableAssociation::new()),
        Box::new(JoinColumnWithoutAssociation::new()),
        Box::new(JoinTableWithoutManyToMany::new()),
        Box::new(OrderByWithoutToMany::new()),
        Box::new(UnusedLifecycleCallbacks::new()),
    ]
}

/// Returns the rules selected by `config`, with rule options applied.
///
/// The preset defaults to `recommended`. `custom_types` set on either
/// `unknown-column-type` or `type-mismatch` is honoured by both.
#[must_use]
pub fn rules_for(config: &Config) -> Vec<RuleBox> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            debug!("Unknown preset `{name}`, using recommended");
            Preset::Recommended
        }),
    };

    let mut custom_types = config.rule_str_array(crate::unknown_column_type::NAME, "custom_types");
    for ty in config.rule_str_array(crate::type_mismatch::NAME, "custom_types") {
        if !custom_types.contains(&ty) {
            custom_types.push(ty);
        }
    }

    let rules = rules_with(&custom_types);
    match preset {
        Preset::Recommended => rules,
        Preset::Minimal => {
            let keep: Vec<&'static str> = minimal_rules().iter().map(|r| r.name()).collect();
            rules.into_iter().filter(|r| keep.contains(&r.name())).collect()
        }
    }
}

fn rules_with(custom_types: &[String]) -> Vec<RuleBox> {
    vec![
        Box::new(MissingNamespace::new()),
        Box::new(MissingPrimaryKey::new()),
        Box::new(OrphanGeneratedValue::new()),
        Box::new(OrphanSequenceGenerator::new()),
        Box::new(MutablePublicProperty::new()),
        Box::new(UnknownColumnType::new().with_custom_types(custom_types.iter().cloned())),
        Box::new(StringColumnWithoutLength::new()),
        Box::new(DecimalWithoutPrecisionScale::new()),
        Box::new(TypeMismatch::new().with_custom_types(custom_types.iter().cloned())),
        Box::new(BothMappedByInversedBy::new()),
        Box::new(ManyToOneMappedBy::new()),
        Box::new(OneToManyMissingMappedBy::new()),
        Box::new(MissingTargetEntity::new()),
        Box::new(EmbeddableAssociation::new()),
        Box::new(JoinColumnWithoutAssociation::new()),
        Box::new(JoinTableWithoutManyToMany::new()),
        Box::new(OrderByWithoutToMany::new()),
        Box::new(UninitializedCollection::new()),
        Box::new(UnusedLifecycleCallbacks::new()),
        Box::new(RepositoryFindReturnType::new()),
    ]
}
