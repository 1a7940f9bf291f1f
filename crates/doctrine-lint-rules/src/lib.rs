//! # doctrine-lint-rules
//!
//! Built-in Doctrine mapping rules for doctrine-lint.
//!
//! Rules run in the order of the table below and every rule runs, whatever
//! earlier rules found.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `missing-namespace` | Mapped classes must declare a namespace |
//! | DL002 | `missing-primary-key` | Entities must have an `#[Id]` property |
//! | DL003 | `orphan-generated-value` | `#[GeneratedValue]` requires `#[Id]` |
//! | DL004 | `orphan-sequence-generator` | `#[SequenceGenerator]` requires `#[GeneratedValue]` |
//! | DL005 | `mutable-public-property` | Public properties must be readonly |
//! | DL006 | `unknown-column-type` | Column types must be DBAL types |
//! | DL007 | `string-column-without-length` | String columns need `length` |
//! | DL008 | `decimal-without-precision-scale` | Decimal columns need `precision` and `scale` |
//! | DL009 | `type-mismatch` | PHP type must fit the column type |
//! | DL010 | `both-mapped-by-inversed-by` | `mappedBy` and `inversedBy` are exclusive |
//! | DL011 | `many-to-one-mapped-by` | `ManyToOne` cannot use `mappedBy` |
//! | DL012 | `one-to-many-missing-mapped-by` | `OneToMany` needs `mappedBy` |
//! | DL013 | `missing-target-entity` | Associations need `targetEntity` |
//! | DL014 | `embeddable-association` | Embeddables cannot have associations |
//! | DL015 | `join-column-without-association` | `#[JoinColumn]` needs a to-one association |
//! | DL016 | `join-table-without-many-to-many` | `#[JoinTable]` needs `ManyToMany` |
//! | DL017 | `order-by-without-to-many` | `#[OrderBy]` needs a to-many association |
//! | DL018 | `uninitialized-collection` | Collections must be set in the constructor |
//! | DL019 | `unused-lifecycle-callbacks` | `#[HasLifecycleCallbacks]` needs a callback |
//! | DL020 | `repository-find-return-type` | Repository `find*` methods need a return type |
//!
//! ## Usage
//!
//! ```ignore
//! use doctrine_lint_core::Analyzer;
//! use doctrine_lint_rules::all_rules;
//!
//! let analyzer = Analyzer::builder().rules(all_rules()).build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod both_mapped_by_inversed_by;
mod decimal_without_precision_scale;
mod embeddable_association;
mod join_column_without_association;
mod join_table_without_many_to_many;
mod many_to_one_mapped_by;
mod missing_namespace;
mod missing_primary_key;
mod missing_target_entity;
mod mutable_public_property;
mod one_to_many_missing_mapped_by;
mod order_by_without_to_many;
mod orphan_generated_value;
mod orphan_sequence_generator;
mod presets;
mod repository_find_return_type;
mod string_column_without_length;
mod type_mismatch;
mod uninitialized_collection;
mod unknown_column_type;
mod unused_lifecycle_callbacks;
mod util;

pub use both_mapped_by_inversed_by::BothMappedByInversedBy;
pub use decimal_without_precision_scale::DecimalWithoutPrecisionScale;
pub use embeddable_association::EmbeddableAssociation;
pub use join_column_without_association::JoinColumnWithoutAssociation;
pub use join_table_without_many_to_many::JoinTableWithoutManyToMany;
pub use many_to_one_mapped_by::ManyToOneMappedBy;
pub use missing_namespace::MissingNamespace;
pub use missing_primary_key::MissingPrimaryKey;
pub use missing_target_entity::MissingTargetEntity;
pub use mutable_public_property::MutablePublicProperty;
pub use one_to_many_missing_mapped_by::OneToManyMissingMappedBy;
pub use order_by_without_to_many::OrderByWithoutToMany;
pub use orphan_generated_value::OrphanGeneratedValue;
pub use orphan_sequence_generator::OrphanSequenceGenerator;
pub use presets::{all_rules, minimal_rules, rules_for, Preset};
pub use repository_find_return_type::RepositoryFindReturnType;
pub use string_column_without_length::StringColumnWithoutLength;
pub use type_mismatch::TypeMismatch;
pub use uninitialized_collection::UninitializedCollection;
pub use unknown_column_type::UnknownColumnType;
pub use unused_lifecycle_callbacks::UnusedLifecycleCallbacks;

/// Re-export core types for convenience.
pub use doctrine_lint_core::{Diagnostic, Rule, Severity};
