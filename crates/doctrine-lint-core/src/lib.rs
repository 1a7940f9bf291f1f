//! # doctrine-lint-core
//!
//! Core framework for validating Doctrine ORM mappings declared with PHP 8
//! attributes, without running PHP beyond a syntax check.
//!
//! This crate provides:
//!
//! - [`extract`] to turn PHP source into a [`ClassDeclaration`]
//! - [`Rule`] trait for checks over that model
//! - [`Analyzer`] for the load, classify, gate and evaluate pipeline
//! - [`Diagnostic`] and [`FileReport`] for findings and their rendering
//!
//! ## Example
//!
//! ```ignore
//! use doctrine_lint_core::{Analyzer, Outcome};
//!
//! let analyzer = Analyzer::builder()
//!     .rules(doctrine_lint_rules::all_rules())
//!     .build()?;
//!
//! if let Outcome::Checked(report) = analyzer.validate_path("src/Entity/User.php".as_ref()) {
//!     eprint!("{}", report.render_text());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod classifier;
mod config;
mod context;
mod extractor;
mod model;
mod rule;
mod syntax;
mod types;

/// Doctrine mapping vocabulary shared by the rules.
pub mod mapping;
/// Comment-aware scanning helpers.
pub mod scanner;

pub use analyzer::{
    Analyzer, AnalyzerBuilder, AnalyzerError, Outcome, SYNTAX_ERROR_CODE, SYNTAX_ERROR_RULE,
};
pub use classifier::{classify, is_in_scope, ScopeMatch};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::{has_extension, SourceUnit};
pub use extractor::{extract, parse_attribute_group};
pub use model::{
    Association, AssociationKind, AttrValue, AttributeUsage, ClassDeclaration, ClassKind,
    DeclaredType, MethodSignature, Property, Visibility,
};
pub use rule::{Rule, RuleBox};
pub use syntax::{GateError, PhpLint, SyntaxChecker, SyntaxVerdict};
pub use types::{Diagnostic, FileReport, LintResult, Severity, Suggestion};
