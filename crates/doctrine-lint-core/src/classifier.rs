//! Scope classification: is this file worth validating?
//!
//! Any one heuristic is enough. A miss only means the file is skipped, so
//! classification never fails.

use crate::mapping::REPOSITORY_BASES;
use crate::scanner;
use regex::Regex;
use std::path::{Component, Path};
use std::sync::LazyLock;
use tracing::debug;

#[allow(clippy::expect_used)]
static ENTITY_NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*namespace\s+[\w\\]*Entity[\w\\]*\s*[;{]").expect("namespace pattern")
});

#[allow(clippy::expect_used)]
static MAPPING_ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#\[\s*\\?(?:[A-Za-z_]\w*\\)*(?:Entity|Embeddable)\b").expect("attribute pattern")
});

#[allow(clippy::expect_used)]
static REPOSITORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+\w*Repository\s+extends\s+\\?(?:[\w\\]*\\)?(\w+)\b")
        .expect("repository pattern")
});

/// Why a file was judged in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMatch {
    /// A path segment names an entity directory.
    EntityDirectory,
    /// The namespace mentions `Entity`.
    EntityNamespace,
    /// A class-level `#[Entity]` or `#[Embeddable]`.
    MappingAttribute,
    /// A `*Repository` extending a Doctrine repository base.
    Repository,
}

/// Classifies `text` read from `path`.
///
/// Returns the first heuristic that matched, or `None` when the file is out
/// of scope.
#[must_use]
pub fn classify(path: &Path, text: &str, entity_dirs: &[String]) -> Option<ScopeMatch> {
    let in_entity_dir = path.components().any(|c| match c {
        Component::Normal(segment) => entity_dirs
            .iter()
            .any(|dir| segment.to_string_lossy() == dir.as_str()),
        _ => false,
    });
    if in_entity_dir {
        return Some(ScopeMatch::EntityDirectory);
    }

    let code = scanner::mask_comments(text);

    let matched = if ENTITY_NAMESPACE_RE.is_match(&code) {
        Some(ScopeMatch::EntityNamespace)
    } else if MAPPING_ATTRIBUTE_RE.is_match(&code) {
        Some(ScopeMatch::MappingAttribute)
    } else if REPOSITORY_RE
        .captures(&code)
        .is_some_and(|c| REPOSITORY_BASES.contains(&&c[1]))
    {
        Some(ScopeMatch::Repository)
    } else {
        None
    };

    debug!("Scope of {}: {:?}", path.display(), matched);
    matched
}

/// Whether `path` is in scope.
#[must_use]
pub fn is_in_scope(path: &Path, text: &str, entity_dirs: &[String]) -> bool {
    classify(path, text, entity_dirs).is_some()
}
