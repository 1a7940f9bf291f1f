//! CLI command implementations.

pub mod check;
pub mod hook;
pub mod init;
pub mod list_rules;
pub mod output;

use anyhow::{Context, Result};
use doctrine_lint_core::{Analyzer, Config};
use doctrine_lint_rules::rules_for;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;

/// Flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Explicit `--config` path.
    pub config: Option<PathBuf>,
    /// `--php` override for the syntax gate binary.
    pub php: Option<PathBuf>,
}

/// Loads the configuration a resolver picked.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Builds an analyzer running the rules `config` selects.
pub fn build_analyzer(mut config: Config, php: Option<&Path>) -> Result<Analyzer> {
    if let Some(php) = php {
        config.analyzer.php_binary = php.to_path_buf();
    }
    let rules = rules_for(&config);
    Analyzer::builder()
        .rules(rules)
        .config(config)
        .build()
        .context("Failed to build analyzer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_loads_defaults() {
        let config = load_config(&ConfigSource::Default).unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let source = ConfigSource::Explicit(PathBuf::from("/nonexistent/doctrine-lint.toml"));
        let err = load_config(&source).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn php_override_reaches_analyzer_config() {
        let analyzer = build_analyzer(Config::default(), Some(Path::new("/opt/php/bin/php"))).unwrap();
        assert_eq!(
            analyzer.config().analyzer.php_binary,
            PathBuf::from("/opt/php/bin/php")
        );
        assert_eq!(analyzer.rule_count(), 20);
    }

    #[test]
    fn invalid_exclude_pattern_fails_build() {
        let config = Config::parse("[analyzer]\nexclude = [\"[\"]\n").unwrap();
        assert!(build_analyzer(config, None).is_err());
    }
}
