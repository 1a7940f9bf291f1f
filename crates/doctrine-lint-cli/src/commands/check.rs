//! Check command implementation.

use anyhow::{Context, Result};
use doctrine_lint_core::{has_extension, Analyzer, LintResult, Outcome};
use std::path::{Path, PathBuf};

use super::Options;
use crate::config_resolver;
use crate::OutputFormat;

/// Runs the check command and returns the process exit status.
pub fn run(
    paths: &[PathBuf],
    format: OutputFormat,
    exclude: Vec<String>,
    options: &Options,
) -> Result<i32> {
    let source = config_resolver::resolve(Path::new("."), options.config.as_deref());
    let mut config = super::load_config(&source)?;
    config.analyzer.exclude.extend(exclude);

    let analyzer = super::build_analyzer(config, options.php.as_deref())?;

    let files = discover_files(paths, &analyzer.config().analyzer.extensions)?;
    tracing::info!(
        "Checking {} file(s) with {} rules",
        files.len(),
        analyzer.rule_count()
    );

    let result = check_files(&analyzer, &files);
    super::output::print(&result, format)?;

    Ok(result.exit_code())
}

/// Validates each file, keeping reports of those in scope.
pub fn check_files(analyzer: &Analyzer, files: &[PathBuf]) -> LintResult {
    let mut result = LintResult::new();
    for file in files {
        if let Outcome::Checked(report) = analyzer.validate_path(file) {
            result.push(report);
        }
    }
    result
}

/// Expands directories into the files below them, honouring `.gitignore`.
///
/// Explicit file arguments are kept whatever their extension.
fn discover_files(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(false).git_ignore(true);

        for entry in builder.build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            let path = entry.path();
            if path.is_file() && has_extension(path, extensions) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discovers_php_files_sorted() {
        let tmp = TempDir::new().unwrap();
        let entity_dir = tmp.path().join("src").join("Entity");
        std::fs::create_dir_all(&entity_dir).unwrap();
        std::fs::write(entity_dir.join("User.php"), "<?php").unwrap();
        std::fs::write(entity_dir.join("Address.php"), "<?php").unwrap();
        std::fs::write(entity_dir.join("README.md"), "").unwrap();

        let files = discover_files(&[tmp.path().to_path_buf()], &["php".to_string()]).unwrap();
        assert_eq!(
            files,
            vec![entity_dir.join("Address.php"), entity_dir.join("User.php")]
        );
    }

    #[test]
    fn explicit_file_is_kept_once() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("User.php");
        std::fs::write(&file, "<?php").unwrap();

        let files = discover_files(&[file.clone(), file.clone()], &["php".to_string()]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn out_of_scope_files_are_not_counted() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("Mailer.php");
        std::fs::write(&file, "<?php\nnamespace App\\Service;\nclass Mailer {}\n").unwrap();

        let analyzer = super::super::build_analyzer(doctrine_lint_core::Config::default(), None)
            .unwrap();
        let result = check_files(&analyzer, &[file]);
        assert_eq!(result.files_checked, 0);
        assert_eq!(result.exit_code(), 0);
    }
}
