//! Hook mode: validate the one file an editor or agent just wrote.
//!
//! The host sends `{"tool_input": {"file_path": "..."}, "cwd": "..."}` on
//! stdin. Diagnostics go to stderr and the exit status is 0 or 2; stdout
//! stays empty.

use doctrine_lint_core::{Config, Outcome};
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::Options;
use crate::config_resolver;

/// The JSON envelope read from stdin.
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    /// Arguments of the tool call that touched the file.
    #[serde(default)]
    pub tool_input: ToolInput,
    /// Working directory of the host.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

/// The part of the envelope naming the file.
#[derive(Debug, Default, Deserialize)]
pub struct ToolInput {
    /// Path of the written file.
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

impl HookInput {
    /// Parses an envelope; `None` when it is not valid JSON of that shape.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(input) => Some(input),
            Err(e) => {
                debug!("Ignoring unparseable hook input: {e}");
                None
            }
        }
    }

    /// The file to validate, resolved against `cwd` when relative.
    #[must_use]
    pub fn target(&self) -> Option<PathBuf> {
        let path = self.tool_input.file_path.as_ref()?;
        if path.as_os_str().is_empty() {
            return None;
        }
        match &self.cwd {
            Some(cwd) if path.is_relative() => Some(cwd.join(path)),
            _ => Some(path.clone()),
        }
    }

    fn project_dir(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Runs hook mode and returns the process exit status.
pub fn run(options: &Options) -> i32 {
    let mut raw = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut raw) {
        debug!("Could not read stdin: {e}");
        return 0;
    }

    let outcome = evaluate(&raw, options);
    if let Some(report) = outcome.report() {
        eprint!("{}", report.render_text());
    }
    outcome.exit_code()
}

/// Validates the file named by a raw envelope.
///
/// Configuration problems fall back to defaults; they never block the
/// validation itself.
#[must_use]
pub fn evaluate(raw: &str, options: &Options) -> Outcome {
    let Some(input) = HookInput::parse(raw) else {
        return Outcome::NotApplicable;
    };
    let Some(target) = input.target() else {
        debug!("Hook input names no file");
        return Outcome::NotApplicable;
    };

    let source = config_resolver::resolve(&input.project_dir(), options.config.as_deref());
    let config = super::load_config(&source).unwrap_or_else(|e| {
        warn!("{e:#}; using defaults");
        Config::default()
    });

    let php = options.php.as_deref();
    let analyzer = match super::build_analyzer(config, php).or_else(|e| {
        warn!("{e:#}; using defaults");
        super::build_analyzer(Config::default(), php)
    }) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            warn!("{e:#}");
            return Outcome::NotApplicable;
        }
    };

    analyzer.validate_path(&target)
}
