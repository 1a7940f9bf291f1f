//! Output formatting for `check` results.

use anyhow::Result;
use doctrine_lint_core::LintResult;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    print!("{}", render(result, format)?);
    Ok(())
}

fn render(result: &LintResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => result.failing().map(|r| r.render_compact()).collect(),
    })
}

fn render_text(result: &LintResult) -> String {
    let mut output = String::new();
    for report in result.failing() {
        output.push_str(&report.render_text());
        output.push('\n');
    }

    let failing = result.failing().count();
    let color = if failing > 0 { "\x1b[31m" } else { "\x1b[32m" };
    output.push_str(&format!(
        "{color}Found {} issue(s) in {failing} of {} file(s)\x1b[0m\n",
        result.diagnostic_count(),
        result.files_checked
    ));
    output
}
