//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# doctrine-lint configuration

# Rule preset: "recommended" (all rules) or "minimal"
# preset = "recommended"

[analyzer]
# File extensions that are validated
extensions = ["php"]

# Glob patterns to exclude from validation
exclude = [
    "**/vendor/**",
    "**/var/cache/**",
]

# Directory names that mark a file as an entity
entity_dirs = ["Entity"]

# PHP binary used for the syntax check
php_binary = "php"

# Rule configurations
# Each rule can be disabled with `enabled = false`

# [rules.mutable-public-property]
# enabled = false

# [rules.unknown-column-type]
# Custom DBAL types registered in your project
# custom_types = ["money", "uuid"]
"#;

const CONFIG_FILE: &str = "doctrine-lint.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: doctrine-lint check src/Entity");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}
