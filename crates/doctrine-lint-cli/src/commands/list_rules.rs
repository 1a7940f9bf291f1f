//! List rules command implementation.

use doctrine_lint_rules::{all_rules, minimal_rules};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<34} Description", "Code", "Name");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<8} {:<34} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    let minimal: Vec<&str> = minimal_rules().iter().map(|r| r.code()).collect();
    println!("\nPresets:");
    println!("  recommended  - All rules (default)");
    println!("  minimal      - {}", minimal.join(", "));

    println!("\nDisable a rule in doctrine-lint.toml, e.g.:");
    println!("  [rules.mutable-public-property]");
    println!("  enabled = false");
}
