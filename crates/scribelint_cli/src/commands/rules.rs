//! Rules command implementation

use miette::{IntoDiagnostic, Result};
use scribelint_core::Linter;

use crate::cli::Cli;
use crate::commands::load_config;

/// Prints the pattern rule table, with configuration applied.
pub fn run_rules(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let linter = Linter::new(config).into_diagnostic()?;
    let rules = linter.rules().rules();

    println!(
        "{:<28} {:<10} {:<16} {}",
        "ID", "CATEGORY", "KIND", "ENABLED"
    );
    for rule in rules {
        println!(
            "{:<28} {:<10} {:<16} {}",
            rule.id(),
            format!("{:?}", rule.category()).to_lowercase(),
            format!("{:?}", rule.kind()),
            if rule.is_enabled() { "yes" } else { "no" }
        );
    }

    let enabled = rules.iter().filter(|r| r.is_enabled()).count();
    println!("\n{} rules ({} enabled)", rules.len(), enabled);
    Ok(())
}
