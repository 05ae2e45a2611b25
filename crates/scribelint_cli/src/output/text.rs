//! Text output formatter

use scribelint_core::{Lint, LintResult, SuggestionKind};

pub fn output_text(results: &[LintResult]) {
    for result in results {
        if result.lints.is_empty() {
            continue;
        }

        println!("\n{}:", result.path.display());
        for (lint, location) in result.lints.iter().zip(&result.locations) {
            let position = match location {
                Some(loc) => format!("{}:{}", loc.start.line, loc.start.column),
                None => "-:-".to_string(),
            };
            println!(
                "  {:<8} {:?} [{}]: {}{}",
                position,
                lint.category,
                lint.rule_id.as_deref().unwrap_or(source_name(lint)),
                lint.message,
                suggestion_hint(lint)
            );
        }
    }

    let total_files = results.len();
    let total_issues: usize = results.iter().map(|r| r.lints.len()).sum();
    let cached = results.iter().filter(|r| r.from_cache).count();

    println!();
    println!(
        "Checked {} files ({} from cache), found {} issues",
        total_files, cached, total_issues
    );
}

fn source_name(lint: &Lint) -> &'static str {
    match lint.source {
        scribelint_core::LintSource::Engine => "engine",
        scribelint_core::LintSource::Pattern => "pattern",
        scribelint_core::LintSource::Clause => "clause",
        scribelint_core::LintSource::Ai => "ai",
    }
}

fn suggestion_hint(lint: &Lint) -> String {
    match lint.suggestions.first() {
        Some(s) if s.kind == SuggestionKind::Remove => format!(" (remove \"{}\")", lint.problem_text),
        Some(s) => format!(" (\"{}\" -> \"{}\")", lint.problem_text, s.text),
        None => String::new(),
    }
}
