//! Fix application logic

use std::fs;
use std::path::PathBuf;

use miette::Result;
use scribelint_core::{Fix, LintResult, Linter, apply_fixes_to_file};
use tracing::{error, warn};

/// Summary of applied fixes.
pub struct FixSummary {
    pub total_fixes: usize,
    pub files_fixed: usize,
    pub fixes_by_file: Vec<(PathBuf, usize)>,
    pub errors: Vec<(PathBuf, String)>,
}

/// Applies the first suggestion of every fixable lint.
///
/// Each file is re-parsed so the fixes run through the document tree and are
/// written back into the original markup.
pub fn apply_fixes(linter: &Linter, results: &[LintResult], dry_run: bool) -> Result<FixSummary> {
    let mut total_fixes = 0;
    let mut files_fixed = 0;
    let mut fixes_by_file = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        let fixable_count = result
            .lints
            .iter()
            .filter(|l| !l.suggestions.is_empty())
            .count();

        if fixable_count == 0 {
            continue;
        }

        if dry_run {
            fixes_by_file.push((result.path.clone(), fixable_count));
            total_fixes += fixable_count;
            files_fixed += 1;
            continue;
        }

        match fix_file(linter, result) {
            Ok(applied) if applied > 0 => {
                fixes_by_file.push((result.path.clone(), applied));
                total_fixes += applied;
                files_fixed += 1;
            }
            Ok(_) => {}
            Err(e) => {
                error!("Failed to fix {}: {}", result.path.display(), e);
                errors.push((result.path.clone(), e));
            }
        }
    }

    Ok(FixSummary {
        total_fixes,
        files_fixed,
        fixes_by_file,
        errors,
    })
}

fn fix_file(linter: &Linter, result: &LintResult) -> Result<usize, String> {
    let path = &result.path;
    let source = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("txt");

    let mut linted = linter
        .lint_source(&source, extension)
        .map_err(|e| e.to_string())?;
    let fixes: Vec<Fix> = linted.lints.iter().filter_map(|l| l.fix(0)).collect();

    let outcome =
        apply_fixes_to_file(path, &mut linted.document, fixes).map_err(|e| e.to_string())?;

    for failure in &outcome.report.failed {
        warn!(
            "{}: skipped fix at [{}, {}): {}",
            path.display(),
            failure.fix.span.start,
            failure.fix.span.end,
            failure.error
        );
    }
    if outcome.result.unmapped > 0 {
        warn!(
            "{}: {} edited node(s) could not be written back",
            path.display(),
            outcome.result.unmapped
        );
    }

    Ok(if outcome.result.modified {
        outcome.report.applied
    } else {
        0
    })
}

/// Outputs the fix summary.
pub fn output_fix_summary(summary: &FixSummary, dry_run: bool) {
    if summary.total_fixes == 0 && summary.errors.is_empty() {
        println!("No fixable issues found.");
        return;
    }

    if summary.total_fixes > 0 {
        let action = if dry_run { "Would fix" } else { "Fixed" };

        println!(
            "\n{} {} issues in {} files:",
            action, summary.total_fixes, summary.files_fixed
        );
        for (path, count) in &summary.fixes_by_file {
            println!("  {}: {} fixes", path.display(), count);
        }

        if dry_run {
            println!("\nRun without --dry-run to apply fixes.");
        }
    }

    if !summary.errors.is_empty() {
        eprintln!("\nFailed to fix {} file(s):", summary.errors.len());
        for (path, err) in &summary.errors {
            eprintln!("  {}: {}", path.display(), err);
        }
    }
}
