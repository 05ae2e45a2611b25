//! Lint command implementation

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use scribelint_core::{Linter, LinterConfig, parser_for_extension};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::cli::{Cli, OutputFormat};
use crate::fix::{apply_fixes, output_fix_summary};
use crate::output::output_results;

pub fn run_lint(
    cli: &Cli,
    paths: &[PathBuf],
    format: OutputFormat,
    fix: bool,
    dry_run: bool,
) -> Result<bool> {
    let config = load_config(cli)?;
    let linter = Linter::new(config).into_diagnostic()?;

    let files = collect_files(paths);
    let (results, failures) = linter.lint_files(&files);

    if !failures.is_empty() {
        eprintln!("\n{} file(s) failed to lint:", failures.len());
        for (path, error) in &failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    if fix {
        let fix_summary = apply_fixes(&linter, &results, dry_run)?;
        output_fix_summary(&fix_summary, dry_run);

        if dry_run {
            let has_issues = output_results(&results, format)?;
            return Ok(has_issues || !failures.is_empty());
        }

        let total: usize = results.iter().map(|r| r.lints.len()).sum();
        let remaining = total.saturating_sub(fix_summary.total_fixes);
        return Ok(remaining > 0 || !failures.is_empty());
    }

    let has_issues = output_results(&results, format)?;

    Ok(has_issues || !failures.is_empty())
}

/// Loads `--config`, or discovers a config file in the working directory.
pub fn load_config(cli: &Cli) -> Result<LinterConfig> {
    let mut config = if let Some(ref path) = cli.config {
        LinterConfig::from_file(path).into_diagnostic()?
    } else {
        find_config()?
    };

    if cli.no_cache {
        config.cache = false;
    }

    Ok(config)
}

fn find_config() -> Result<LinterConfig> {
    if let Some(path) = LinterConfig::discover(".") {
        info!("Using config: {}", path.display());
        return LinterConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LinterConfig::new())
}

/// Expands the given paths into the files to lint.
///
/// Files are taken as given. Directories are walked, skipping hidden entries
/// and files without a supported extension.
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let walker = WalkDir::new(path)
                .follow_links(false)
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
            for entry in walker {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_supported(entry.path()) => {
                        files.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Failed to read directory entry: {}", e),
                }
            }
        } else {
            warn!("Path not found: {}", path.display());
        }
    }

    files.sort();
    files.dedup();
    files
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| parser_for_extension(ext).is_ok())
}
