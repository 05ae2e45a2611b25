//! Output formatting module

mod json;
mod text;

use miette::Result;
use scribelint_core::LintResult;

use crate::cli::OutputFormat;

pub fn output_results(results: &[LintResult], format: OutputFormat) -> Result<bool> {
    let has_issues = results.iter().any(|r| r.has_issues());

    match format {
        OutputFormat::Json => json::output_json(results)?,
        OutputFormat::Text => text::output_text(results),
    }

    Ok(has_issues)
}
