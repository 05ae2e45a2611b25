//! Core linter engine.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rayon::prelude::*;
use scribelint_ast::{Document, Span, SpanSet};
use scribelint_cache::LintCache;
use scribelint_parser::parser_for_extension;
use scribelint_plugin::Lint;
use scribelint_rules::{ClauseBoundaryDetector, RuleEngine, RuleSpec};
use tracing::{debug, info, warn};

use crate::aggregator::LintAggregator;
use crate::engines::DictionaryEngine;
use crate::mapper::flatten;
use crate::postprocess::postprocess;
use crate::{Dictionary, LintError, LintResult, LinterConfig, SourceLint};

/// Result type for [`Linter::lint_files`].
///
/// Contains a tuple of:
/// - Successful lint results
/// - Failed files with their errors (path and error)
pub type LintFilesResult = (Vec<LintResult>, Vec<(PathBuf, LintError)>);

/// The fast-pass linter.
///
/// Owns the configured rule table, the clause detector, the misspelling
/// dictionary and the result cache. Every method takes `&self`; one linter
/// can serve several sessions or threads at once.
pub struct Linter {
    /// Linter configuration.
    config: LinterConfig,
    /// Pre-computed hash of the configuration.
    config_hash: String,
    /// Pattern rules, filtered by configuration.
    rules: RuleEngine,
    /// Clause junction detector.
    clauses: ClauseBoundaryDetector,
    /// Known misspellings.
    dictionary: Dictionary,
    /// Built-in engine used when linting files.
    engine: DictionaryEngine,
    /// Result cache.
    cache: Mutex<LintCache>,
}

impl Linter {
    /// Creates a new linter with the given configuration.
    pub fn new(config: LinterConfig) -> Result<Self, LintError> {
        let mut rules = RuleEngine::with_default_rules();
        let added = rules.extend_specs(config.rules.iter().cloned().map(RuleSpec::from));
        if added < config.rules.len() {
            warn!(
                "{} configured rule(s) were skipped",
                config.rules.len() - added
            );
        }

        for id in &config.disabled_rules {
            if !rules.set_enabled(id, false) {
                warn!("Unknown rule '{}' in disabled_rules", id);
            }
        }
        for category in config.categories.disabled() {
            rules.disable_category(category);
        }

        let dictionary = Dictionary::with_extra(&config.dictionary);

        let mut cache = LintCache::new(config.cache_path(), config.cache_capacity);
        if !config.cache {
            cache.disable();
        }

        // Load cache from disk
        if let Err(e) = cache.load() {
            warn!("Failed to load cache: {}", e);
        }

        // Pre-compute config hash
        let config_hash = config.hash();

        Ok(Self {
            config,
            config_hash,
            rules,
            clauses: ClauseBoundaryDetector::new(),
            engine: DictionaryEngine::new(dictionary.clone()),
            dictionary,
            cache: Mutex::new(cache),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    /// Returns the configured rule table.
    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    /// Returns the misspelling dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Runs the fast pass over `text`.
    ///
    /// `engine_lints` are the grammar engine's answer for the same text.
    /// Nothing is reported inside `ignore` spans. The result is sorted and
    /// its spans are pairwise disjoint.
    pub fn lint_text(&self, text: &str, engine_lints: Vec<Lint>, ignore: &[Span]) -> Vec<Lint> {
        let mut occupied = SpanSet::from_spans(ignore.iter().copied());

        let engine: Vec<Lint> = postprocess(engine_lints, &self.dictionary)
            .into_iter()
            .filter(|lint| {
                let consistent = lint.is_consistent_with(text);
                if !consistent {
                    debug!(start = lint.span.start, end = lint.span.end, "dropping stale engine lint");
                }
                consistent && !occupied.overlaps_span(lint.span)
            })
            .collect();
        for lint in &engine {
            occupied.insert_span(lint.span);
        }

        let mut pattern = self.rules.evaluate(text, &mut occupied);
        pattern.extend(self.clauses.detect(text, &mut occupied));

        let merged = LintAggregator::new(text).merge(engine, pattern, None);
        self.filter_categories(merged)
    }

    /// Drops lints of disabled categories.
    pub fn filter_categories(&self, lints: Vec<Lint>) -> Vec<Lint> {
        let categories = &self.config.categories;
        lints
            .into_iter()
            .filter(|lint| categories.is_enabled(lint.category))
            .collect()
    }

    /// Returns the cached fast-pass result for exactly `text`.
    pub fn cached(&self, text: &str) -> Option<Vec<Lint>> {
        self.cache
            .lock()
            .get(text, &self.config_hash)
            .map(<[Lint]>::to_vec)
    }

    /// Caches a fast-pass result for `text`.
    pub fn store(&self, text: &str, lints: Vec<Lint>) {
        self.cache.lock().insert(text, &self.config_hash, lints);
    }

    /// Lints a parsed document with the built-in engine. Code is ignored.
    pub fn lint_document(&self, document: Document) -> SourceLint {
        let flat = flatten(&document);
        let ignore = flat.code_spans(&document);
        let engine_lints = self.engine.check(&flat.text);
        let lints = self.lint_text(&flat.text, engine_lints, &ignore);

        SourceLint {
            document,
            flat,
            lints,
            from_cache: false,
        }
    }

    /// Parses `source` with the parser for `extension` and lints it.
    pub fn lint_source(&self, source: &str, extension: &str) -> Result<SourceLint, LintError> {
        let parser = parser_for_extension(extension)?;
        let document = parser.parse(source)?;

        let cache_key = format!("{}:{}", self.config_hash, parser.name());
        let cached = self
            .cache
            .lock()
            .get(source, &cache_key)
            .map(<[Lint]>::to_vec);

        if let Some(lints) = cached {
            debug!("Cache hit for {} source", parser.name());
            return Ok(SourceLint {
                flat: flatten(&document),
                document,
                lints,
                from_cache: true,
            });
        }

        let result = self.lint_document(document);
        self.cache
            .lock()
            .insert(source, &cache_key, result.lints.clone());
        Ok(result)
    }

    /// Lints one file.
    pub fn lint_file(&self, path: &Path) -> Result<LintResult, LintError> {
        let source = fs::read_to_string(path)
            .map_err(|e| LintError::file(format!("Failed to read {}: {}", path.display(), e)))?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("txt");

        let linted = self.lint_source(&source, extension)?;
        let locations = linted.locations(&source);

        Ok(LintResult {
            path: path.to_path_buf(),
            from_cache: linted.from_cache,
            lints: linted.lints,
            locations,
        })
    }

    /// Lints a list of files in parallel using rayon.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintFilesResult {
        let results: Vec<Result<LintResult, (PathBuf, LintError)>> = paths
            .par_iter()
            .map(|path| self.lint_file(path).map_err(|e| (path.clone(), e)))
            .collect();

        // Separate successes and failures
        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(lint_result) => successes.push(lint_result),
                Err((path, error)) => {
                    warn!("Failed to lint {}: {}", path.display(), error);
                    failures.push((path, error));
                }
            }
        }

        info!(
            "Linted {} file(s), {} failed",
            successes.len(),
            failures.len()
        );
        self.save_cache();

        (successes, failures)
    }

    /// Persists the cache, logging failures.
    pub fn save_cache(&self) {
        if let Err(e) = self.cache.lock().save() {
            warn!("Failed to save cache: {}", e);
        }
    }
}
