//! Linter configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use jsonschema::Validator;
use scribelint_plugin::Category;
use scribelint_rules::RuleDescriptor;
use serde::{Deserialize, Serialize};

use crate::LintError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Lower bound for the debounce delay.
pub const MIN_DEBOUNCE_MS: u64 = 250;

/// Configuration for the linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Delay before a fast pass runs after an edit, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Whether to enable caching.
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// Maximum number of cached results.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Cache directory.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// AI reviewer settings.
    #[serde(default)]
    pub ai: AiConfig,

    /// Per-category toggles.
    #[serde(default)]
    pub categories: CategoryToggles,

    /// Ids of built-in or configured rules to switch off.
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// Extra pattern rules, evaluated after the built-in table.
    #[serde(default)]
    pub rules: Vec<RuleDescriptor>,

    /// Extra misspellings (`word → correction`).
    #[serde(default)]
    pub dictionary: BTreeMap<String, String>,

    /// Directory containing the configuration file, if loaded from disk.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_cache() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    scribelint_cache::DEFAULT_CAPACITY
}

fn default_cache_dir() -> String {
    ".scribelint-cache".to_string()
}

fn default_true() -> bool {
    true
}

/// AI reviewer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Whether proofreading requests are sent at all.
    #[serde(default)]
    pub enabled: bool,
}

/// Which lint categories are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryToggles {
    #[serde(default = "default_true")]
    pub spelling: bool,
    #[serde(default = "default_true")]
    pub grammar: bool,
    #[serde(default = "default_true")]
    pub style: bool,
}

impl Default for CategoryToggles {
    fn default() -> Self {
        Self {
            spelling: true,
            grammar: true,
            style: true,
        }
    }
}

impl CategoryToggles {
    /// Returns whether lints of `category` are reported.
    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Spelling => self.spelling,
            Category::Grammar => self.grammar,
            Category::Style => self.style,
        }
    }

    /// Iterates the disabled categories.
    pub fn disabled(&self) -> impl Iterator<Item = Category> + '_ {
        [Category::Spelling, Category::Grammar, Category::Style]
            .into_iter()
            .filter(|c| !self.is_enabled(*c))
    }
}

impl LinterConfig {
    /// Configuration file names, in lookup order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".scribelint.jsonc", ".scribelint.json"];

    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            cache: default_cache(),
            cache_capacity: default_cache_capacity(),
            cache_dir: default_cache_dir(),
            ai: AiConfig::default(),
            categories: CategoryToggles::default(),
            disabled_rules: Vec::new(),
            rules: Vec::new(),
            dictionary: BTreeMap::new(),
            base_dir: None,
        }
    }

    /// Finds the first configuration file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.scribelint.jsonc` (comments and trailing commas) and
    /// `.scribelint.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LintError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LintError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_jsonc(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSONC with schema validation.
    pub fn from_jsonc(content: &str) -> Result<Self, LintError> {
        let value = jsonc_parser::parse_to_serde_value(content, &Default::default())
            .map_err(|e| LintError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        Self::from_value(value)
    }

    /// Parses configuration from a strict JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LintError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| LintError::config(format!("Invalid JSON: {}", e)))?;

        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, LintError> {
        let schema = CONFIG_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value =
                    serde_json::from_str(SCHEMA_JSON).map_err(|e| e.to_string())?;
                Validator::new(&schema_json).map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(|e| LintError::config(format!("Invalid embedded config schema: {}", e)))?;

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LintError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LintError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the debounce delay, never shorter than [`MIN_DEBOUNCE_MS`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.max(MIN_DEBOUNCE_MS))
    }

    /// Resolves the cache directory against the configuration file's directory.
    pub fn cache_path(&self) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(&self.cache_dir),
            None => PathBuf::from(&self.cache_dir),
        }
    }

    /// Computes a hash of the configuration for cache invalidation.
    pub fn hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn test_config_new() {
        let config = LinterConfig::new();
        assert_eq!(config.debounce_ms, 400);
        assert!(config.cache);
        assert_eq!(config.cache_capacity, 128);
        assert!(!config.ai.enabled);
        assert!(config.categories.is_enabled(Category::Style));
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(LinterConfig::from_json("{}").unwrap(), LinterConfig::new());
        assert_eq!(LinterConfig::from_jsonc("").unwrap(), LinterConfig::new());
    }

    #[test]
    fn test_config_from_jsonc() {
        let jsonc = r#"{
            // faster feedback
            "debounce_ms": 300,
            "ai": { "enabled": true },
            "categories": { "style": false },
            "disabled_rules": ["alot"],
            "rules": [
                {
                    "id": "utilize",
                    "pattern": "\\butilize\\b",
                    "message": "Prefer \"use\".",
                    "suggest": ["use"],
                    "kind": "WordChoice",
                },
            ],
            "dictionary": { "recieve": "receive" },
        }"#;

        let config = LinterConfig::from_jsonc(jsonc).unwrap();
        assert_eq!(config.debounce_ms, 300);
        assert!(config.ai.enabled);
        assert!(!config.categories.style);
        assert!(config.categories.grammar);
        assert_eq!(config.disabled_rules, vec!["alot"]);
        assert_eq!(config.rules[0].id, "utilize");
        assert_eq!(config.dictionary["recieve"], "receive");
        assert_eq!(
            config.categories.disabled().collect::<Vec<_>>(),
            vec![Category::Style]
        );
    }

    #[rstest]
    #[case(0, 250)]
    #[case(100, 250)]
    #[case(250, 250)]
    #[case(900, 900)]
    fn test_debounce_is_clamped(#[case] configured: u64, #[case] expected: u64) {
        let config = LinterConfig {
            debounce_ms: configured,
            ..LinterConfig::new()
        };
        assert_eq!(config.debounce(), Duration::from_millis(expected));
    }

    #[rstest]
    #[case::unknown_property(r#"{ "cahce": true }"#)]
    #[case::type_mismatch(r#"{ "cache": "not-a-bool" }"#)]
    #[case::bad_kind(r#"{ "rules": [{ "id": "x", "pattern": "x", "message": "m", "kind": "Nope" }] }"#)]
    #[case::missing_pattern(r#"{ "rules": [{ "id": "x", "message": "m", "kind": "Style" }] }"#)]
    #[case::zero_capacity(r#"{ "cache_capacity": 0 }"#)]
    fn test_config_validation_errors(#[case] json: &str) {
        let err = LinterConfig::from_json(json).unwrap_err();
        assert!(
            err.to_string().contains("Config validation failed"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = LinterConfig::from_json("{ nope").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_discover_and_from_file() {
        let dir = tempdir().unwrap();
        assert!(LinterConfig::discover(dir.path()).is_none());

        let path = dir.path().join(".scribelint.json");
        fs::write(&path, r#"{ "cache_dir": "cache" }"#).unwrap();

        let found = LinterConfig::discover(dir.path()).unwrap();
        assert_eq!(found, path);

        let config = LinterConfig::from_file(&found).unwrap();
        assert_eq!(config.base_dir.as_deref(), Some(dir.path()));
        assert_eq!(config.cache_path(), dir.path().join("cache"));
    }

    #[test]
    fn test_jsonc_file_wins_over_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".scribelint.json"), "{}").unwrap();
        fs::write(dir.path().join(".scribelint.jsonc"), "{}").unwrap();

        let found = LinterConfig::discover(dir.path()).unwrap();
        assert!(found.ends_with(".scribelint.jsonc"));
    }

    #[test]
    fn test_hash_changes_with_config() {
        let a = LinterConfig::new();
        let mut b = LinterConfig::new();
        assert_eq!(a.hash(), b.hash());

        b.disabled_rules.push("alot".to_string());
        assert_ne!(a.hash(), b.hash());
    }
}
