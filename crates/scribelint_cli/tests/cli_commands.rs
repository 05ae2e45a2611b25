//! Integration tests for CLI commands
//!
//! Tests for init, rules, and configuration handling.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a command for the scrib CLI
fn scrib_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scrib"));
    cmd.arg("--no-cache");
    cmd
}

mod init_command {
    use super::*;

    #[test]
    fn creates_new_config_file() {
        let temp_dir = TempDir::new().unwrap();

        scrib_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .assert()
            .success()
            .stderr(predicate::str::contains("Created .scribelint.jsonc"));

        let content = fs::read_to_string(temp_dir.path().join(".scribelint.jsonc")).unwrap();
        assert!(content.contains("rules"));
        assert!(content.contains("categories"));
        assert!(content.contains("cache"));
    }

    #[test]
    fn fails_when_config_exists_without_force() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".scribelint.jsonc"), "{}").unwrap();

        scrib_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn overwrites_config_with_force() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".scribelint.jsonc");
        fs::write(&config_path, r#"{"custom": "data"}"#).unwrap();

        scrib_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .arg("--force")
            .assert()
            .success();

        let content = fs::read_to_string(config_path).unwrap();
        assert!(!content.contains("custom"));
        assert!(content.contains("rules"));
    }
}

mod rules_command {
    use super::*;

    #[test]
    fn lists_builtin_rules() {
        scrib_cmd()
            .arg("rules")
            .assert()
            .success()
            .stdout(predicate::str::contains("ID"))
            .stdout(predicate::str::contains("alot"))
            .stdout(predicate::str::contains("enabled)"));
    }

    #[test]
    fn reflects_disabled_rules_from_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".scribelint.json"),
            r#"{ "disabled_rules": ["alot"] }"#,
        )
        .unwrap();

        scrib_cmd()
            .current_dir(temp_dir.path())
            .arg("rules")
            .assert()
            .success()
            .stdout(predicate::str::is_match(r"alot\s+\w+\s+\w+\s+no").unwrap());
    }
}

mod config_handling {
    use super::*;

    #[test]
    fn invalid_config_fails_with_exit_code_two() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("bad.json");
        fs::write(&config, r#"{ "unknown_option": true }"#).unwrap();

        scrib_cmd()
            .arg("--config")
            .arg(&config)
            .arg("rules")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config validation failed"));
    }

    #[test]
    fn configured_dictionary_and_rules_are_used() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join(".scribelint.jsonc");
        fs::write(
            &config,
            r#"{
  // project vocabulary
  "dictionary": { "teh": "the" },
  "rules": [
    { "id": "utilize", "pattern": "\\butilize\\b", "message": "Prefer \"use\".", "suggest": ["use"], "kind": "WordChoice" }
  ]
}"#,
        )
        .unwrap();
        let file = temp_dir.path().join("doc.txt");
        fs::write(&file, "We utilize teh tool.\n").unwrap();

        scrib_cmd()
            .arg("--config")
            .arg(&config)
            .arg("lint")
            .arg(&file)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("[utilize]"))
            .stdout(predicate::str::contains("\"teh\" -> \"the\""))
            .stdout(predicate::str::contains("found 2 issues"));
    }

    #[test]
    fn disabled_category_suppresses_lints() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".scribelint.json"),
            r#"{ "categories": { "spelling": false, "grammar": false, "style": false } }"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("doc.txt"), "Thanks alot.\n").unwrap();

        scrib_cmd()
            .current_dir(temp_dir.path())
            .arg("lint")
            .arg("doc.txt")
            .assert()
            .success()
            .stdout(predicate::str::contains("found 0 issues"));
    }
}
