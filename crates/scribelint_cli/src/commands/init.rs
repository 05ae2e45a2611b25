//! Init command implementation

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use scribelint_core::LinterConfig;
use tracing::info;

const DEFAULT_CONFIG: &str = r#"{
  // Milliseconds to wait after an edit before linting.
  "debounce_ms": 400,
  "cache": true,
  "ai": { "enabled": false },
  "categories": { "spelling": true, "grammar": true, "style": true },
  "disabled_rules": [],
  "rules": [],
  "dictionary": {}
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(LinterConfig::CONFIG_FILES[0]);

    loop {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.custom_flags(libc::O_NOFOLLOW);
        }

        match options.open(&config_path) {
            Ok(mut file) => {
                use std::io::Write;
                file.write_all(DEFAULT_CONFIG.as_bytes()).into_diagnostic()?;
                info!("Created {}", config_path.display());
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                if !force {
                    return Err(miette::miette!(
                        "Config file already exists. Use --force to overwrite."
                    ));
                }

                // Removes a symlink itself, never its target.
                match std::fs::remove_file(&config_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LinterConfig::from_jsonc(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, LinterConfig::new());
    }
}
