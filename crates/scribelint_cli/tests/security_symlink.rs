use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

#[cfg(unix)]
use std::os::unix::fs::symlink;
#[cfg(windows)]
use std::os::windows::fs::symlink_file as symlink;

fn scrib_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scrib"))
}

#[test]
fn init_force_replaces_symlink_without_touching_target() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(".scribelint.jsonc");
    let target_path = dir.path().join("target_file");

    fs::write(&target_path, "Important Data").unwrap();

    #[cfg(unix)]
    symlink(&target_path, &config_path).unwrap();
    // Creating symlinks may need privileges on Windows.
    #[cfg(windows)]
    if symlink(&target_path, &config_path).is_err() {
        return;
    }

    scrib_cmd()
        .current_dir(dir.path())
        .arg("init")
        .arg("--force")
        .assert()
        .success();

    let content = fs::read_to_string(&target_path).unwrap();
    assert_eq!(content, "Important Data");

    let meta = fs::symlink_metadata(&config_path).unwrap();
    assert!(meta.is_file());
    assert!(!meta.is_symlink());
}

#[test]
fn init_without_force_rejects_existing_symlink() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(".scribelint.jsonc");
    let target_path = dir.path().join("target_file");

    fs::write(&target_path, r#"{ "rules": [] }"#).unwrap();

    #[cfg(unix)]
    symlink(&target_path, &config_path).unwrap();
    #[cfg(windows)]
    if symlink(&target_path, &config_path).is_err() {
        return;
    }

    scrib_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure();

    let content = fs::read_to_string(&target_path).unwrap();
    assert_eq!(content, r#"{ "rules": [] }"#);
}
