//! LOOPTREE_* environment overrides.
//!
//! Kept in its own test binary: environment variables are process-wide.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use looptree::application::ApplicationError;
use looptree::config::Settings;

/// Tests in one binary run on parallel threads; env mutation must be serialized.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn config_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("looptree.toml");
    fs::write(&path, content).unwrap();
    path
}

/// Load settings with `vars` set, removing them again before returning.
fn load_with_env(local: &Path, vars: &[(&str, &str)]) -> Result<Settings, ApplicationError> {
    let _guard = lock_env();
    for (key, value) in vars {
        env::set_var(key, value);
    }
    let settings = Settings::load(Some(local));
    for (key, _) in vars {
        env::remove_var(key);
    }
    settings
}

#[test]
fn given_env_vars_when_load_then_override_file_values() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = config_file(&dir, "max_depth = 4\nloop_marker = \"*\"\n");

    // Act
    let settings = load_with_env(
        &path,
        &[
            ("LOOPTREE_MAX_DEPTH", "9"),
            ("LOOPTREE_REJECT_DUPLICATE_NAMES", "true"),
        ],
    );

    // Assert
    let settings = settings.expect("load settings");
    assert_eq!(settings.max_depth, Some(9));
    assert!(settings.reject_duplicate_names);
    assert_eq!(settings.loop_marker, "*", "file value kept when no env override");
}

#[test]
fn given_string_env_var_when_load_then_overrides_document_key() {
    let dir = TempDir::new().unwrap();
    let path = config_file(&dir, "document_key = \"tree\"\n");

    let settings = load_with_env(&path, &[("LOOPTREE_DOCUMENT_KEY", "nodes")]).unwrap();

    assert_eq!(settings.document_key, "nodes");
    assert_eq!(settings.max_depth, None);
}

#[test]
fn given_mistyped_env_var_when_load_then_reports_config_error() {
    let dir = TempDir::new().unwrap();
    let path = config_file(&dir, "");

    let err = load_with_env(&path, &[("LOOPTREE_MAX_DEPTH", "abc")]).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().starts_with("config error: "));
}
