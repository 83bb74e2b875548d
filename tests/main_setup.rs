use portal_gate::{AppConfig, ConfigError, config::Env};
use serial_test::serial;
use std::{env, panic, path::PathBuf};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: [&str; 4] = ["APP_ENV", "HOST", "PORT", "ASSETS_DIR"];

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T, cleanup_vars: &[&'static str]) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    // Run the test
    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

fn fixture_dist() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/dist")
        .display()
        .to_string()
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(
        || {
            unsafe {
                for var in CONFIG_VARS {
                    env::remove_var(var);
                }
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    )
    .expect("local config should load without any variables set");

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_address(), "0.0.0.0:3000");
    assert_eq!(config.assets_dir, PathBuf::from("dist"));
}

#[test]
#[serial]
fn test_app_config_local_tolerates_missing_bundle() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::set_var("ASSETS_DIR", "/definitely/not/a/bundle");
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    )
    .expect("a missing bundle is only a warning locally");

    assert!(!config.assets_present());
}

#[test]
#[serial]
fn test_app_config_production_fail_fast_on_missing_bundle() {
    let result = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("ASSETS_DIR", "/definitely/not/a/bundle");
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    );

    assert!(
        matches!(result, Err(ConfigError::MissingAssets(ref dir)) if dir == &PathBuf::from("/definitely/not/a/bundle")),
        "production config must refuse to start without index.html"
    );
}

#[test]
#[serial]
fn test_app_config_production_with_bundle() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("HOST", "10.0.0.5");
                env::set_var("PORT", "8443");
                env::set_var("ASSETS_DIR", fixture_dist());
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    )
    .expect("production config with a bundle should load");

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.bind_address(), "10.0.0.5:8443");
    assert!(config.assets_present());
}

#[test]
#[serial]
fn test_app_config_rejects_invalid_port() {
    let result = run_with_env(
        || {
            unsafe {
                env::remove_var("APP_ENV");
                env::set_var("PORT", "eighty");
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    );

    match result {
        Err(ConfigError::InvalidPort { value, .. }) => assert_eq!(value, "eighty"),
        other => panic!("expected InvalidPort, got {other:?}"),
    }
}
