use serial_test::serial;
use temp_env::with_vars;

use super::*;

fn cleanup_all_pathwatch_env_vars() {
    for (key, _) in std::env::vars() {
        if key.starts_with("PATHWATCH_") {
            std::env::remove_var(&key);
        }
    }
}

#[test]
#[serial]
fn default_config_should_initialize_with_hardcoded_values() {
    let settings = Settings::default();

    assert_eq!(settings.registry.remove_policy, RemovePolicy::Cancel);
    assert_eq!(settings.registry.pending_warn_threshold, 64);
    assert_eq!(settings.dispatch.command_buffer_capacity, 100);
}

#[test]
#[serial]
fn load_should_merge_environment_overrides() {
    cleanup_all_pathwatch_env_vars();
    with_vars(
        vec![("PATHWATCH__REGISTRY__PENDING_WARN_THRESHOLD", Some("9"))],
        || {
            let settings = Settings::load(None).unwrap();

            assert_eq!(settings.registry.pending_warn_threshold, 9);
        },
    );
}

#[test]
#[serial]
fn load_should_merge_file_settings() {
    cleanup_all_pathwatch_env_vars();
    // Create temporary directory and configuration file
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("pathwatch.toml");

    std::fs::write(
        &config_path,
        r#"
        [registry]
        remove_policy = "legacy" # Override default value
        pending_warn_threshold = 8

        [dispatch]
        command_buffer_capacity = 16
        "#,
    )
    .unwrap();

    let empty_vars: Vec<(&str, Option<&str>)> = vec![];
    with_vars(empty_vars, || {
        let settings = Settings::load(config_path.to_str()).expect("success");

        assert_eq!(settings.registry.remove_policy, RemovePolicy::Legacy);
        assert_eq!(settings.registry.pending_warn_threshold, 8);
        assert_eq!(settings.dispatch.command_buffer_capacity, 16);
    });
}

#[test]
fn validation_should_fail_with_zero_warn_threshold() {
    let mut settings = Settings::default();
    settings.registry.pending_warn_threshold = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn validation_should_fail_with_zero_buffer_capacity() {
    let mut settings = Settings::default();
    settings.dispatch.command_buffer_capacity = 0;

    assert!(settings.validate().is_err());
}
