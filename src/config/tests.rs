use crate::Cli;
use crate::config::*;
use crate::logging::file_subscriber;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["censistas"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

#[test]
fn test_defaults_when_nothing_set() {
    let cfg = AppConfig::resolve(cli(&[]), EnvOverrides::default(), FileConfig::default());
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.api_url, "http://localhost:3000/api");
    assert!(!cfg.mask_passwords);
}

#[test]
fn test_env_overrides_file() {
    let env = EnvOverrides {
        api_url: Some("https://censo.example.pe/api".to_string()),
        log_level: Some("debug".to_string()),
    };
    let file = FileConfig {
        api_url: Some("http://file.example/api".to_string()),
        log_level: Some("warn".to_string()),
        theme: Some("light".to_string()),
        ..FileConfig::default()
    };
    let cfg = AppConfig::resolve(cli(&[]), env, file);
    assert_eq!(cfg.api_url, "https://censo.example.pe/api");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.theme, "light");
}

#[test]
fn test_cli_overrides_everything() {
    let env = EnvOverrides {
        api_url: Some("https://env.example/api".to_string()),
        log_level: None,
    };
    let file = FileConfig {
        api_url: Some("http://file.example/api".to_string()),
        mask_passwords: Some(false),
        log_file: Some(PathBuf::from("/tmp/from-file.log")),
        ..FileConfig::default()
    };
    let cfg = AppConfig::resolve(
        cli(&[
            "--api-url",
            "http://10.0.0.5:3000/api",
            "--mask-passwords",
            "--log-file",
            "/tmp/cli.log",
            "--theme",
            "light",
        ]),
        env,
        file,
    );
    assert_eq!(cfg.api_url, "http://10.0.0.5:3000/api");
    assert!(cfg.mask_passwords);
    assert_eq!(cfg.log_file, PathBuf::from("/tmp/cli.log"));
    assert_eq!(cfg.theme, "light");
}

#[test]
fn test_file_can_enable_masking() {
    let file = FileConfig {
        mask_passwords: Some(true),
        ..FileConfig::default()
    };
    let cfg = AppConfig::resolve(cli(&[]), EnvOverrides::default(), file);
    assert!(cfg.mask_passwords);
}

#[test]
fn test_load_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
api_url = "https://censo.example.pe/api"
theme = "light"
mask_passwords = true
log_level = "debug"
"#,
    )
    .unwrap();

    let cfg = load_config_from(&path).unwrap();
    assert_eq!(cfg.api_url.as_deref(), Some("https://censo.example.pe/api"));
    assert_eq!(cfg.theme.as_deref(), Some("light"));
    assert_eq!(cfg.mask_passwords, Some(true));
    assert_eq!(cfg.log_level.as_deref(), Some("debug"));
    assert_eq!(cfg.log_file, None);
}

#[test]
fn test_load_config_invalid_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "api_url = [not valid").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(format!("{err}").contains("parse config file"));
}

#[test]
fn test_load_config_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(load_config_from(&temp_dir.path().join("nope.toml")).is_err());
}

#[test]
fn test_unreadable_config_file_is_reported_in_log() {
    let temp_dir = TempDir::new().unwrap();
    let bad = temp_dir.path().join("config.toml");
    fs::write(&bad, "api_url = [not valid").unwrap();
    let log_path = temp_dir.path().join("censistas.log");

    // SAFETY: no other test reads CENSISTAS_CONFIG.
    unsafe { std::env::set_var(CONFIG_PATH_ENV, &bad) };
    let (cfg, load) = AppConfig::from_cli(cli(&["--api-url", "http://cli.example/api"]));
    unsafe { std::env::remove_var(CONFIG_PATH_ENV) };

    assert_eq!(cfg.api_url, "http://cli.example/api");
    assert_eq!(load.skipped.len(), 1);
    assert_eq!(load.skipped[0].0, bad);
    assert_ne!(load.loaded_from.as_deref(), Some(bad.as_path()));

    let subscriber = file_subscriber("info", fs::File::create(&log_path).unwrap());
    tracing::subscriber::with_default(subscriber, || load.report());

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("WARN"), "log was: {log}");
    assert!(log.contains("skipping unreadable config file"), "log was: {log}");
    assert!(log.contains(&bad.display().to_string()), "log was: {log}");
    assert!(log.contains("parse config file"), "log was: {log}");
}
