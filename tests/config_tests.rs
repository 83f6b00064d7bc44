// Integration tests for loading the layered config file

use anyhow::Result;
use echome::{Config, ConfigError, Theme};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_partial_file_fills_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("echome.toml"),
        r#"
[app]
theme = "light"

[recording]
ceiling_secs = 10
"#,
    )?;

    let path = temp_dir.path().join("echome");
    let cfg = Config::load(path.to_str().unwrap())?;

    assert_eq!(cfg.app.theme, Theme::Light);
    assert_eq!(cfg.app.name, "EchoVerse");
    assert_eq!(cfg.recording.ceiling_secs, 10);
    assert_eq!(cfg.recording.min_keep_secs, 3);
    assert_eq!(cfg.splash.visible_ms, 2700);

    Ok(())
}

#[test]
fn test_load_rejects_invalid_limits() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("echome.toml"),
        "[recording]\nceiling_secs = 5\nmin_keep_secs = 8\n",
    )?;

    let path = temp_dir.path().join("echome");
    let err = Config::load(path.to_str().unwrap()).unwrap_err();

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::MinKeepAboveCeiling {
            min_keep: 8,
            ceiling: 5
        })
    );

    Ok(())
}

#[test]
fn test_missing_file_falls_back_to_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("absent");

    assert!(Config::load(path.to_str().unwrap()).is_err());

    let cfg = Config::load_or_default(path.to_str().unwrap())?;
    assert_eq!(cfg.recording.default_name, "My Voice Clone");
    assert_eq!(cfg.call.tick_ms, 1000);

    Ok(())
}

#[test]
fn test_shipped_config_is_valid() -> Result<()> {
    let cfg = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/echome"))?;
    assert_eq!(cfg.identity.first_name, "Guest");
    assert_eq!(cfg.app.theme, Theme::Dark);
    Ok(())
}
