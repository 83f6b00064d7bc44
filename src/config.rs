use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::context::Theme;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub identity: IdentityConfig,
    pub splash: SplashConfig,
    pub recording: RecordingConfig,
    pub call: CallConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub theme: Theme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "EchoVerse".to_string(),
            theme: Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub full_name: String,
    pub first_name: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            full_name: "Guest User".to_string(),
            first_name: "Guest".to_string(),
        }
    }
}

/// Splash screen timing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// How long the splash stays on screen
    pub visible_ms: u64,
    /// Exit animation delay before the completion callback fires
    pub exit_ms: u64,
}

impl SplashConfig {
    pub fn visible(&self) -> Duration {
        Duration::from_millis(self.visible_ms)
    }

    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            visible_ms: 2700,
            exit_ms: 700,
        }
    }
}

/// Voice clone recording limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    pub tick_ms: u64,
    /// Hard ceiling, recording auto-stops here
    pub ceiling_secs: u32,
    /// Shorter takes are dropped on stop
    pub min_keep_secs: u32,
    /// Name used when a take is saved without one
    pub default_name: String,
}

impl RecordingConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            ceiling_secs: 30,
            min_keep_secs: 3,
            default_name: "My Voice Clone".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CallConfig {
    pub tick_ms: u64,
}

impl CallConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for CallConfig {
    fn default() -> Self {
        Self { tick_ms: 1000 }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("recording ceiling must be at least one second")]
    ZeroCeiling,

    #[error("minimum kept length {min_keep}s exceeds ceiling {ceiling}s")]
    MinKeepAboveCeiling { min_keep: u32, ceiling: u32 },

    #[error("{0} tick period must be non-zero")]
    ZeroTickPeriod(&'static str),
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults
    pub fn load_or_default(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rec = &self.recording;
        if rec.ceiling_secs == 0 {
            return Err(ConfigError::ZeroCeiling);
        }
        if rec.min_keep_secs > rec.ceiling_secs {
            return Err(ConfigError::MinKeepAboveCeiling {
                min_keep: rec.min_keep_secs,
                ceiling: rec.ceiling_secs,
            });
        }
        if rec.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod("recording"));
        }
        if self.call.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod("call"));
        }
        Ok(())
    }
}
