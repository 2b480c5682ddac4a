use std::path::PathBuf;
use log::error;
use serde::{Deserialize, Serialize};

use error::{ConfigError, Result};

/// Standard width of a captcha image
pub const DEFAULT_WIDTH: u32 = 300;
/// Standard height of a captcha image
pub const DEFAULT_HEIGHT: u32 = 80;
/// Standard number of digits
pub const DEFAULT_LENGTH: usize = 6;

/// Contain the render settings of a captcha
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CaptchaConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_length")]
    pub length: usize,
    /// Fixed seed for reproducible images, entropy is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>
}

fn default_width() -> u32 { DEFAULT_WIDTH }
fn default_height() -> u32 { DEFAULT_HEIGHT }
fn default_length() -> usize { DEFAULT_LENGTH }

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            length: DEFAULT_LENGTH,
            seed: None
        }
    }
}

impl CaptchaConfig {
    pub fn save(path: impl Into<PathBuf>, config: &CaptchaConfig) -> Result<()> {
        let path = path.into();

        let content: String = match toml::to_string(&config) {
            Ok(content) => content,
            Err(_) => return Err(error::Error::Config(ConfigError::CannotWriteFile(path.to_string_lossy().to_string())))
        };

        match std::fs::write(&path, content) {
            Ok(_) => Ok(()),
            Err(_) => Err(error::Error::Config(ConfigError::CannotWriteFile(path.to_string_lossy().to_string())))
        }
    }

    pub fn reload(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        *self = load_from(path)?;
        Ok(())
    }

    /// Reject the values that cannot produce an image
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(error::Error::Config(ConfigError::InvalidConfig(
                format!("the image size must be positive (got {}x{})", self.width, self.height)
            )));
        }

        if self.length == 0 {
            return Err(error::Error::Config(ConfigError::InvalidConfig("the captcha length must be positive".into())));
        }

        Ok(())
    }
}

/// Parse a configuration from a TOML string
pub fn from_str(content: &str) -> Result<CaptchaConfig> {
    let config: CaptchaConfig = match toml::from_str(content) {
        Ok(config) => config,
        Err(e) => return Err(error::Error::Config(ConfigError::InvalidFile(e.to_string())))
    };

    config.validate()?;
    Ok(config)
}

pub fn load_from(path: impl Into<PathBuf>) -> Result<CaptchaConfig> {
    let path = path.into();

    let content: String = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Err(error::Error::Config(ConfigError::CannotReadFile(path.to_string_lossy().to_string())))
    };

    match from_str(content.as_str()) {
        Ok(config) => Ok(config),
        Err(e) => {
            error!(target: "Config", "cannot load {path:?}: {e}");
            Err(e)
        }
    }
}
