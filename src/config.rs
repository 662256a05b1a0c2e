use crate::generator::{CodeGenerator, DEFAULT_INDENT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "FORM_FORGE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "form_forge.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid value '{value}' for {key}")]
    InvalidOverride { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Spaces per nesting level in generated markup.
    pub indent: usize,
    /// Prefix generated code with an `HTML Code:` heading.
    pub banner: bool,
    pub log_filter: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            banner: true,
            log_filter: "info".to_string(),
        }
    }
}

impl FormConfig {
    /// Missing file means defaults; a present but broken file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_yaml(&raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Reads `.env`, loads the file named by `FORM_FORGE_CONFIG` and applies
    /// environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::load(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("FORM_FORGE_INDENT") {
            self.indent = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidOverride {
                    key: "FORM_FORGE_INDENT",
                    value,
                })?;
        }
        if let Some(value) = lookup("FORM_FORGE_BANNER") {
            self.banner = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidOverride {
                        key: "FORM_FORGE_BANNER",
                        value,
                    });
                }
            };
        }
        if let Some(value) = lookup("RUST_LOG") {
            self.log_filter = value;
        }
        Ok(())
    }

    pub fn generator(&self) -> CodeGenerator {
        CodeGenerator::new(self.indent)
    }
}
