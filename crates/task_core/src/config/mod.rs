use crate::error::AppError;
use crate::messages::{Locale, MessageKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TASKMGR_CONFIG_PATH";
const STORE_ENV_VAR: &str = "TASKMGR_STORE_PATH";
pub const DEFAULT_STORE_FILE: &str = "tasks_database.json";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub messages: HashMap<String, String>,
    /// Store path from `--config-override`; outranks `TASKMGR_STORE_PATH`.
    #[serde(skip)]
    pub store_path_override: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub store_path: Option<PathBuf>,
    pub locale: Option<String>,
    pub messages: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    StorePath,
    Locale,
    Message(MessageKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("taskmgr")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskmgr")
            .join(CONFIG_FILE_NAME))
    }
}

/// Store location: command-line override, then `TASKMGR_STORE_PATH`, then the
/// config file, then `tasks_database.json`.
pub fn resolve_store_path(config: &Config) -> PathBuf {
    if let Some(path) = config.store_path_override.as_ref() {
        return path.clone();
    }

    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    config
        .store_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;

    if let Some(locale) = config.locale.as_deref()
        && Locale::parse(locale).is_none()
    {
        return Err(AppError::invalid_data(format!(
            "unknown locale '{locale}' in {}",
            path.display()
        )));
    }

    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(store_path) = overrides.store_path.as_ref() {
        merged.store_path_override = Some(store_path.clone());
    }
    if let Some(locale) = overrides.locale.as_ref() {
        merged.locale = Some(locale.clone());
    }

    for (key, template) in overrides.messages.iter() {
        merged.messages.insert(key.clone(), template.clone());
    }

    merged
}

impl ConfigOverrides {
    pub fn apply(&mut self, parsed: ParsedConfigOverride) {
        match parsed.target {
            ConfigOverrideTarget::StorePath => self.store_path = Some(PathBuf::from(parsed.value)),
            ConfigOverrideTarget::Locale => self.locale = Some(parsed.value),
            ConfigOverrideTarget::Message(key) => {
                self.messages.insert(key.as_str().to_string(), parsed.value);
            }
        }
    }
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, AppError> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| AppError::invalid_input("override must be in KEY=VALUE format"))?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let canonical_field = canonicalize_key(field)
        .ok_or_else(|| AppError::invalid_input("override key cannot be empty"))?;

    match canonical_field.as_str() {
        "store_path" | "store" => {
            if remainder.is_some() {
                return Err(AppError::invalid_input(
                    "store_path override cannot have subfields",
                ));
            }
            if value.is_empty() {
                return Err(AppError::invalid_input("store_path override needs a value"));
            }
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::StorePath,
                value,
            })
        }
        "locale" | "lang" => {
            if remainder.is_some() {
                return Err(AppError::invalid_input(
                    "locale override cannot have subfields",
                ));
            }
            if Locale::parse(&value).is_none() {
                return Err(AppError::invalid_input(format!("unknown locale '{value}'")));
            }
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Locale,
                value,
            })
        }
        "messages" | "message" => {
            let name = remainder
                .and_then(canonicalize_key)
                .ok_or_else(|| AppError::invalid_input("messages override requires a key"))?;
            let key = MessageKey::from_name(&name)
                .ok_or_else(|| AppError::invalid_input(format!("unknown message key '{name}'")))?;
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Message(key),
                value,
            })
        }
        other => Err(AppError::invalid_input(format!(
            "unknown config field '{other}'"
        ))),
    }
}

fn canonicalize_key(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
