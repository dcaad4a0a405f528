//! Configuration management for flashcarder.
//!
//! Configuration is loaded from multiple sources and merged:
//! 1. Global config: `~/.config/flashcarder/config.json`
//! 2. Environment variable: `FLASHCARDER_CONFIG_CONTENT`
//! 3. Project config: `flashcarder.json` in the working directory
//!
//! Supports JSON with `//` and `/* */` comments, and `{env:VAR_NAME}`
//! substitution in file contents.

use crate::error::{ConfigError, CoreResult};
use flashcarder_util::{path, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Default translation endpoint.
pub const DEFAULT_TRANSLATION_ENDPOINT: &str = "https://api.mymemory.translated.net";

static VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

fn var_regex() -> &'static regex::Regex {
    VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\{env:([^}]+)\}")
            .expect("Invalid regex pattern - this is a compile-time constant")
    })
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the storage files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Log level name, e.g. `debug`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<TranslationConfig>,
}

/// Translation service settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Base URL of the MyMemory-compatible API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Set to `false` to turn off auto-translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl TranslationConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            enabled: other.enabled.or(self.enabled),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Later sources override earlier ones. Returns the files read.
    pub async fn load(project_dir: Option<&Path>) -> CoreResult<(Self, Vec<PathBuf>)> {
        let mut config = Config::default();
        let mut sources = Vec::new();

        if let Some(global_dir) = path::config_dir() {
            let path = global_dir.join("config.json");
            if path.exists() {
                config = config.merge(Self::load_file(&path).await?);
                sources.push(path);
            }
        }

        if let Ok(content) = std::env::var("FLASHCARDER_CONFIG_CONTENT") {
            let loaded = Self::parse_jsonc(&content, "<env>")?;
            config = config.merge(loaded);
        }

        if let Some(dir) = project_dir {
            let path = dir.join("flashcarder.json");
            if path.exists() {
                config = config.merge(Self::load_file(&path).await?);
                sources.push(path);
            }
        }

        Ok((config, sources))
    }

    /// Load configuration from a file.
    pub async fn load_file(path: &Path) -> CoreResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let content = Self::substitute_variables(&content)?;
        Self::parse_jsonc(&content, &path.display().to_string())
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(self, other: Self) -> Self {
        let translation = match (self.translation, other.translation) {
            (Some(base), Some(over)) => Some(base.merge(over)),
            (base, over) => over.or(base),
        };
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            log_level: other.log_level.or(self.log_level),
            translation,
        }
    }

    /// Directory for storage files.
    pub fn data_dir(&self) -> CoreResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        path::data_dir()
            .map(|d| d.join("data"))
            .ok_or_else(|| {
                ConfigError::InvalidPath("could not determine data directory".to_string()).into()
            })
    }

    /// Configured log level, if it names a known level.
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    pub fn translation_endpoint(&self) -> &str {
        self.translation
            .as_ref()
            .and_then(|t| t.endpoint.as_deref())
            .unwrap_or(DEFAULT_TRANSLATION_ENDPOINT)
    }

    pub fn translation_enabled(&self) -> bool {
        self.translation
            .as_ref()
            .and_then(|t| t.enabled)
            .unwrap_or(true)
    }

    /// Parse JSONC (JSON with comments).
    fn parse_jsonc(content: &str, source: &str) -> CoreResult<Self> {
        let stripped = Self::strip_comments(content);

        serde_json::from_str(&stripped).map_err(|e| {
            ConfigError::InvalidJson {
                path: source.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Strip JSON comments.
    fn strip_comments(input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        let mut in_string = false;
        let mut escape_next = false;

        while let Some(c) = chars.next() {
            if escape_next {
                result.push(c);
                escape_next = false;
                continue;
            }

            if in_string {
                match c {
                    '\\' => escape_next = true,
                    '"' => in_string = false,
                    _ => {}
                }
                result.push(c);
                continue;
            }

            match (c, chars.peek().copied()) {
                ('"', _) => {
                    in_string = true;
                    result.push(c);
                }
                ('/', Some('/')) => {
                    for c in chars.by_ref() {
                        if c == '\n' {
                            result.push('\n');
                            break;
                        }
                    }
                }
                ('/', Some('*')) => {
                    chars.next();
                    let mut prev = ' ';
                    for c in chars.by_ref() {
                        if prev == '*' && c == '/' {
                            break;
                        }
                        // Keep line numbers stable for error messages.
                        if c == '\n' {
                            result.push('\n');
                        }
                        prev = c;
                    }
                }
                _ => result.push(c),
            }
        }

        result
    }

    /// Replace `{env:NAME}` with the variable's value.
    fn substitute_variables(content: &str) -> CoreResult<String> {
        let mut missing = None;
        let result = var_regex().replace_all(content, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            std::env::var(name).unwrap_or_else(|_| {
                missing = Some(name.to_string());
                String::new()
            })
        });

        if let Some(name) = missing {
            return Err(ConfigError::EnvVarNotFound { name }.into());
        }
        Ok(result.into_owned())
    }
}
