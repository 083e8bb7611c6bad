//! Application configuration.
//!
//! Defaults live in code; a `pharmaquery.toml` file overrides them, and the
//! API key additionally falls back to the environment. Repointing the
//! workbook, model, or endpoint never requires a code change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PharmaQueryError, Result};
use crate::llm::LlmConfig;

/// Config file name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pharmaquery.toml";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Path to the sales workbook.
    pub workbook_path: PathBuf,
    /// API credential; falls back to `DEEPSEEK_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Maximum agent reasoning iterations per question.
    pub max_iterations: usize,
    /// Fiscal year assumed when a question names none.
    pub default_year: u16,
    /// Port for the web UI server.
    pub port: u16,
    /// Optional JSON file overriding the built-in routing rules.
    pub rules_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from("sales_workbook.xlsx"),
            api_key: None,
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            max_iterations: 10,
            default_year: 2025,
            port: 3141,
            rules_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PharmaQueryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Load from an explicit path, from `pharmaquery.toml` in the working
    /// directory if present, or fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Resolve the API credential: config value first, then environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        std::env::var("DEEPSEEK_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                PharmaQueryError::Config(
                    "no API key: set api_key in pharmaquery.toml or the DEEPSEEK_API_KEY \
                     environment variable"
                        .to_string(),
                )
            })
    }

    /// LLM client configuration derived from this config.
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            ..LlmConfig::default()
        }
    }
}
