use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::download::CredentialMode;

pub const DEFAULT_BASE_URL: &str = "https://civitai.com";

/// Optional overrides read from a TOML file. Every field may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub base_url: Option<String>,
    pub token_env: Option<String>,
    pub wget_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub credential_mode: Option<CredentialMode>,
}

impl Config {
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/')
    }

    pub fn token_env(&self) -> &str {
        self.token_env.as_deref().unwrap_or(crate::model::TOKEN_ENV)
    }
}
