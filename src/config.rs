use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VectorizerConfig {
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            min_token_len: default_min_token_len(),
        }
    }
}

fn default_max_features() -> usize {
    5000
}
fn default_min_token_len() -> usize {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_final_limit")]
    pub final_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            final_limit: default_final_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_final_limit() -> usize {
    10
}
fn default_max_limit() -> usize {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7878".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.catalog.path.as_os_str().is_empty() {
        anyhow::bail!("catalog.path must not be empty");
    }

    if config.vectorizer.max_features == 0 {
        anyhow::bail!("vectorizer.max_features must be > 0");
    }

    if config.retrieval.final_limit < 1 {
        anyhow::bail!("retrieval.final_limit must be >= 1");
    }

    if config.retrieval.max_limit < config.retrieval.final_limit {
        anyhow::bail!("retrieval.max_limit must be >= retrieval.final_limit");
    }

    Ok(config)
}
