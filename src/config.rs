use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
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
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model_name")]
    pub name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            name: default_model_name(),
        }
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model_name() -> String {
    "gemini-2.0-flash".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_max_articles")]
    pub max_articles: i64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_articles: default_max_articles(),
        }
    }
}

fn default_max_articles() -> i64 {
    3
}

impl ModelConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

/// Load configuration from a TOML file.
///
/// A missing file is not an error: every setting has a default, so the
/// service can run from environment variables alone. A file that exists
/// but fails to parse or validate is still fatal.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if config.retrieval.max_articles < 1 {
        anyhow::bail!("retrieval.max_articles must be >= 1");
    }

    match config.model.provider.as_str() {
        "gemini" | "disabled" => {}
        other => anyhow::bail!(
            "Unknown model provider: '{}'. Must be gemini or disabled.",
            other
        ),
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deskchat.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.model.provider, "gemini");
        assert_eq!(config.retrieval.max_articles, 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let (_tmp, path) = write_config(
            r#"[server]
bind = "0.0.0.0:9000"
"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.model.name, "gemini-2.0-flash");
        assert_eq!(config.retrieval.max_articles, 3);
    }

    #[test]
    fn test_rejects_zero_max_articles() {
        let (_tmp, path) = write_config(
            r#"[retrieval]
max_articles = 0
"#,
        );
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let (_tmp, path) = write_config(
            r#"[model]
provider = "llama"
"#,
        );
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_disabled_provider_accepted() {
        let (_tmp, path) = write_config(
            r#"[model]
provider = "disabled"
"#,
        );
        let config = load_config(&path).unwrap();
        assert!(!config.model.is_enabled());
    }
}
