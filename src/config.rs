use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration. The bearer token comes from the
/// `COPYCATCH_BEARER_TOKEN` environment variable when set, otherwise from
/// the config file; everything else has defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bearer_token: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.twitter.com".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Config {
    /// Config file location: `<config dir>/copycatch/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("copycatch").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path();
        let mut config = match &path {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Config {
                bearer_token: String::new(),
                api_url: default_api_url(),
                timeout_secs: default_timeout_secs(),
            },
        };

        if let Ok(token) = std::env::var("COPYCATCH_BEARER_TOKEN") {
            if !token.is_empty() {
                config.bearer_token = token;
            }
        }

        if config.bearer_token.is_empty() {
            anyhow::bail!(
                "no bearer token: set COPYCATCH_BEARER_TOKEN or add bearer_token to {}",
                path.as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the config file".to_string())
            );
        }

        Ok(config)
    }

    fn from_file(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bearer_token = \"abc123\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.bearer_token, "abc123");
        assert_eq!(config.api_url, "https://api.twitter.com");
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn test_from_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bearer_token = \"abc123\"").unwrap();
        writeln!(file, "api_url = \"http://localhost:9999\"").unwrap();
        writeln!(file, "timeout_secs = 5").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_url, "http://localhost:9999");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml at all {{").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }
}
