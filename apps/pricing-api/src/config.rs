//! Service configuration, read from the environment (and `.env` if present)

use anyhow::{Context, Result};
use guideline_engine::ReloadPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3001)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CSV or JSON guideline source
    #[serde(default = "default_guidelines_path")]
    pub guidelines_path: PathBuf,

    /// What a failed reload does to the loaded guidelines
    #[serde(default)]
    pub reload_policy: ReloadPolicy,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_guidelines_path() -> PathBuf {
    PathBuf::from("data/guidelines.json")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            guidelines_path: default_guidelines_path(),
            reload_policy: ReloadPolicy::default(),
        }
    }
}

impl ApiConfig {
    /// Read `HOST`, `PORT`, `GUIDELINES_PATH` and `GUIDELINES_RELOAD_POLICY`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {}", port))?;
        }
        if let Some(path) = lookup("GUIDELINES_PATH") {
            config.guidelines_path = PathBuf::from(path);
        }
        if let Some(policy) = lookup("GUIDELINES_RELOAD_POLICY") {
            config.reload_policy = policy
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid GUIDELINES_RELOAD_POLICY")?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.socket_addr(), "0.0.0.0:3001");
        assert_eq!(config.reload_policy, ReloadPolicy::RetainOnFailure);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("GUIDELINES_PATH", "/etc/pricing/rules.csv"),
            ("GUIDELINES_RELOAD_POLICY", "clear"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
        assert_eq!(config.guidelines_path, PathBuf::from("/etc/pricing/rules.csv"));
        assert_eq!(config.reload_policy, ReloadPolicy::ClearOnFailure);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(ApiConfig::from_lookup(lookup(&[("PORT", "http")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("GUIDELINES_RELOAD_POLICY", "maybe")])).is_err());
    }
}
