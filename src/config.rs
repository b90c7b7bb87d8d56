use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 10;

/// Settings read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub bind_addr: String,
    pub max_upload_mb: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let google_api_key = lookup("GOOGLE_API_KEY").unwrap_or_else(|| {
            log::warn!("⚠️ GOOGLE_API_KEY not set, every advice request will fail");
            String::new()
        });

        let max_upload_mb = match lookup("MAX_UPLOAD_MB") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_MB must be a whole number, got '{}'", raw))?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };

        Ok(Self {
            google_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_upload_mb,
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("GOOGLE_API_KEY", "abc")]).unwrap();

        assert_eq!(config.google_api_key, "abc");
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.max_upload_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_missing_key_is_not_fatal() {
        let config = config_from(&[]).unwrap();

        assert!(config.google_api_key.is_empty());
    }

    #[test]
    fn test_bad_upload_limit_is_rejected() {
        let err = config_from(&[("MAX_UPLOAD_MB", "lots")]).unwrap_err();

        assert!(err.to_string().contains("MAX_UPLOAD_MB"));
    }
}
