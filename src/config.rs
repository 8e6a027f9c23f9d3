use crate::error::AppError;
use std::time::Duration;

pub const APP_NAME: &str = "plant-identifier";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the vision-language model, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionConfig {
    /// `GEMINI_API_KEY`; checked lazily when a request is made
    pub api_key: Option<String>,
    /// `PLANT_ID_MODEL`
    pub model: String,
    /// `PLANT_ID_ENDPOINT`, without trailing slash
    pub endpoint: String,
    /// `PLANT_ID_TIMEOUT_SECS`
    pub timeout: Duration,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl VisionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout = match non_empty("PLANT_ID_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "Ignoring invalid PLANT_ID_TIMEOUT_SECS");
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            api_key: non_empty("GEMINI_API_KEY"),
            model: non_empty("PLANT_ID_MODEL").unwrap_or(defaults.model),
            endpoint: non_empty("PLANT_ID_ENDPOINT")
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or(defaults.endpoint),
            timeout,
        }
    }

    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("GEMINI_API_KEY is not set".to_string()))
    }
}
