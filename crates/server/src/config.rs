use llm_client::{DEFAULT_API_URL, DEFAULT_MODEL, GeminiClient};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Google API key for the itinerary planner; the planner is off without it
    #[serde(default)]
    pub google_api_key: Option<String>,

    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Gemini REST API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Directory holding the precomputed artifacts
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on a single language model call
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,
}

fn default_gemini_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_gemini_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_llm_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit `(NAME, value)` pairs
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> anyhow::Result<Self> {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The API key, if one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.google_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Build the Gemini client; `MissingApiKey` when no key is configured
    pub fn gemini_client(&self) -> llm_client::Result<GeminiClient> {
        GeminiClient::new(
            self.api_key().unwrap_or_default(),
            self.gemini_api_url.as_str(),
            self.gemini_model.as_str(),
            self.llm_timeout(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_client::LlmError;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vec::new()).unwrap();

        assert_eq!(config.google_api_key, None);
        assert_eq!(config.gemini_model, "gemini-1.5-flash-001");
        assert_eq!(config.gemini_api_url, "https://generativelanguage.googleapis.com/v1beta");
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.llm_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("GOOGLE_API_KEY", "abc"),
            ("ARTIFACTS_DIR", "/srv/artifacts"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("LLM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_key(), Some("abc"));
        assert_eq!(config.artifacts_dir, PathBuf::from("/srv/artifacts"));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.llm_timeout_secs, 5);
        assert!(config.gemini_client().is_ok());
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
    }

    #[test]
    fn test_blank_key_disables_planner() {
        let config = Config::from_vars(vars(&[("GOOGLE_API_KEY", "   ")])).unwrap();

        assert_eq!(config.api_key(), None);
        assert!(matches!(config.gemini_client(), Err(LlmError::MissingApiKey)));
    }
}
