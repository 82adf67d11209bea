//! Trip Companion configuration types and loading

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables consulted for a Gemini key when the configured one is unset
const GEMINI_KEY_FALLBACKS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY", "GOOGLE_GEMINI_API_KEY"];

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Weather service configuration
    pub weather: WeatherConfig,

    /// Geocoding service configuration
    pub geocoding: GeocodingConfig,

    /// Prompt template configuration
    pub prompts: PromptsConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that an LLM API key can be resolved. Call this before any command
    /// that talks to the language model to fail fast with a clear message.
    pub fn validate(&self) -> Result<()> {
        self.llm.get_api_key().map(|_| ())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripcompanion.yml
        let local_config = PathBuf::from(".tripcompanion.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripcompanion/tripcompanion.yml
        if let Some(user_config) = user_config_path()
            && user_config.exists()
        {
            match Self::load_from_file(&user_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialized
    ///
    /// Errors are ignored: the full load that follows reports them properly.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => {
                let mut paths = vec![PathBuf::from(".tripcompanion.yml")];
                paths.extend(user_config_path());
                paths
            }
        };

        candidates
            .into_iter()
            .find(|p| p.exists())
            .and_then(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tripcompanion").join("tripcompanion.yml"))
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("gemini" or "anthropic")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_tokens: 8192,
            timeout_ms: 120_000,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from the environment
    ///
    /// The configured variable wins. For the gemini provider the usual Google
    /// variable names are tried after it.
    pub fn get_api_key(&self) -> Result<String> {
        debug!(provider = %self.provider, env = %self.api_key_env, "get_api_key: called");
        let mut names = vec![self.api_key_env.as_str()];
        if self.provider == "gemini" {
            names.extend(GEMINI_KEY_FALLBACKS.iter().filter(|n| **n != self.api_key_env));
        }

        names
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                eyre!(
                    "LLM API key not found. Set the {} environment variable.",
                    self.api_key_env
                )
            })
    }
}

/// Temperature units requested from the weather service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Query-string value understood by OpenWeather
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    /// Suffix used when printing a temperature
    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Environment variable containing the OpenWeather API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Forecast API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Geocoding API URL used to resolve a destination to coordinates
    #[serde(rename = "geo-url")]
    pub geo_url: String,

    /// Units for temperatures and wind speed
    pub units: Units,

    /// Default number of forecast days
    pub days: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENWEATHER_API_KEY".to_string(),
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            geo_url: "https://api.openweathermap.org/geo/1.0/direct".to_string(),
            units: Units::Metric,
            days: 5,
            timeout_ms: 30_000,
        }
    }
}

impl WeatherConfig {
    /// API key, if one is set. Weather is optional, so absence is not an error.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|v| !v.trim().is_empty())
    }
}

/// Geocoding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Nominatim base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// User-Agent header (Nominatim rejects anonymous clients)
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("tripcompanion/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 10_000,
        }
    }
}

/// Prompt template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory searched for `{name}.pmt` overrides before the embedded templates
    pub dir: PathBuf,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".tripcompanion/prompts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.weather.units, Units::Metric);
        assert_eq!(config.weather.days, 5);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_llm_config_defaults() {
        let config = LlmConfig::default();

        assert_eq!(config.provider, "gemini");
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: debug

llm:
  provider: anthropic
  model: claude-sonnet-4
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-tokens: 4096
  timeout-ms: 60000

weather:
  units: imperial
  days: 3

geocoding:
  user-agent: test-agent/1.0

prompts:
  dir: /etc/tripcompanion/prompts
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.weather.units, Units::Imperial);
        assert_eq!(config.weather.days, 3);
        assert_eq!(config.geocoding.user_agent, "test-agent/1.0");
        assert_eq!(config.prompts.dir, PathBuf::from("/etc/tripcompanion/prompts"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gemini-1.5-pro
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gemini-1.5-pro");
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.weather.api_key_env, "OPENWEATHER_API_KEY");
        assert_eq!(config.geocoding.base_url, "https://nominatim.openstreetmap.org");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tc.yml");
        fs::write(&path, "log-level: warn\nweather:\n  days: 2\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.weather.days, 2);
        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("warn"));
    }

    #[test]
    fn test_load_explicit_path_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yml");
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load_log_level(Some(&path)).is_none());
    }

    #[test]
    fn test_units_symbols() {
        assert_eq!(Units::Metric.temperature_symbol(), "°C");
        assert_eq!(Units::Imperial.as_query(), "imperial");
    }

    #[test]
    #[serial]
    fn test_api_key_configured_var_wins() {
        unsafe {
            std::env::set_var("TC_TEST_LLM_KEY", "primary");
            std::env::set_var("GOOGLE_API_KEY", "fallback");
        }
        let config = LlmConfig {
            api_key_env: "TC_TEST_LLM_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.get_api_key().unwrap(), "primary");
        unsafe {
            std::env::remove_var("TC_TEST_LLM_KEY");
            std::env::remove_var("GOOGLE_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_api_key_gemini_fallbacks() {
        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
            std::env::remove_var("GOOGLE_GEMINI_API_KEY");
            std::env::set_var("GOOGLE_API_KEY", "from-google");
        }
        let config = LlmConfig::default();
        assert_eq!(config.get_api_key().unwrap(), "from-google");
        unsafe {
            std::env::remove_var("GOOGLE_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_api_key_missing_is_error() {
        unsafe {
            std::env::remove_var("TC_TEST_MISSING_KEY");
        }
        let config = LlmConfig {
            provider: "anthropic".to_string(),
            api_key_env: "TC_TEST_MISSING_KEY".to_string(),
            ..Default::default()
        };
        let err = config.get_api_key().unwrap_err();
        assert!(err.to_string().contains("TC_TEST_MISSING_KEY"));
    }
}
