use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_AMADEUS_BASE_URL: &str = "https://test.api.amadeus.com";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";

/// Credentials and base URL for the hotel/location data provider (Amadeus).
#[derive(Clone)]
pub struct AmadeusConfig {
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
}

/// Settings for the generative text provider (Groq, OpenAI-compatible).
#[derive(Clone)]
pub struct GroqConfig {
    /// `None` disables every AI path; callers fall back to rules and templates.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `production` turns missing provider credentials into a start-up error.
    pub environment: String,
    pub amadeus: AmadeusConfig,
    pub groq: GroqConfig,
    /// Timeout applied to every upstream call.
    pub api_timeout_secs: u64,
    /// Longest accepted chat message, in characters.
    pub max_message_chars: usize,
    /// Optional YAML file replacing the built-in static hotel table.
    pub fallback_hotels_path: Option<PathBuf>,
    /// Browser origin allowed by CORS in addition to localhost.
    pub cors_origin: String,
}

impl Config {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Build a config from an arbitrary variable source.
    /// `load()` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = non_empty("TRAVEL_ENV").unwrap_or_else(|| "development".into());
        let client_id = non_empty("AMADEUS_API_KEY");
        let client_secret = non_empty("AMADEUS_API_SECRET");

        if client_id.is_none() || client_secret.is_none() {
            if environment == "production" {
                anyhow::bail!(
                    "AMADEUS_API_KEY and AMADEUS_API_SECRET must be set when TRAVEL_ENV=production"
                );
            }
            tracing::warn!(
                "AMADEUS_API_KEY / AMADEUS_API_SECRET not set; hotel lookups will fail with 503"
            );
        }

        let groq_api_key = non_empty("GROQ_API_KEY");
        if groq_api_key.is_none() {
            tracing::warn!("GROQ_API_KEY not set; using rule-based detection and templated replies");
        }

        Ok(Config {
            host: non_empty("TRAVEL_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: non_empty("TRAVEL_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            environment,
            amadeus: AmadeusConfig {
                client_id: client_id.unwrap_or_default(),
                client_secret: client_secret.unwrap_or_default(),
                base_url: non_empty("AMADEUS_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_AMADEUS_BASE_URL.into())
                    .trim_end_matches('/')
                    .to_string(),
            },
            groq: GroqConfig {
                api_key: groq_api_key,
                base_url: non_empty("GROQ_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.into())
                    .trim_end_matches('/')
                    .to_string(),
                model: non_empty("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.into()),
            },
            api_timeout_secs: non_empty("API_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(15),
            max_message_chars: non_empty("MAX_MESSAGE_CHARS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
            fallback_hotels_path: non_empty("TRAVEL_FALLBACK_HOTELS_PATH").map(PathBuf::from),
            cors_origin: non_empty("TRAVEL_CORS_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".into()),
        })
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    Config::from_lookup(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.amadeus.base_url, DEFAULT_AMADEUS_BASE_URL);
        assert_eq!(cfg.groq.base_url, DEFAULT_GROQ_BASE_URL);
        assert_eq!(cfg.groq.model, DEFAULT_GROQ_MODEL);
        assert!(cfg.groq.api_key.is_none());
        assert_eq!(cfg.api_timeout(), Duration::from_secs(15));
        assert_eq!(cfg.max_message_chars, 2000);
        assert!(cfg.fallback_hotels_path.is_none());
    }

    #[test]
    fn test_reads_credentials_and_trims_base_urls() {
        let cfg = config_from(&[
            ("AMADEUS_API_KEY", "id"),
            ("AMADEUS_API_SECRET", "secret"),
            ("AMADEUS_BASE_URL", "http://localhost:9000/"),
            ("GROQ_API_KEY", "gsk_test"),
            ("TRAVEL_PORT", "9090"),
            ("API_TIMEOUT_SECS", "10"),
        ])
        .unwrap();
        assert_eq!(cfg.amadeus.client_id, "id");
        assert_eq!(cfg.amadeus.client_secret, "secret");
        assert_eq!(cfg.amadeus.base_url, "http://localhost:9000");
        assert_eq!(cfg.groq.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.api_timeout_secs, 10);
    }

    #[test]
    fn test_blank_groq_key_counts_as_missing() {
        let cfg = config_from(&[("GROQ_API_KEY", "   ")]).unwrap();
        assert!(cfg.groq.api_key.is_none());
    }

    #[test]
    fn test_production_requires_amadeus_credentials() {
        let err = config_from(&[("TRAVEL_ENV", "production")]);
        assert!(err.is_err());

        let ok = config_from(&[
            ("TRAVEL_ENV", "production"),
            ("AMADEUS_API_KEY", "id"),
            ("AMADEUS_API_SECRET", "secret"),
        ])
        .unwrap();
        assert!(ok.is_production());
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let cfg = config_from(&[("TRAVEL_PORT", "not-a-port"), ("API_TIMEOUT_SECS", "0")]).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.api_timeout_secs, 15);
    }
}
