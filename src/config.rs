// Service configuration, read from the environment (and `.env` via dotenv).
//
// Every value has a default except the classifier endpoint: leaving
// PET_AI_CLASSIFIER_URL unset is how you run on the keyword fallback.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5000"];
const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where to find the zero-shot classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
    /// `None` pins moderation to the keyword fallback
    pub classifier: Option<ClassifierConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key -> value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Treat blank values the same as missing ones
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("PET_AI_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PET_AI_PORT") {
            Some(raw) => parse_positive(&raw, "PET_AI_PORT")?,
            None => DEFAULT_PORT,
        };
        let bind_addr = format!("{}:{}", host.trim(), port)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "PET_AI_HOST",
                value: host.clone(),
                reason: e.to_string(),
            })?;

        let allowed_origins = match get("PET_AI_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        };

        let classifier = match get("PET_AI_CLASSIFIER_URL") {
            Some(endpoint) => {
                let timeout_secs = match get("PET_AI_CLASSIFIER_TIMEOUT_SECS") {
                    Some(raw) => parse_positive(&raw, "PET_AI_CLASSIFIER_TIMEOUT_SECS")?,
                    None => DEFAULT_CLASSIFIER_TIMEOUT_SECS,
                };

                Some(ClassifierConfig {
                    endpoint: endpoint.trim().to_string(),
                    api_token: get("PET_AI_CLASSIFIER_TOKEN"),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            allowed_origins,
            classifier,
        })
    }
}

/// Parse a non-zero unsigned number.
///
/// A zero port would bind an ephemeral port and a zero timeout fails every
/// classifier call, so both are refused.
fn parse_positive<T>(raw: &str, key: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let invalid = |reason: String| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason,
    };

    let value = raw.trim().parse::<T>().map_err(|e| invalid(e.to_string()))?;
    if value == T::default() {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(value)
}
