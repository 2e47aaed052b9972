use std::time::Duration;

use business::domain::receipt::value_objects::Strictness;
use vision::client::DEFAULT_TIMEOUT;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Inference service backing receipt extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceProvider {
    Gemini,
    OpenAI,
}

impl InferenceProvider {
    fn api_key_var(&self) -> &'static str {
        match self {
            InferenceProvider::Gemini => "GEMINI_API_KEY",
            InferenceProvider::OpenAI => "OPENAI_API_KEY",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            InferenceProvider::Gemini => vision::gemini::DEFAULT_MODEL,
            InferenceProvider::OpenAI => vision::openai::DEFAULT_MODEL,
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            InferenceProvider::Gemini => vision::gemini::DEFAULT_BASE_URL,
            InferenceProvider::OpenAI => vision::openai::DEFAULT_BASE_URL,
        }
    }
}

impl std::fmt::Display for InferenceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceProvider::Gemini => write!(f, "gemini"),
            InferenceProvider::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for InferenceProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemini" => Ok(InferenceProvider::Gemini),
            "openai" => Ok(InferenceProvider::OpenAI),
            _ => Err(format!("Invalid inference provider: {}", s)),
        }
    }
}

/// Configuration for the receipt extraction pipeline.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub provider: InferenceProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub strictness: Strictness,
}

impl InferenceConfig {
    /// Load inference configuration from environment variables
    ///
    /// Environment variables:
    /// - INFERENCE_PROVIDER: "gemini" or "openai" (default: "gemini")
    /// - GEMINI_API_KEY / OPENAI_API_KEY: credential of the selected provider
    /// - INFERENCE_MODEL: model name (default: provider specific)
    /// - INFERENCE_BASE_URL: API base URL (default: provider specific)
    /// - INFERENCE_TIMEOUT_SECS: request timeout in seconds (default: 30)
    /// - NORMALIZATION_STRICTNESS: "lenient" or "strict" (default: "lenient")
    ///
    /// A missing credential is not an error here; extraction requests fail instead.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match var("INFERENCE_PROVIDER") {
            Some(raw) => parse_var("INFERENCE_PROVIDER", &raw)?,
            None => InferenceProvider::Gemini,
        };

        let timeout = match var("INFERENCE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = parse_var("INFERENCE_TIMEOUT_SECS", &raw)?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "INFERENCE_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let strictness = match var("NORMALIZATION_STRICTNESS") {
            Some(raw) => parse_var("NORMALIZATION_STRICTNESS", &raw)?,
            None => Strictness::default(),
        };

        Ok(Self {
            provider,
            api_key: var(provider.api_key_var()),
            model: var("INFERENCE_MODEL").unwrap_or_else(|| provider.default_model().to_string()),
            base_url: var("INFERENCE_BASE_URL")
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            timeout,
            strictness,
        })
    }
}

fn parse_var<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .to_ascii_lowercase()
        .parse::<T>()
        .map_err(|e| ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<InferenceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        InferenceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn should_default_to_gemini_with_thirty_second_timeout() {
        // Arrange
        let vars = [("GEMINI_API_KEY", "gemini-key")];

        // Act
        let config = config_from(&vars).unwrap();

        // Assert
        assert_eq!(config.provider, InferenceProvider::Gemini);
        assert_eq!(config.api_key.as_deref(), Some("gemini-key"));
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.strictness, Strictness::Lenient);
    }

    #[test]
    fn should_read_credential_of_selected_provider() {
        let config = config_from(&[
            ("INFERENCE_PROVIDER", "OpenAI"),
            ("GEMINI_API_KEY", "gemini-key"),
            ("OPENAI_API_KEY", "openai-key"),
        ])
        .unwrap();

        assert_eq!(config.provider, InferenceProvider::OpenAI);
        assert_eq!(config.api_key.as_deref(), Some("openai-key"));
        assert_eq!(config.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn should_allow_missing_credential() {
        let config = config_from(&[("GEMINI_API_KEY", "   ")]).unwrap();

        assert!(config.api_key.is_none());
    }

    #[test]
    fn should_apply_overrides() {
        let config = config_from(&[
            ("INFERENCE_MODEL", "gemini-2.0-flash"),
            ("INFERENCE_BASE_URL", "http://localhost:9999"),
            ("INFERENCE_TIMEOUT_SECS", "5"),
            ("NORMALIZATION_STRICTNESS", "strict"),
        ])
        .unwrap();

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.strictness, Strictness::Strict);
    }

    #[test]
    fn should_reject_unknown_provider() {
        let result = config_from(&[("INFERENCE_PROVIDER", "tesseract")]);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "INFERENCE_PROVIDER", .. })
        ));
    }

    #[test]
    fn should_reject_zero_or_non_numeric_timeout() {
        assert!(config_from(&[("INFERENCE_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("INFERENCE_TIMEOUT_SECS", "soon")]).is_err());
    }
}
