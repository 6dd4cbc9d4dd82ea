use crate::error::ConfigError;
use std::env;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummarizerBackend {
    HuggingFace,
    OpenAi,
}

impl SummarizerBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(SummarizerBackend::HuggingFace),
            "openai" => Ok(SummarizerBackend::OpenAi),
            _ => Err(ConfigError::Invalid {
                key: "SUMMARIZER_BACKEND",
                value: value.to_string(),
            }),
        }
    }
}

/// Runtime settings, read from the environment (and `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    pub summarizer_backend: SummarizerBackend,
    // --- Hugging Face inference ---
    pub hf_api_token: Option<String>,
    pub hf_api_base_url: String,
    pub hf_model: String,
    // --- OpenAI uyumlu API ---
    pub openai_api_key: Option<String>,
    pub openai_api_base_url: String,
    pub openai_model: String,
    // --- Çeviri ---
    pub translate_api_url: String,
    pub http_timeout: Duration,
    // --- Export assets ---
    pub pdf_font_path: Option<String>,
    pub pdf_font_bold_path: Option<String>,
    pub logo_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summarizer_backend: SummarizerBackend::HuggingFace,
            hf_api_token: None,
            hf_api_base_url: "https://router.huggingface.co/hf-inference/models".to_string(),
            hf_model: "facebook/bart-large-cnn".to_string(),
            openai_api_key: None,
            openai_api_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            translate_api_url: "https://translate.googleapis.com/translate_a/single".to_string(),
            http_timeout: Duration::from_secs(30),
            pdf_font_path: None,
            pdf_font_bold_path: None,
            logo_path: None,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads every key with a fallback to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but over an arbitrary key lookup; keeps tests off the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let summarizer_backend = match get("SUMMARIZER_BACKEND") {
            Some(v) => SummarizerBackend::parse(&v)?,
            None => default.summarizer_backend,
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    key: "HTTP_TIMEOUT_SECS",
                    value: v,
                })?,
            None => default.http_timeout,
        };

        Ok(Self {
            summarizer_backend,
            hf_api_token: get("HF_API_TOKEN"),
            hf_api_base_url: get("HF_API_BASE_URL").unwrap_or(default.hf_api_base_url),
            hf_model: get("HF_MODEL").unwrap_or(default.hf_model),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_api_base_url: get("OPENAI_API_BASE_URL").unwrap_or(default.openai_api_base_url),
            openai_model: get("OPENAI_MODEL").unwrap_or(default.openai_model),
            translate_api_url: get("TRANSLATE_API_URL").unwrap_or(default.translate_api_url),
            http_timeout,
            pdf_font_path: get("PDF_FONT_PATH"),
            pdf_font_bold_path: get("PDF_FONT_BOLD_PATH"),
            logo_path: get("LOGO_PATH"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.summarizer_backend, SummarizerBackend::HuggingFace);
        assert_eq!(config.hf_model, "facebook/bart-large-cnn");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(config.pdf_font_path.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SUMMARIZER_BACKEND", "OpenAI"),
            ("OPENAI_API_KEY", "sk-test"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("LOGO_PATH", "  "),
        ]))
        .unwrap();
        assert_eq!(config.summarizer_backend, SummarizerBackend::OpenAi);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert!(config.logo_path.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("SUMMARIZER_BACKEND", "gpt2")])).is_err());
        assert!(Config::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "yarım")])).is_err());
    }
}
