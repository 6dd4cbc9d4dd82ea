use crate::config::{Config, SummarizerBackend};
use crate::error::{ConfigError, SummarizationError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

/// One forward pass of an abstractive summarization model over a single chunk.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, chunk: &str) -> Result<String, SummarizationError>;
}

/// Summarizes every chunk independently, in order, and joins the results with `\n`.
pub async fn summarize_chunks(
    summarizer: &dyn Summarizer,
    chunks: &[&str],
) -> Result<String, SummarizationError> {
    let mut summaries = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        debug!("Summarizing chunk {}/{} ({} chars)", i + 1, chunks.len(), chunk.chars().count());
        summaries.push(summarizer.summarize(chunk).await?);
    }
    info!("📝 {} parça özetlendi", summaries.len());
    Ok(summaries.join("\n"))
}

pub fn build_summarizer(
    config: &Config,
    client: reqwest::Client,
) -> Result<Box<dyn Summarizer>, ConfigError> {
    Ok(match config.summarizer_backend {
        SummarizerBackend::HuggingFace => Box::new(HuggingFaceSummarizer::new(
            client,
            &config.hf_api_base_url,
            &config.hf_model,
            config.hf_api_token.clone(),
        )),
        SummarizerBackend::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or(ConfigError::MissingApiKey { backend: "openai" })?;
            Box::new(OpenAiSummarizer::new(
                client,
                &config.openai_api_base_url,
                &config.openai_model,
                api_key,
            ))
        }
    })
}

/// Hosted inference for a seq2seq summarization model (bart-large-cnn by default).
pub struct HuggingFaceSummarizer {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

#[derive(Deserialize)]
struct HfSummary {
    summary_text: String,
}

impl HuggingFaceSummarizer {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str, api_token: Option<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), model),
            api_token,
        }
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, chunk: &str) -> Result<String, SummarizationError> {
        // Greedy decoding: the pipeline must be deterministic.
        let payload = json!({
            "inputs": chunk,
            "parameters": { "do_sample": false },
            "options": { "wait_for_model": true }
        });

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationError::Api { status, body });
        }

        let result = response.json::<Vec<HfSummary>>().await?;
        result
            .into_iter()
            .next()
            .map(|s| s.summary_text.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(SummarizationError::EmptyResponse)
    }
}

/// Chat-completions backed summarizer for OpenAI compatible APIs.
pub struct OpenAiSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiSummarizer {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str, api_key: String) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, chunk: &str) -> Result<String, SummarizationError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| SummarizationError::MissingApiKey { backend: "openai" })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let payload = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a news summarization model. Write a short abstractive summary of the given text in the same language as the text. Reply with the summary only."
                },
                {
                    "role": "user",
                    "content": chunk
                }
            ],
            "temperature": 0.0,
            "max_tokens": 400
        });

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationError::Api { status, body });
        }

        let result = response.json::<serde_json::Value>().await?;
        result["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(SummarizationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Summarizer for Recording {
        async fn summarize(&self, chunk: &str) -> Result<String, SummarizationError> {
            self.seen.lock().unwrap().push(chunk.to_string());
            Ok(format!("<{}>", chunk))
        }
    }

    struct FailsOnSecond;

    #[async_trait]
    impl Summarizer for FailsOnSecond {
        async fn summarize(&self, chunk: &str) -> Result<String, SummarizationError> {
            if chunk == "b" {
                Err(SummarizationError::EmptyResponse)
            } else {
                Ok(chunk.to_string())
            }
        }
    }

    #[tokio::test]
    async fn joins_one_summary_per_chunk_in_order() {
        let summarizer = Recording { seen: Mutex::new(Vec::new()) };
        let out = summarize_chunks(&summarizer, &["a", "b", "c"]).await.unwrap();
        assert_eq!(out, "<a>\n<b>\n<c>");
        assert_eq!(*summarizer.seen.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn any_chunk_failure_aborts() {
        let err = summarize_chunks(&FailsOnSecond, &["a", "b", "c"]).await.unwrap_err();
        assert!(matches!(err, SummarizationError::EmptyResponse));
    }

    #[test]
    fn openai_backend_requires_a_key() {
        let config = Config {
            summarizer_backend: SummarizerBackend::OpenAi,
            ..Config::default()
        };
        let err = build_summarizer(&config, reqwest::Client::new()).err().unwrap();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn hf_endpoint_includes_model() {
        let s = HuggingFaceSummarizer::new(
            reqwest::Client::new(),
            "https://example.com/models/",
            "facebook/bart-large-cnn",
            None,
        );
        assert_eq!(s.endpoint, "https://example.com/models/facebook/bart-large-cnn");
    }
}
