use crate::error::TranslationError;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` into `target` (ISO 639-1), source language auto-detected.
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError>;
}

/// The three strings that get translated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationBatch {
    pub title: String,
    pub summary: String,
    pub caption: String,
}

/// Translates the whole batch or nothing.
///
/// On error the caller still owns the untouched input batch, so a failure can
/// never leave the title translated while the summary is not.
pub async fn translate_batch(
    translator: &dyn Translator,
    batch: &TranslationBatch,
    target: &str,
) -> Result<TranslationBatch, TranslationError> {
    info!("🌍 Çeviri yapılıyor: {}", target);
    let (title, summary, caption) = futures::try_join!(
        translator.translate(&batch.title, target),
        translator.translate(&batch.summary, target),
        translator.translate(&batch.caption, target),
    )?;
    Ok(TranslationBatch { title, summary, caption })
}

/// Google Translate's public `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        // Text goes in the form body; summaries are too long for a query string.
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("client", "gtx"), ("sl", "auto"), ("tl", target), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Api { status });
        }

        let body = response.json::<Value>().await?;
        let translated = parse_segments(&body)?;
        debug!("Translated {} chars into {} chars ({})", text.len(), translated.len(), target);
        Ok(translated)
    }
}

/// The response is `[[["çeviri", "kaynak", ...], ...], ...]`; the first column
/// of every segment concatenated is the translation.
fn parse_segments(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Malformed(body.to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::Malformed(body.to_string()));
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Upper;

    #[async_trait]
    impl Translator for Upper {
        async fn translate(&self, text: &str, _target: &str) -> Result<String, TranslationError> {
            Ok(text.to_uppercase())
        }
    }

    /// Fails only for the summary, after the title call has already succeeded.
    struct FailsOnSummary;

    #[async_trait]
    impl Translator for FailsOnSummary {
        async fn translate(&self, text: &str, _target: &str) -> Result<String, TranslationError> {
            if text.starts_with("özet") {
                Err(TranslationError::Malformed("boom".into()))
            } else {
                Ok(format!("tr:{}", text))
            }
        }
    }

    fn batch() -> TranslationBatch {
        TranslationBatch {
            title: "başlık".into(),
            summary: "özet metni".into(),
            caption: crate::DEFAULT_CAPTION.into(),
        }
    }

    #[tokio::test]
    async fn translates_all_three() {
        let out = translate_batch(&Upper, &batch(), "en").await.unwrap();
        assert_eq!(out.title, "BAŞLIK");
        assert_eq!(out.summary, "ÖZET METNI");
        assert_eq!(out.caption, crate::DEFAULT_CAPTION.to_uppercase());
    }

    #[tokio::test]
    async fn partial_failure_commits_nothing() {
        let original = batch();
        let result = translate_batch(&FailsOnSummary, &original, "en").await;
        assert!(result.is_err());
        assert_eq!(original, batch());
    }

    #[test]
    fn parses_multi_segment_response() {
        let body = json!([[["Hello. ", "Merhaba. ", null, null, 10], ["World", "Dünya", null]], null, "tr"]);
        assert_eq!(parse_segments(&body).unwrap(), "Hello. World");
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(parse_segments(&json!({"error": "nope"})).is_err());
        assert!(parse_segments(&json!([[]])).is_err());
    }
}
