use crate::ai::{build_summarizer, summarize_chunks, Summarizer};
use crate::chunker::chunk_text;
use crate::config::Config;
use crate::error::{ConfigError, PipelineError};
use crate::export::{ExportAssets, Exporter};
use crate::scraper::{extract_page, http_client, Fetcher};
use crate::translator::{translate_batch, GoogleTranslator, TranslationBatch, Translator};
use crate::utils::slugify;
use crate::{ExportFormat, ExportJob, Language, SummaryResult, CHUNK_SIZE, DEFAULT_CAPTION};
use async_trait::async_trait;
use tracing::{error, info, warn};

/// What the user asked for when pressing the button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineCommand {
    pub url: String,
    pub format: ExportFormat,
    pub language: Language,
}

/// A finished run: the summary on screen and the file ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub summary: SummaryResult,
    pub export: ExportJob,
    /// Set when translation failed and the untranslated batch was kept.
    pub translation_warning: Option<String>,
}

/// Boundary the presentation layer dispatches commands to and awaits.
#[async_trait]
pub trait PipelineExecutor: Send + Sync {
    async fn execute(&self, command: &PipelineCommand) -> Result<RunOutput, PipelineError>;
}

/// fetch → extract → chunk → summarize → translate → export
pub struct Pipeline {
    fetcher: Fetcher,
    summarizer: Box<dyn Summarizer>,
    translator: Box<dyn Translator>,
    exporter: Exporter,
}

impl Pipeline {
    pub fn new(
        fetcher: Fetcher,
        summarizer: Box<dyn Summarizer>,
        translator: Box<dyn Translator>,
        exporter: Exporter,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            translator,
            exporter,
        }
    }

    /// Wires the real backends from configuration. One HTTP client is shared.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let client = http_client(config.http_timeout)?;
        let fetcher = Fetcher::new(client.clone());
        let summarizer = build_summarizer(config, client.clone())?;
        let translator = GoogleTranslator::new(client, config.translate_api_url.clone());
        let exporter = Exporter::new(ExportAssets::from_config(config)?);
        Ok(Self::new(fetcher, summarizer, Box::new(translator), exporter))
    }

    async fn run(&self, command: &PipelineCommand) -> Result<RunOutput, PipelineError> {
        let html = self.fetcher.fetch(&command.url).await?;
        let page = extract_page(&html)?;
        let file_stem = slugify(&page.labeled_title());

        let chunks = chunk_text(&page.body_text, CHUNK_SIZE);
        info!("Sayfa {} parçaya bölündü", chunks.len());
        let summary_text = summarize_chunks(self.summarizer.as_ref(), &chunks).await?;

        let mut batch = TranslationBatch {
            title: page.title,
            summary: summary_text,
            caption: DEFAULT_CAPTION.to_string(),
        };
        let mut translation_warning = None;

        if let Some(target) = command.language.code() {
            match translate_batch(self.translator.as_ref(), &batch, target).await {
                Ok(translated) => batch = translated,
                Err(e) => {
                    warn!("❌ Çeviri yapılamadı: {}", e);
                    translation_warning = Some(format!("❌ Çeviri yapılamadı: {}", e));
                }
            }
        }

        let summary = SummaryResult {
            title: batch.title,
            summary_text: batch.summary,
            source_url: command.url.clone(),
            caption_label: batch.caption,
            language: command.language,
            file_stem,
        };
        let export = self.exporter.render(&summary, command.format)?;

        Ok(RunOutput {
            summary,
            export,
            translation_warning,
        })
    }
}

#[async_trait]
impl PipelineExecutor for Pipeline {
    async fn execute(&self, command: &PipelineCommand) -> Result<RunOutput, PipelineError> {
        info!("🚀 Özetleme başladı: {}", command.url);
        let outcome = self.run(command).await;
        match &outcome {
            Ok(out) => info!("✅ Özet hazır: {}", out.export.suggested_filename),
            Err(e) if e.is_soft() => warn!("{}", e),
            Err(e) => error!("Özetleme başarısız: {}", e),
        }
        outcome
    }
}
