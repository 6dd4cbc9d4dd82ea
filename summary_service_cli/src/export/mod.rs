pub mod branding;
pub mod docx;
pub mod pdf;
pub mod qr;
pub mod txt;

use crate::config::Config;
use crate::error::{ConfigError, ExportError};
use crate::utils::export_filename;
use crate::{ExportFormat, ExportJob, SummaryResult};
use branding::Logo;
use chrono::NaiveDate;
use tracing::info;

/// Files and images the PDF/DOCX renderers embed. Loaded once at startup.
#[derive(Debug, Clone)]
pub struct ExportAssets {
    pub logo: Logo,
    pub font_regular: Option<Vec<u8>>,
    pub font_bold: Option<Vec<u8>>,
}

impl Default for ExportAssets {
    fn default() -> Self {
        Self {
            logo: Logo::generated(),
            font_regular: None,
            font_bold: None,
        }
    }
}

impl ExportAssets {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let logo = match &config.logo_path {
            Some(path) => Logo::load(path)?,
            None => Logo::generated(),
        };
        let font_regular = config.pdf_font_path.as_deref().map(read_asset).transpose()?;
        // Bold falls back to the regular face when only one file is given.
        let font_bold = match config.pdf_font_bold_path.as_deref() {
            Some(path) => Some(read_asset(path)?),
            None => font_regular.clone(),
        };
        Ok(Self {
            logo,
            font_regular,
            font_bold,
        })
    }
}

fn read_asset(path: &str) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|source| ConfigError::Asset {
        path: path.to_string(),
        source,
    })
}

#[derive(Debug, Clone, Default)]
pub struct Exporter {
    assets: ExportAssets,
}

impl Exporter {
    pub fn new(assets: ExportAssets) -> Self {
        Self { assets }
    }

    pub fn render(
        &self,
        result: &SummaryResult,
        format: ExportFormat,
    ) -> Result<ExportJob, ExportError> {
        self.render_dated(result, format, chrono::Local::now().date_naive())
    }

    /// `generated_on` ends up in the DOCX metadata line.
    pub fn render_dated(
        &self,
        result: &SummaryResult,
        format: ExportFormat,
        generated_on: NaiveDate,
    ) -> Result<ExportJob, ExportError> {
        let payload = match format {
            ExportFormat::Pdf => pdf::render(result, &self.assets)?,
            ExportFormat::Txt => txt::render(result),
            ExportFormat::Docx => docx::render(result, &self.assets, generated_on)?,
        };
        let suggested_filename = export_filename(&result.file_stem, format);
        info!("📥 {} hazır ({} bytes)", suggested_filename, payload.len());

        Ok(ExportJob {
            format,
            payload,
            suggested_filename,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{Language, DEFAULT_CAPTION};

    pub(crate) fn sample_result() -> SummaryResult {
        SummaryResult {
            title: "Example".into(),
            summary_text: "Lorem ipsum dolor.".into(),
            source_url: "https://example.com/yazi".into(),
            caption_label: DEFAULT_CAPTION.into(),
            language: Language::Turkish,
            file_stem: "example".into(),
        }
    }

    #[test]
    fn txt_job_has_filename_and_payload() {
        let job = Exporter::default()
            .render(&sample_result(), ExportFormat::Txt)
            .unwrap();
        assert_eq!(job.suggested_filename, "example_ozet.txt");
        assert_eq!(job.payload, b"Example\n\nLorem ipsum dolor.");
        assert_eq!(job.content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn missing_font_file_is_a_config_error() {
        let config = Config {
            pdf_font_path: Some("/definitely/not/here.ttf".into()),
            ..Config::default()
        };
        assert!(matches!(
            ExportAssets::from_config(&config),
            Err(ConfigError::Asset { .. })
        ));
    }
}
