pub mod ai;
pub mod chunker;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod scraper;
pub mod shell;
pub mod translator;
pub mod utils;

use serde::{Deserialize, Serialize};

/// Marka başlığı; PDF header ve DOCX başlığında kullanılır.
pub const PROJECT_TITLE: &str = "AI Web Sayfası Özeti";

/// Caption rendered next to the source URL in every export.
pub const DEFAULT_CAPTION: &str = "Bu özetin kaynağı:";

/// Title used when the page has no usable `<title>`.
pub const TITLE_PLACEHOLDER: &str = "ozet";

pub const FILENAME_SUFFIX: &str = "_ozet";

/// Maximum number of characters handed to the summarization model at once.
pub const CHUNK_SIZE: usize = 1000;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub title: String,
    pub meta_description: Option<String>,
    pub body_text: String,
}

impl PageContent {
    pub fn new(title: String, body_text: String) -> Self {
        Self {
            title,
            meta_description: None,
            body_text,
        }
    }

    /// Title with the meta description appended; only feeds the filename slug.
    pub fn labeled_title(&self) -> String {
        match &self.meta_description {
            Some(desc) => format!("{} - {}", self.title, desc),
            None => self.title.clone(),
        }
    }

    pub fn content_length(&self) -> usize {
        self.body_text.chars().count()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub title: String,
    pub summary_text: String,
    pub source_url: String,
    pub caption_label: String,
    pub language: Language,
    /// Slug computed from the untranslated labeled title.
    pub file_stem: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Txt,
    Docx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Txt, ExportFormat::Docx];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Txt => "txt",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Txt => "TXT",
            ExportFormat::Docx => "DOCX",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Target languages offered by the UI. `Turkish` means "no translation".
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Turkish,
    English,
    German,
    French,
    Spanish,
    Italian,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Turkish,
        Language::English,
        Language::German,
        Language::French,
        Language::Spanish,
        Language::Italian,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Language::Turkish => "Türkçe",
            Language::English => "English",
            Language::German => "Deutsch (Almanca)",
            Language::French => "Français",
            Language::Spanish => "Español",
            Language::Italian => "Italiano",
        }
    }

    /// Translation target code, `None` when the summary stays as produced.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Language::Turkish => None,
            Language::English => Some("en"),
            Language::German => Some("de"),
            Language::French => Some("fr"),
            Language::Spanish => Some("es"),
            Language::Italian => Some("it"),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.label() == label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub format: ExportFormat,
    pub payload: Vec<u8>,
    pub suggested_filename: String,
}

impl ExportJob {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}
