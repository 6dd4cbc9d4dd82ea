use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("geçersiz URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("ağ hatası: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} hatası: {url}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
    },
}

#[derive(Debug, Error)]
pub enum SummarizationError {
    #[error("{backend} için API anahtarı tanımlı değil")]
    MissingApiKey { backend: &'static str },

    #[error("özetleme isteği başarısız: {0}")]
    Request(#[from] reqwest::Error),

    #[error("özetleme servisi {status} döndürdü: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("özetleme servisi boş yanıt döndürdü")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("çeviri isteği başarısız: {0}")]
    Request(#[from] reqwest::Error),

    #[error("çeviri servisi {status} döndürdü")]
    Api { status: reqwest::StatusCode },

    #[error("çeviri yanıtı okunamadı: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("QR kodu üretilemedi: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("görsel işlenemedi: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF oluşturulamadı: {0}")]
    Pdf(String),

    #[error("DOCX oluşturulamadı: {0}")]
    Docx(String),

    #[error("dosya hatası: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} için geçersiz değer: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("varlık dosyası okunamadı ({path}): {source}")]
    Asset {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("logo yüklenemedi: {0}")]
    Logo(#[from] image::ImageError),

    #[error("HTTP istemcisi kurulamadı: {0}")]
    Client(#[from] reqwest::Error),

    #[error("{backend} özetleyicisi için API anahtarı tanımlı değil")]
    MissingApiKey { backend: &'static str },
}

/// Everything that can stop a pipeline run. Translation failures are not here:
/// they are recovered inside the pipeline and surfaced as warnings.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("sayfada yeterli yazı içeriği bulunamadı")]
    EmptyContent,

    #[error(transparent)]
    Summarization(#[from] SummarizationError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PipelineError {
    /// Soft failures send the shell back to `Ready` instead of `Error`.
    pub fn is_soft(&self) -> bool {
        matches!(self, PipelineError::EmptyContent)
    }

    /// Text shown to the user. Fetch errors are reported verbatim, the rest generically.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Fetch(e) => format!("Hata oluştu: {}", e),
            PipelineError::EmptyContent => "Sayfada yeterli yazı içeriği bulunamadı.".to_string(),
            PipelineError::Summarization(_) => {
                "Hata oluştu: sayfa özetlenemedi, lütfen tekrar deneyin.".to_string()
            }
            PipelineError::Export(_) => {
                "Hata oluştu: çıktı dosyası oluşturulamadı.".to_string()
            }
        }
    }
}
