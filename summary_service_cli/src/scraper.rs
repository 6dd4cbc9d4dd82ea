use crate::error::{FetchError, PipelineError};
use crate::{PageContent, TITLE_PLACEHOLDER};
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = concat!("summary_service_cli/", env!("CARGO_PKG_VERSION"));

static TITLE: LazyLock<Selector> = LazyLock::new(|| css("title"));
static META_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| css("meta[name='description']"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| css("p"));

fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector must parse")
}

/// Tek sayfa indirir; link takibi, tekrar deneme yok.
pub struct Fetcher {
    client: Client,
}

/// The HTTP client every outbound call of a run goes through.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url.trim()).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        info!("🔍 Sayfa çekiliyor: {}", parsed);
        let res = self.client.get(parsed.as_str()).send().await?;

        if !res.status().is_success() {
            warn!("❌ {} HTTP error: {}", parsed, res.status());
            return Err(FetchError::Http {
                status: res.status(),
                url: parsed.to_string(),
            });
        }

        let body = res.text().await?;
        debug!("{} bytes received from {}", body.len(), parsed);
        Ok(body)
    }
}

/// Builds a `PageContent` from raw HTML.
///
/// The body is every `<p>` text concatenated as-is, with no separator. A page
/// whose paragraphs are all blank yields `PipelineError::EmptyContent`.
pub fn extract_page(html: &str) -> Result<PageContent, PipelineError> {
    let doc = Html::parse_document(html);

    let body_text: String = doc
        .select(&PARAGRAPH)
        .flat_map(|el| el.text())
        .collect();

    if body_text.trim().is_empty() {
        warn!("Sayfada yeterli yazı içeriği bulunamadı.");
        return Err(PipelineError::EmptyContent);
    }

    let title = doc
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let mut page = PageContent::new(title, body_text);

    // Meta description
    if let Some(meta) = doc.select(&META_DESCRIPTION).next() {
        if let Some(content) = meta.value().attr("content") {
            let content = content.trim();
            if !content.is_empty() {
                page.meta_description = Some(content.to_string());
            }
        }
    }

    debug!(
        "Extracted '{}' with {} characters of paragraph text",
        page.title,
        page.content_length()
    );
    Ok(page)
}
