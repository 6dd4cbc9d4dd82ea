use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Serialize;
use summary_service_cli::{ExportFormat, Language, PROJECT_TITLE};

static INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Serialize)]
struct Choice<T: Serialize> {
    id: T,
    label: &'static str,
}

#[derive(Serialize)]
struct Options {
    title: &'static str,
    formats: Vec<Choice<ExportFormat>>,
    languages: Vec<Choice<Language>>,
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/options
pub async fn options() -> impl IntoResponse {
    Json(Options {
        title: PROJECT_TITLE,
        formats: ExportFormat::ALL
            .iter()
            .map(|f| Choice { id: *f, label: f.label() })
            .collect(),
        languages: Language::ALL
            .iter()
            .map(|l| Choice { id: *l, label: l.label() })
            .collect(),
    })
}
