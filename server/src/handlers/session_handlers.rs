use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use summary_service_cli::shell::{Session, ShellEvent};
use summary_service_cli::utils::content_disposition;
use summary_service_cli::{ExportFormat, Language};
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

/// Partial update of the three inputs; missing fields are left alone.
#[derive(Debug, Default, Deserialize)]
pub struct SessionInputPayload {
    pub url: Option<String>,
    pub format: Option<ExportFormat>,
    pub language: Option<Language>,
}

#[derive(Serialize, Debug)]
pub struct SessionView {
    pub session_id: Uuid,
    pub state: &'static str,
    pub url: String,
    pub format: ExportFormat,
    pub language: Language,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub filename: Option<String>,
}

impl SessionView {
    fn of(session_id: Uuid, session: &Session) -> Self {
        let summary = session.summary();
        SessionView {
            session_id,
            state: session.state.name(),
            url: session.url.clone(),
            format: session.format,
            language: session.language,
            warning: session.warning.clone(),
            error: session.error().map(str::to_string),
            title: summary.map(|s| s.title.clone()),
            summary: summary.map(|s| s.summary_text.clone()),
            filename: session.export().map(|e| e.suggested_filename.clone()),
        }
    }
}

fn session_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Oturum bulunamadı" })),
    )
        .into_response()
}

/// POST /api/sessions
pub async fn create_session(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let session_id = state.create_session();
    debug!("Yeni oturum: {}", session_id);
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.read(&id, |s| SessionView::of(id, s)) {
        Some(view) => Json(view).into_response(),
        None => session_not_found(),
    }
}

/// PUT /api/sessions/{id}
pub async fn update_session(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SessionInputPayload>,
) -> Response {
    let events = [
        payload.url.map(ShellEvent::UrlEntered),
        payload.format.map(ShellEvent::FormatChosen),
        payload.language.map(ShellEvent::LanguageChosen),
    ];

    match state.edit(&id, events.into_iter().flatten(), |s| SessionView::of(id, s)) {
        Some(Ok(view)) => Json(view).into_response(),
        Some(Err(_)) => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Özetleme sürerken girdiler değiştirilemez" })),
        )
            .into_response(),
        None => session_not_found(),
    }
}

/// POST /api/sessions/{id}/run
///
/// Moves the session to `running` and executes the pipeline in the
/// background. The client polls `GET /api/sessions/{id}` for the outcome.
pub async fn run_session(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    // 1) Tetikle; yalnızca Running'e geçebilen oturum çalıştırılır
    let Some((view, command)) = state.apply(&id, ShellEvent::Trigger, |s| {
        (SessionView::of(id, s), s.is_running().then(|| s.command()))
    }) else {
        return session_not_found();
    };
    let Some(command) = command else {
        return (StatusCode::CONFLICT, Json(view)).into_response();
    };

    // 2) Arka plana işi spawn et
    let state_clone = state.clone();
    tokio::spawn(async move {
        let outcome = state_clone.executor.execute(&command).await;
        state_clone.apply(&id, ShellEvent::Finished(outcome), |s| {
            info!("Oturum {} → {}", id, s.state.name());
        });
    });

    // 3) Hemen 202 dön
    (StatusCode::ACCEPTED, Json(view)).into_response()
}

/// GET /api/sessions/{id}/download
pub async fn download(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    let download = state.read(&id, |s| {
        s.export().map(|job| {
            (
                job.content_type(),
                content_disposition(&job.suggested_filename),
                job.payload.clone(),
            )
        })
    });
    match download {
        Some(Some((content_type, disposition, payload))) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            payload,
        )
            .into_response(),
        Some(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "İndirilecek özet yok" })),
        )
            .into_response(),
        None => session_not_found(),
    }
}
