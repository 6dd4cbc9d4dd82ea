use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::handlers::page::{index, options};
use crate::handlers::session_handlers::{
    create_session, download, get_session, run_session, update_session,
};
use crate::state::AppState;

pub fn summary_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/options", get(options))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).put(update_session))
        .route("/api/sessions/{id}/run", post(run_session))
        .route("/api/sessions/{id}/download", get(download))
        .layer(Extension(state))
}
