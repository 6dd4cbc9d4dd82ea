mod handlers;
mod routes;
mod state;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use routes::summary::summary_routes;
use state::AppState;
use summary_service_cli::config::Config;
use summary_service_cli::logging;
use summary_service_cli::pipeline::Pipeline;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;
const SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// How long an untouched session (and its export) is kept in memory.
fn session_ttl(value: Option<String>) -> Result<Duration, String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => v
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| format!("SESSION_TTL_SECS için geçersiz değer: {}", v)),
        None => Ok(Duration::from_secs(DEFAULT_SESSION_TTL_SECS)),
    }
}

fn app(state: AppState, client_url: Option<&str>) -> Result<Router, Box<dyn std::error::Error>> {
    let mut app = summary_routes(state).layer(TraceLayer::new_for_http());

    // Arayüz başka bir origin'den sunuluyorsa CORS aç
    if let Some(origin) = client_url {
        let cors = CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .expose_headers([header::CONTENT_DISPOSITION]);
        app = app.layer(cors);
    }
    Ok(app)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = Config::from_env()?;
    let pipeline = Pipeline::from_config(&config)?;
    let state = AppState::new(Arc::new(pipeline));
    let ttl = session_ttl(env::var("SESSION_TTL_SECS").ok())?;
    state.spawn_sweeper(ttl, SWEEP_PERIOD);

    let client_url = env::var("CLIENT_URL").ok().filter(|v| !v.trim().is_empty());
    let app = app(state, client_url.as_deref())?;

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("🌐 Sunucu dinliyor: http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
