//! Server network layer translating HTTP requests into match store operations

use crate::error::{ApiError, ServerError};
use crate::game::{Applied, UpdateProcessor};
use crate::match_store::MatchStore;
use crate::pages::{home_page, load_page, PageKind};
use crate::rules::MatchRules;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info};
use shared::{Action, Ack, DEFAULT_MATCH, KNOWN_MATCHES};
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Everything needed to start a server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub assets_dir: PathBuf,
    pub rules: MatchRules,
    pub matches: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            assets_dir: PathBuf::from("assets"),
            rules: MatchRules::default(),
            matches: KNOWN_MATCHES.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MatchStore>,
    pub processor: Arc<UpdateProcessor>,
    pub assets_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: MatchStore, rules: MatchRules, assets_dir: PathBuf) -> Self {
        Self {
            store: Arc::new(store),
            processor: Arc::new(UpdateProcessor::new(rules)),
            assets_dir: Arc::new(assets_dir),
        }
    }
}

/// Builds the HTTP routes. A blank match identifier selects the default match.
///
/// Update routes accept bodies of any size so that every update is acknowledged.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_home))
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/matches", get(list_matches))
        .route("/api/state/", get(read_default_state))
        .route("/api/state/{*sport}", get(read_state))
        .route(
            "/api/update/",
            post(update_default).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/update/{*sport}",
            post(update).layer(DefaultBodyLimit::disable()),
        )
        .route("/control/", get(control_default))
        .route("/control/{*sport}", get(control))
        .route("/display/", get(display_default))
        .route("/display/{*sport}", get(display))
        .fallback(|| async { ApiError::NotFound })
        .with_state(state)
}

fn match_id(sport: &str) -> &str {
    if sport.trim().is_empty() {
        DEFAULT_MATCH
    } else {
        sport
    }
}

async fn serve_home(State(app): State<AppState>) -> Html<String> {
    Html(home_page(&app.store.ids().await))
}

async fn list_matches(State(app): State<AppState>) -> Json<Vec<String>> {
    Json(app.store.ids().await)
}

async fn read_default_state(State(app): State<AppState>) -> Result<Response, ApiError> {
    state_response(&app, DEFAULT_MATCH).await
}

async fn read_state(
    State(app): State<AppState>,
    Path(sport): Path<String>,
) -> Result<Response, ApiError> {
    state_response(&app, match_id(&sport)).await
}

async fn state_response(app: &AppState, id: &str) -> Result<Response, ApiError> {
    let snapshot = app.store.snapshot(id).await;
    let body = serde_json::to_string(&snapshot).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response())
}

async fn update_default(State(app): State<AppState>, body: Bytes) -> Json<Ack> {
    apply_update(&app, DEFAULT_MATCH, &body).await
}

async fn update(
    State(app): State<AppState>,
    Path(sport): Path<String>,
    body: Bytes,
) -> Json<Ack> {
    apply_update(&app, match_id(&sport), &body).await
}

/// Applies a raw update payload. Always acknowledges: malformed input degrades to defaults.
async fn apply_update(app: &AppState, id: &str, body: &[u8]) -> Json<Ack> {
    let action = Action::from_body(body);
    debug!("Match {:?}: applying {}", id, action.name());

    match app.store.apply(id, &app.processor, &action).await {
        Applied::Mutated(Some(win)) if win.match_over => {
            info!("Match {:?} finished after set {}", id, win.set)
        }
        Applied::Ignored => debug!("Match {:?}: unknown action {:?}", id, action.name()),
        _ => {}
    }

    Json(Ack::ok())
}

async fn control_default(State(app): State<AppState>) -> Html<String> {
    Html(load_page(&app.assets_dir, DEFAULT_MATCH, PageKind::Control).await)
}

async fn control(State(app): State<AppState>, Path(sport): Path<String>) -> Html<String> {
    Html(load_page(&app.assets_dir, match_id(&sport), PageKind::Control).await)
}

async fn display_default(State(app): State<AppState>) -> Html<String> {
    Html(load_page(&app.assets_dir, DEFAULT_MATCH, PageKind::Display).await)
}

async fn display(State(app): State<AppState>, Path(sport): Path<String>) -> Html<String> {
    Html(load_page(&app.assets_dir, match_id(&sport), PageKind::Display).await)
}

/// Scoreboard HTTP server bound to a listening socket
pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    /// Validates the rules, binds the listening socket and seeds the configured matches
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        config.rules.validate()?;

        let addr: SocketAddr = config
            .addr
            .parse()
            .map_err(|source| ServerError::InvalidAddress {
                addr: config.addr.clone(),
                source,
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.addr.clone(),
                source,
            })?;
        info!("Server listening on {}", addr);

        let store = MatchStore::with_matches(config.matches);
        Ok(Server {
            listener,
            state: AppState::new(store, config.rules, config.assets_dir),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn store(&self) -> Arc<MatchStore> {
        Arc::clone(&self.state.store)
    }

    /// Serves requests until the process stops
    pub async fn run(self) -> Result<(), ServerError> {
        info!("Server started successfully");
        axum::serve(self.listener, router(self.state))
            .await
            .map_err(ServerError::Serve)
    }

    /// Serves requests until `shutdown` resolves, then drains in-flight requests
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Server started successfully");
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;
        info!("Server shutting down");
        Ok(())
    }
}
