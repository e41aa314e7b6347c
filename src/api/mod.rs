//! HTTP API and browser UI.
//!
//! Every handler makes exactly one repository call while holding the store
//! lock; mutations flush before the lock is released. A failed flush is
//! logged and the mutation still reports success, since it has already been
//! applied and the store stays dirty until a later flush or drop writes it.

use axum::{
    extract::State,
    http::Method,
    response::Html,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::repo::SnippetRepository;
use crate::ui::Ui;

pub mod error;
pub mod snippet_routes;

pub use error::ApiError;
pub use snippet_routes::MessageResponse;

pub type SharedRepository = Box<dyn SnippetRepository + Send>;

type ApiResult<T> = std::result::Result<T, ApiError>;

pub struct AppState {
    repo: Mutex<SharedRepository>,
    ui: Ui,
}

impl AppState {
    pub fn new(repo: SharedRepository) -> Result<Self> {
        Ok(AppState {
            repo: Mutex::new(repo),
            ui: Ui::new()?,
        })
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, SharedRepository>> {
        self.repo
            .lock()
            .map_err(|_| ApiError::Internal("snippet store lock poisoned".to_string()))
    }

    fn read<T>(&self, op: impl FnOnce(&SharedRepository) -> Result<T>) -> ApiResult<T> {
        let repo = self.lock()?;
        Ok(op(&*repo)?)
    }

    fn mutate<T>(&self, op: impl FnOnce(&mut SharedRepository) -> Result<T>) -> ApiResult<T> {
        let mut repo = self.lock()?;
        let out = op(&mut *repo)?;
        if let Err(e) = repo.flush() {
            tracing::error!("mutation applied but not yet persisted: {e}");
        }
        Ok(out)
    }
}

async fn index_handler(State(app_state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let snippets = app_state.read(|repo| repo.all())?;
    Ok(Html(app_state.ui.render(&snippets, false)?))
}

async fn favorites_handler(State(app_state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let snippets = app_state.read(|repo| repo.all())?;
    Ok(Html(app_state.ui.render(&snippets, true)?))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/favorites", get(favorites_handler))
        .merge(snippet_routes::create_snippets_router())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run_http_server(repo: SharedRepository, http_addr: SocketAddr) -> Result<()> {
    let app_state = Arc::new(AppState::new(repo)?);
    let app_router = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    tracing::info!("HTTP server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("could not listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
