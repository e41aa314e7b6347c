use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::model::{NewSnippet, Snippet};
use crate::repo::Confirmation;

// --- Request/Response Structs ---

#[derive(Debug, Deserialize)]
pub struct TagQuery {
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    remove: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<Confirmation> for MessageResponse {
    fn from(confirmation: Confirmation) -> Self {
        MessageResponse {
            message: confirmation.message,
        }
    }
}

// --- Route Handlers ---

async fn create_snippet_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<NewSnippet>,
) -> Result<(StatusCode, Json<Snippet>), ApiError> {
    let snippet = Snippet::from(payload);
    let created = app_state.mutate(|repo| {
        let confirmation = repo.add(snippet)?;
        repo.get(confirmation.id)
    })?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_snippets_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<Snippet>>, ApiError> {
    let snippets = app_state.read(|repo| repo.all())?;
    Ok(Json(snippets))
}

async fn get_snippet_handler(
    State(app_state): State<Arc<AppState>>,
    Path(snippet_id): Path<i64>,
) -> Result<Json<Snippet>, ApiError> {
    let snippet = app_state.read(|repo| repo.get(snippet_id))?;
    Ok(Json(snippet))
}

async fn delete_snippet_handler(
    State(app_state): State<Arc<AppState>>,
    Path(snippet_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let confirmation = app_state.mutate(|repo| repo.delete(snippet_id))?;
    Ok(Json(confirmation.into()))
}

async fn toggle_favorite_handler(
    State(app_state): State<Arc<AppState>>,
    Path(snippet_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let confirmation = app_state.mutate(|repo| repo.toggle_favorite(snippet_id))?;
    Ok(Json(confirmation.into()))
}

async fn tag_snippet_handler(
    State(app_state): State<Arc<AppState>>,
    Path(snippet_id): Path<i64>,
    Query(query): Query<TagQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    if query.tags.iter().all(|t| t.trim().is_empty()) {
        return Err(ApiError::InvalidInput("at least one tag is required".to_string()));
    }

    let confirmation = app_state.mutate(|repo| repo.tag(snippet_id, &query.tags, query.remove))?;
    Ok(Json(confirmation.into()))
}

// --- Router ---

pub fn create_snippets_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/snippets/", get(list_snippets_handler).post(create_snippet_handler))
        .route("/snippets", get(list_snippets_handler).post(create_snippet_handler))
        .route("/snippets/{snippet_id}", get(get_snippet_handler).delete(delete_snippet_handler))
        .route("/snippets/{snippet_id}/favorite", post(toggle_favorite_handler))
        .route("/snippets/{snippet_id}/tags", post(tag_snippet_handler))
}
