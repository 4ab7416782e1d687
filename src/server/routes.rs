//! HTTP route handlers for the edit-groups API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::conversation::payload::EditGroupsPayload;

use super::state::{AppState, MembershipRecord};

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/conversation/{key}/edit_groups/",
            put(edit_groups).post(edit_groups),
        )
        .route("/conversation/{key}/groups/", get(conversation_groups))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Replace the groups of a conversation.
async fn edit_groups(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(payload): Json<EditGroupsPayload>,
) -> Result<Json<MembershipRecord>, (StatusCode, String)> {
    if payload.key != key {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("body key {} does not match conversation {key}", payload.key),
        ));
    }

    tracing::info!(
        conversation = %key,
        groups = payload.groups.len(),
        "conversation groups updated"
    );
    Ok(Json(state.store(payload)))
}

/// Current groups of a conversation.
async fn conversation_groups(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<MembershipRecord>, (StatusCode, String)> {
    state
        .membership(&key)
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown conversation {key}")))
}
