use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppError,
    middleware::request_id::RequestId,
    models::{NavigationState, Notice, Transition},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub state: NavigationState,
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    #[serde(default)]
    pub state: NavigationState,
    #[serde(default)]
    pub title: String,
}

/// An unreadable body carries no usable state, so the session restarts empty
fn rejected(request_id: RequestId, rejection: JsonRejection) -> Json<Transition> {
    let error = AppError::InvalidInput(rejection.body_text());
    tracing::warn!(request_id = %request_id, error = %error, "Rejected navigation request");

    Json(Transition::with_notice(
        NavigationState::Empty,
        Notice::error(error.to_string()),
    ))
}

/// Search transition. The caller sends its current state and gets the next one back.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Json<Transition> {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejected(request_id, rejection),
    };
    tracing::info!(request_id = %request_id, query = %request.query, "Navigation search");

    Json(state.navigator.search(request.state, &request.query).await)
}

/// Recommendation-click transition
pub async fn click(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    request: Result<Json<ClickRequest>, JsonRejection>,
) -> Json<Transition> {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejected(request_id, rejection),
    };
    tracing::info!(request_id = %request_id, title = %request.title, "Navigation click");

    Json(
        state
            .navigator
            .click_recommendation(request.state, &request.title)
            .await,
    )
}
