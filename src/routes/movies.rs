use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Movie, MovieDetails, RankedNeighbor},
    routes::AppState,
    services::ranking::DEFAULT_RECOMMENDATIONS,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PosterResponse {
    pub poster: String,
}

/// Catalog titles containing `q`, case-insensitively, in catalog order
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<Movie>> {
    Json(state.catalog.search(&params.q))
}

/// Top-K neighbors of a movie, scores only
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<RankedNeighbor>>> {
    let movie = state.catalog.find_by_id(id)?;
    let k = params.k.unwrap_or(DEFAULT_RECOMMENDATIONS);
    Ok(Json(state.engine.recommend(&movie, k)?))
}

/// Display attributes for a catalog movie
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Json<MovieDetails>> {
    let movie = state.catalog.find_by_id(id)?;
    Ok(Json(state.metadata.fetch_details(movie.id).await?))
}

/// Poster URL for a catalog movie
pub async fn poster(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Json<PosterResponse>> {
    let movie = state.catalog.find_by_id(id)?;
    let poster = state.metadata.fetch_poster(movie.id).await?;
    Ok(Json(PosterResponse { poster }))
}
