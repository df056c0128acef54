use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{routes::AppState, services::recommendations::RECOMMENDATION_COUNT};

#[derive(Debug, Deserialize)]
pub struct MovieListQuery {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub movies: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub movies_available: usize,
    pub recommendations_per_search: usize,
}

/// Titles for the movie picker, optionally filtered by a substring
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MovieListQuery>,
) -> Json<MovieListResponse> {
    let catalog = state.catalog();
    let movies: Vec<String> = match params.q.as_deref() {
        Some(query) => catalog
            .search_titles(query)
            .into_iter()
            .map(str::to_string)
            .collect(),
        None => catalog.titles().map(str::to_string).collect(),
    };

    Json(MovieListResponse {
        total: movies.len(),
        movies,
    })
}

/// Catalog statistics shown above the picker
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        movies_available: state.catalog().len(),
        recommendations_per_search: RECOMMENDATION_COUNT,
    })
}
