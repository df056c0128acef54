use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendation,
    routes::AppState,
};

pub const NOT_FOUND_MESSAGE: &str = "Movie not found in database";

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Missing is treated like blank so both get the JSON error body
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub recommendations: Vec<Recommendation>,
    pub message: Option<String>,
}

/// Handler for recommendations endpoint
///
/// An unknown title is not an error for the UI: it gets an empty list and a
/// message to display.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Movie title cannot be empty".to_string(),
        ));
    }

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        "Processing recommendation request"
    );

    let (recommendations, message) = match state.engine.get_recommendations(&params.title).await
    {
        Ok(recommendations) => (recommendations, None),
        Err(AppError::MovieNotFound(title)) => {
            tracing::warn!(request_id = %request_id, title = %title, "Movie not found");
            (Vec::new(), Some(NOT_FOUND_MESSAGE.to_string()))
        }
        Err(e) => return Err(e),
    };

    tracing::info!(
        request_id = %request_id,
        results = recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        title: params.title,
        recommendations,
        message,
    }))
}
