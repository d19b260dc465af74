use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::ScoredCandidate,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub n: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub user_id: String,
    pub recommendations: Vec<ScoredCandidate>,
}

/// Handler for the per-user recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let n = params.n.unwrap_or(state.default_recommendations);
    if n > state.max_recommendations {
        return Err(AppError::InvalidInput(format!(
            "n must be at most {}",
            state.max_recommendations
        )));
    }

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        n,
        "Processing recommendation request"
    );

    let recommendations = state.engine.get_recommendations(&user_id, n).await?;

    Ok(Json(RecommendationResponse {
        user_id,
        recommendations,
    }))
}
