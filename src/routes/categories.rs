use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{error::AppResult, models::Category, routes::AppState};

/// Handler listing all game categories
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.repository.fetch_categories().await?;
    Ok(Json(categories))
}
