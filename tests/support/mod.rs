#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

use gamerec_api::{
    db::GameRepository,
    error::AppResult,
    models::{CatalogGame, Category, PlaySession, RatingRecord, UserProfile},
    services::{
        artifacts::{FEATURE_COLUMNS_FILE, MODEL_FILE, SCALER_FILE},
        load_recommendation_system, RecommendationSystem,
    },
};

/// Repository serving fixed rows from memory
#[derive(Default, Clone)]
pub struct InMemoryRepository {
    pub users: Vec<UserProfile>,
    pub ratings: Vec<RatingRecord>,
    pub sessions: Vec<PlaySession>,
    pub catalog: Vec<CatalogGame>,
    pub categories: Vec<Category>,
}

#[async_trait::async_trait]
impl GameRepository for InMemoryRepository {
    async fn fetch_user(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn fetch_ratings(&self, user_id: &str) -> AppResult<Vec<RatingRecord>> {
        Ok(self
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn fetch_play_history(&self, user_id: &str) -> AppResult<Vec<PlaySession>> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogGame>> {
        Ok(self.catalog.clone())
    }

    async fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn user(id: &str, birth_date: NaiveDate) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        birth_date,
        gender: None,
    }
}

pub fn game(id: &str, category_id: &str, min_age: i32, average_rating: f64) -> CatalogGame {
    CatalogGame {
        id: id.to_string(),
        name: format!("Game {}", id),
        image_url: Some(format!("https://cdn.example.com/{}.png", id)),
        category_id: category_id.to_string(),
        category_name: format!("Category {}", category_id),
        min_age,
        target_gender: None,
        average_rating: Some(average_rating),
    }
}

pub fn rating(user_id: &str, game_id: &str, category_id: &str, value: f64) -> RatingRecord {
    RatingRecord {
        user_id: user_id.to_string(),
        game_id: game_id.to_string(),
        category_id: category_id.to_string(),
        category_name: format!("Category {}", category_id),
        rating_value: value,
    }
}

pub fn session(user_id: &str, game_id: &str, score: f64) -> PlaySession {
    PlaySession {
        user_id: user_id.to_string(),
        game_id: game_id.to_string(),
        score,
    }
}

/// Writes artifacts whose model predicts
/// `game_average_rating + 0.5 * category_preference`, unscaled
pub fn write_artifacts(dir: &Path) {
    std::fs::write(
        dir.join(MODEL_FILE),
        json!({ "coefficients": [1.0, 0.5, 0.0], "intercept": 0.0 }).to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.join(SCALER_FILE),
        json!({ "mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0] }).to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.join(FEATURE_COLUMNS_FILE),
        json!(["game_average_rating", "category_preference", "never_built"]).to_string(),
    )
    .unwrap();
}

pub fn test_system() -> Arc<RecommendationSystem> {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    Arc::new(load_recommendation_system(dir.path()).unwrap())
}
