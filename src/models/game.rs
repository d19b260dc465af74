use serde::{Deserialize, Serialize};

/// Lowest and highest rating a recommendation may carry
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Game category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Catalog entry: a `Game` joined with its `Category` and `ContentItem`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogGame {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub category_id: String,
    pub category_name: String,
    pub min_age: i32,
    pub target_gender: Option<String>,
    pub average_rating: Option<f64>,
}

impl CatalogGame {
    /// Whether a user of `age` meets the game's minimum age
    pub fn suits_age(&self, age: u32) -> bool {
        i64::from(self.min_age) <= i64::from(age)
    }
}

/// A catalog game with the rating the model predicts for one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate {
    pub game_id: String,
    pub game_name: String,
    pub game_image: Option<String>,
    pub category_id: String,
    pub category_name: String,
    pub min_age: i32,
    pub target_gender: Option<String>,
    pub average_rating: Option<f64>,
    pub predicted_rating: f64,
}

impl ScoredCandidate {
    /// Attaches a prediction to a game, clamped to the valid rating range
    pub fn new(game: &CatalogGame, raw_prediction: f64) -> Self {
        Self {
            game_id: game.id.clone(),
            game_name: game.name.clone(),
            game_image: game.image_url.clone(),
            category_id: game.category_id.clone(),
            category_name: game.category_name.clone(),
            min_age: game.min_age,
            target_gender: game.target_gender.clone(),
            average_rating: game.average_rating,
            predicted_rating: clamp_rating(raw_prediction),
        }
    }
}

/// Clamps a raw model output into `[MIN_RATING, MAX_RATING]`
///
/// NaN maps to the lowest rating.
pub fn clamp_rating(raw: f64) -> f64 {
    if raw.is_nan() {
        return MIN_RATING;
    }
    raw.clamp(MIN_RATING, MAX_RATING)
}
