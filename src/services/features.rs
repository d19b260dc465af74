use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogGame, FeatureVector, PlayActivity, RatingRecord, UserProfile},
};

pub const USER_AGE: &str = "user_age";
pub const USER_AVG_SCORE: &str = "user_avg_score";
pub const USER_GAMES_PLAYED: &str = "user_games_played";
pub const USER_MAX_SCORE: &str = "user_max_score";
pub const USER_RATING_COUNT: &str = "user_rating_count";
pub const USER_MEAN_RATING: &str = "user_mean_rating";
pub const GAME_MIN_AGE: &str = "game_min_age";
pub const GAME_AVERAGE_RATING: &str = "game_average_rating";
pub const AGE_MARGIN: &str = "age_margin";
pub const CATEGORY_PREFERENCE: &str = "category_preference";
pub const CATEGORY_RATING_COUNT: &str = "category_rating_count";
pub const CATEGORY_AFFINITY: &str = "category_affinity";
pub const GENDER_MATCH: &str = "gender_match";

/// Name of the one-hot flag for a game's category
pub fn category_flag(category_id: &str) -> String {
    format!("category={}", category_id)
}

/// How a user has rated one category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryPreference {
    pub mean_rating: f64,
    pub rating_count: usize,
}

/// Per-category rating signals derived from a user's ratings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryPreferences {
    pub by_category: BTreeMap<String, CategoryPreference>,
    pub overall_mean: Option<f64>,
    pub rating_count: usize,
}

impl CategoryPreferences {
    pub fn get(&self, category_id: &str) -> Option<&CategoryPreference> {
        self.by_category.get(category_id)
    }

    pub fn is_empty(&self) -> bool {
        self.rating_count == 0
    }
}

/// Mean rating and rating count per category; empty input gives an empty profile
pub fn analyze_category_preferences(ratings: &[RatingRecord]) -> CategoryPreferences {
    if ratings.is_empty() {
        return CategoryPreferences::default();
    }

    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for rating in ratings {
        let entry = sums.entry(rating.category_id.as_str()).or_insert((0.0, 0));
        entry.0 += rating.rating_value;
        entry.1 += 1;
    }

    let by_category = sums
        .into_iter()
        .map(|(category_id, (sum, count))| {
            (
                category_id.to_string(),
                CategoryPreference {
                    mean_rating: sum / count as f64,
                    rating_count: count,
                },
            )
        })
        .collect();

    let total: f64 = ratings.iter().map(|r| r.rating_value).sum();

    CategoryPreferences {
        by_category,
        overall_mean: Some(total / ratings.len() as f64),
        rating_count: ratings.len(),
    }
}

/// Everything known about the user while scoring candidates
#[derive(Debug, Clone, Copy)]
pub struct UserContext<'a> {
    pub profile: &'a UserProfile,
    pub age: u32,
    pub preferences: &'a CategoryPreferences,
    pub activity: PlayActivity,
}

/// Maps a user-game pair to named model features
///
/// Implementations must be deterministic and free of I/O. They may reject
/// malformed input with `AppError::InvalidProfile`.
pub trait FeatureBuilder: Send + Sync {
    fn build(&self, user: &UserContext<'_>, game: &CatalogGame) -> AppResult<FeatureVector>;
}

/// Feature set combining user demographics, play activity, category
/// preference and game metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFeatureBuilder;

impl FeatureBuilder for DefaultFeatureBuilder {
    fn build(&self, user: &UserContext<'_>, game: &CatalogGame) -> AppResult<FeatureVector> {
        let activity = user.activity;
        if !activity.avg_score.is_finite() || !activity.max_score.is_finite() {
            return Err(AppError::InvalidProfile(format!(
                "user {} has non-finite play scores",
                user.profile.id
            )));
        }

        let age = f64::from(user.age);
        let preferences = user.preferences;
        let category = preferences.get(&game.category_id);
        let overall_mean = preferences.overall_mean.unwrap_or(0.0);

        let mut features = FeatureVector::new();
        features.insert(USER_AGE, age);
        features.insert(USER_AVG_SCORE, activity.avg_score);
        features.insert(USER_GAMES_PLAYED, activity.session_count as f64);
        features.insert(USER_MAX_SCORE, activity.max_score);
        features.insert(USER_RATING_COUNT, preferences.rating_count as f64);
        features.insert(USER_MEAN_RATING, overall_mean);
        features.insert(GAME_MIN_AGE, f64::from(game.min_age));
        features.insert(GAME_AVERAGE_RATING, game.average_rating.unwrap_or(0.0));
        features.insert(AGE_MARGIN, age - f64::from(game.min_age));
        features.insert(
            CATEGORY_PREFERENCE,
            category.map_or(0.0, |c| c.mean_rating),
        );
        features.insert(
            CATEGORY_RATING_COUNT,
            category.map_or(0.0, |c| c.rating_count as f64),
        );
        features.insert(
            CATEGORY_AFFINITY,
            category.map_or(0.0, |c| c.mean_rating - overall_mean),
        );
        features.insert(
            GENDER_MATCH,
            gender_match(user.profile.gender.as_deref(), game.target_gender.as_deref()),
        );
        features.insert(category_flag(&game.category_id), 1.0);

        Ok(features)
    }
}

/// 1.0 when the game targets everyone or the user's gender
fn gender_match(user_gender: Option<&str>, target_gender: Option<&str>) -> f64 {
    let target = match target_gender.map(str::trim) {
        None | Some("") => return 1.0,
        Some(t) => t,
    };

    if ["all", "any", "both", "unisex"]
        .iter()
        .any(|open| target.eq_ignore_ascii_case(open))
    {
        return 1.0;
    }

    match user_gender {
        Some(gender) if gender.trim().eq_ignore_ascii_case(target) => 1.0,
        _ => 0.0,
    }
}
