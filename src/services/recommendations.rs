use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{
    db::GameRepository,
    error::{AppError, AppResult},
    models::{CatalogGame, PlayActivity, PlaySession, RatingRecord, ScoredCandidate, UserProfile},
    services::{
        artifacts::RecommendationSystem,
        features::{analyze_category_preferences, FeatureBuilder, UserContext},
    },
};

/// Rows fetched for one user before scoring
#[derive(Debug, Clone)]
pub struct RecommendationInputs {
    pub user: UserProfile,
    pub ratings: Vec<RatingRecord>,
    pub play_history: Vec<PlaySession>,
    pub catalog: Vec<CatalogGame>,
}

/// Scores every eligible catalog game for a user and keeps the best `n`
///
/// Eligible games satisfy the user's age and have not been rated by them.
/// Predictions are clamped to the rating range and sorted descending; equal
/// predictions keep catalog order.
pub fn generate_recommendations(
    inputs: &RecommendationInputs,
    system: &RecommendationSystem,
    builder: &dyn FeatureBuilder,
    today: NaiveDate,
    n_recommendations: usize,
) -> AppResult<Vec<ScoredCandidate>> {
    let age = inputs.user.age_on(today)?;
    let preferences = analyze_category_preferences(&inputs.ratings);
    let activity = PlayActivity::from_sessions(&inputs.play_history);

    let context = UserContext {
        profile: &inputs.user,
        age,
        preferences: &preferences,
        activity,
    };

    let rated: HashSet<&str> = inputs.ratings.iter().map(|r| r.game_id.as_str()).collect();

    let mut scored = inputs
        .catalog
        .iter()
        .filter(|game| game.suits_age(age) && !rated.contains(game.id.as_str()))
        .map(|game| score_candidate(&context, game, system, builder))
        .collect::<AppResult<Vec<_>>>()?;

    tracing::debug!(
        user_id = %inputs.user.id,
        age,
        catalog_size = inputs.catalog.len(),
        eligible = scored.len(),
        "Scored eligible games"
    );

    rank(&mut scored, n_recommendations);
    Ok(scored)
}

fn score_candidate(
    context: &UserContext<'_>,
    game: &CatalogGame,
    system: &RecommendationSystem,
    builder: &dyn FeatureBuilder,
) -> AppResult<ScoredCandidate> {
    let features = builder.build(context, game)?;
    let row = features.to_ordered(system.feature_columns());
    Ok(ScoredCandidate::new(game, system.predict(&row)))
}

/// Stable descending sort by predicted rating, then truncation to `n`
pub fn rank(candidates: &mut Vec<ScoredCandidate>, n: usize) {
    candidates.sort_by(|a, b| b.predicted_rating.total_cmp(&a.predicted_rating));
    candidates.truncate(n);
}

/// Fetches a user's data through the gateway and scores the catalog for them
pub struct RecommendationEngine {
    repository: Arc<dyn GameRepository>,
    system: Arc<RecommendationSystem>,
    builder: Arc<dyn FeatureBuilder>,
    query_timeout: Duration,
}

impl RecommendationEngine {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        system: Arc<RecommendationSystem>,
        builder: Arc<dyn FeatureBuilder>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            system,
            builder,
            query_timeout,
        }
    }

    /// Top `n_recommendations` games for the user, as of today (UTC)
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        n_recommendations: usize,
    ) -> AppResult<Vec<ScoredCandidate>> {
        self.get_recommendations_as_of(user_id, n_recommendations, Utc::now().date_naive())
            .await
    }

    /// Same as [`get_recommendations`](Self::get_recommendations) with an explicit date
    pub async fn get_recommendations_as_of(
        &self,
        user_id: &str,
        n_recommendations: usize,
        today: NaiveDate,
    ) -> AppResult<Vec<ScoredCandidate>> {
        let start = Instant::now();

        let user = self
            .with_timeout("fetch_user", self.repository.fetch_user(user_id))
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        let ratings = self
            .with_timeout("fetch_ratings", self.repository.fetch_ratings(user_id))
            .await?;

        let play_history = self
            .with_timeout(
                "fetch_play_history",
                self.repository.fetch_play_history(user_id),
            )
            .await?;

        let catalog = self
            .with_timeout("fetch_catalog", self.repository.fetch_catalog())
            .await?;

        let inputs = RecommendationInputs {
            user,
            ratings,
            play_history,
            catalog,
        };

        let recommendations = generate_recommendations(
            &inputs,
            &self.system,
            self.builder.as_ref(),
            today,
            n_recommendations,
        )?;

        tracing::info!(
            user_id = %user_id,
            ratings = inputs.ratings.len(),
            sessions = inputs.play_history.len(),
            catalog_size = inputs.catalog.len(),
            returned = recommendations.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendations generated"
        );

        Ok(recommendations)
    }

    async fn with_timeout<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.query_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.query_timeout.as_millis(),
                    "Data gateway call timed out"
                );
                Err(AppError::GatewayTimeout(format!(
                    "{} exceeded {}ms",
                    operation,
                    self.query_timeout.as_millis()
                )))
            }
        }
    }
}
