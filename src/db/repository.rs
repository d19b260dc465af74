use crate::{
    error::AppResult,
    models::{CatalogGame, Category, PlaySession, RatingRecord, UserProfile},
};

/// Read-only access to the user, rating and catalog tables
///
/// Implementations return typed records; rows with missing required fields
/// are rejected here rather than inside scoring.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GameRepository: Send + Sync {
    /// Looks up a single user, `None` when no row matches
    async fn fetch_user(&self, user_id: &str) -> AppResult<Option<UserProfile>>;

    /// All ratings the user has given, possibly empty
    async fn fetch_ratings(&self, user_id: &str) -> AppResult<Vec<RatingRecord>>;

    /// All recorded play sessions for the user, possibly empty
    async fn fetch_play_history(&self, user_id: &str) -> AppResult<Vec<PlaySession>>;

    /// Every game joined with its category and content metadata
    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogGame>>;

    async fn fetch_categories(&self) -> AppResult<Vec<Category>>;
}
