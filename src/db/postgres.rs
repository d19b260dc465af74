use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::GameRepository,
    error::{AppError, AppResult},
    models::{CatalogGame, Category, PlaySession, RatingRecord, UserProfile},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    birth_date: Option<NaiveDate>,
    gender: Option<String>,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = AppError;

    fn try_from(row: UserRow) -> AppResult<Self> {
        let birth_date = row.birth_date.ok_or_else(|| {
            AppError::InvalidProfile(format!("user {} has no birth date", row.id))
        })?;

        Ok(UserProfile {
            id: row.id,
            birth_date,
            gender: row.gender,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RatingRow {
    user_id: String,
    game_id: String,
    category_id: String,
    category_name: String,
    rating_value: f64,
}

impl From<RatingRow> for RatingRecord {
    fn from(row: RatingRow) -> Self {
        RatingRecord {
            user_id: row.user_id,
            game_id: row.game_id,
            category_id: row.category_id,
            category_name: row.category_name,
            rating_value: row.rating_value,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlaySessionRow {
    user_id: String,
    game_id: String,
    score: f64,
}

impl From<PlaySessionRow> for PlaySession {
    fn from(row: PlaySessionRow) -> Self {
        PlaySession {
            user_id: row.user_id,
            game_id: row.game_id,
            score: row.score,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CatalogRow {
    id: String,
    game_name: String,
    image_url: Option<String>,
    category_id: String,
    category_name: String,
    min_age: i32,
    target_gender: Option<String>,
    average_rating: Option<f64>,
}

impl From<CatalogRow> for CatalogGame {
    fn from(row: CatalogRow) -> Self {
        CatalogGame {
            id: row.id,
            name: row.game_name,
            image_url: row.image_url,
            category_id: row.category_id,
            category_name: row.category_name,
            min_age: row.min_age,
            target_gender: row.target_gender,
            average_rating: row.average_rating,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
}

/// PostgreSQL-backed repository over the game schema
#[derive(Clone)]
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GameRepository for PgGameRepository {
    async fn fetch_user(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u."birthDate"::date AS birth_date, u.gender
            FROM "Users" u
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserProfile::try_from).transpose()
    }

    async fn fetch_ratings(&self, user_id: &str) -> AppResult<Vec<RatingRecord>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT gr."userId" AS user_id,
                   gr."gameId" AS game_id,
                   gr."categoryId" AS category_id,
                   c.name AS category_name,
                   gr."ratingValue"::float8 AS rating_value
            FROM "GameRating" gr
            JOIN "Game" g ON gr."gameId" = g.id
            JOIN "Category" c ON g."categoryId" = c.id
            WHERE gr."userId" = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RatingRecord::from).collect())
    }

    async fn fetch_play_history(&self, user_id: &str) -> AppResult<Vec<PlaySession>> {
        let rows = sqlx::query_as::<_, PlaySessionRow>(
            r#"
            SELECT ug."userId" AS user_id,
                   ug."gameId" AS game_id,
                   ug.score::float8 AS score
            FROM "UserGame" ug
            WHERE ug."userId" = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PlaySession::from).collect())
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogGame>> {
        // Ordered by id so that ties in predicted rating rank deterministically
        let rows = sqlx::query_as::<_, CatalogRow>(
            r#"
            SELECT g.id,
                   ci.name AS game_name,
                   ci."imageUrl" AS image_url,
                   g."categoryId" AS category_id,
                   c.name AS category_name,
                   g."minAge"::int4 AS min_age,
                   g."targetGender" AS target_gender,
                   g."averageRating"::float8 AS average_rating
            FROM "Game" g
            JOIN "Category" c ON g."categoryId" = c.id
            JOIN "ContentItem" ci ON g.id = ci.id
            ORDER BY g.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(games = rows.len(), "Fetched catalog");

        Ok(rows.into_iter().map(CatalogGame::from).collect())
    }

    async fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT c.id, c.name
            FROM "Category" c
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.id,
                name: row.name,
            })
            .collect())
    }
}
