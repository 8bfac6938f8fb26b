use anyhow::Context;
use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Rating, RatingShape, RatingSummary, ReviewRow};

#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Newest first.
    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<ReviewRow>>;

    /// Inserts or replaces the caller's rating for the game.
    async fn upsert(&self, user_id: Uuid, game_id: Uuid, is_like: bool) -> anyhow::Result<Rating>;

    async fn summary(&self, game_id: Uuid) -> anyhow::Result<RatingSummary>;
}

#[derive(Clone)]
pub struct PgRatingStore {
    db: PgPool,
}

impl PgRatingStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingStore for PgRatingStore {
    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<ReviewRow>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT r.id, r.is_like, r.created_at,
                   u.id AS user_id, u.username, u.name AS user_name, u.avatar AS user_avatar,
                   g.id AS game_id, g.slug AS game_slug, g.title AS game_title,
                   g.thumbnail AS game_thumbnail
              FROM ratings r
              JOIN users u ON u.id = r.user_id
              JOIN games g ON g.id = r.game_id
             ORDER BY r.created_at DESC
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list recent ratings")?;
        Ok(rows)
    }

    async fn upsert(&self, user_id: Uuid, game_id: Uuid, is_like: bool) -> anyhow::Result<Rating> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (user_id, game_id, is_like)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, game_id)
            DO UPDATE SET is_like = EXCLUDED.is_like, updated_at = now()
            RETURNING id, user_id, game_id, is_like, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(game_id)
        .bind(is_like)
        .fetch_one(&self.db)
        .await
        .context("upsert rating")?;
        Ok(rating)
    }

    async fn summary(&self, game_id: Uuid) -> anyhow::Result<RatingSummary> {
        let summary = sqlx::query_as::<_, RatingSummary>(
            r#"
            SELECT COUNT(*) FILTER (WHERE is_like)     AS likes,
                   COUNT(*) FILTER (WHERE NOT is_like) AS dislikes
              FROM ratings
             WHERE game_id = $1
            "#,
        )
        .bind(game_id)
        .fetch_one(&self.db)
        .await
        .context("rating summary")?;
        Ok(summary)
    }
}

/// Reads the `ratings` column layout from the catalog. Used by the
/// `migrate_ratings` maintenance binary.
pub async fn inspect_shape(db: &PgPool) -> anyhow::Result<RatingShape> {
    let columns: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT column_name::text
          FROM information_schema.columns
         WHERE table_schema = current_schema()
           AND table_name = 'ratings'
        "#,
    )
    .fetch_all(db)
    .await
    .context("inspect ratings columns")?;

    Ok(shape_from_columns(&columns))
}

pub fn shape_from_columns<S: AsRef<str>>(columns: &[S]) -> RatingShape {
    let has = |name: &str| columns.iter().any(|c| c.as_ref() == name);
    RatingShape {
        has_is_like: has("is_like"),
        has_numeric_value: has("value") || has("score"),
    }
}
