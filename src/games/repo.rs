use anyhow::Context;
use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Game, GameIdentifier, PlaySession};

const GAME_COLUMNS: &str = "g.id, g.slug, g.title, g.description, g.thumbnail, g.category_id, \
                            g.is_published, g.play_count, g.created_at";

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Slug match wins over id match when both could apply.
    async fn find_by_identifier(&self, ident: &GameIdentifier) -> anyhow::Result<Option<Game>>;

    async fn list_published(
        &self,
        category_slug: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Game>>;

    /// Atomic `+1`; returns the new count, or `None` if the game vanished.
    async fn increment_play_count(&self, game_id: Uuid) -> anyhow::Result<Option<i64>>;

    async fn create_play_session(&self, user_id: Uuid, game_id: Uuid)
        -> anyhow::Result<PlaySession>;

    async fn set_published(&self, game_id: Uuid, published: bool) -> anyhow::Result<Option<Game>>;
}

#[derive(Clone)]
pub struct PgGameStore {
    db: PgPool,
}

impl PgGameStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GameStore for PgGameStore {
    async fn find_by_identifier(&self, ident: &GameIdentifier) -> anyhow::Result<Option<Game>> {
        let game = sqlx::query_as::<_, Game>(&format!(
            r#"
            SELECT {GAME_COLUMNS}
              FROM games g
             WHERE g.slug = $1 OR g.id = $2
             ORDER BY (g.slug = $1) DESC
             LIMIT 1
            "#
        ))
        .bind(&ident.slug)
        .bind(ident.id)
        .fetch_optional(&self.db)
        .await
        .context("find game by slug or id")?;
        Ok(game)
    }

    async fn list_published(
        &self,
        category_slug: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Game>> {
        let rows = sqlx::query_as::<_, Game>(&format!(
            r#"
            SELECT {GAME_COLUMNS}
              FROM games g
              LEFT JOIN categories c ON c.id = g.category_id
             WHERE g.is_published
               AND ($1::text IS NULL OR c.slug = $1)
             ORDER BY g.created_at DESC
             LIMIT $2 OFFSET $3
            "#
        ))
        .bind(category_slug)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list published games")?;
        Ok(rows)
    }

    async fn increment_play_count(&self, game_id: Uuid) -> anyhow::Result<Option<i64>> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE games
               SET play_count = play_count + 1
             WHERE id = $1
            RETURNING play_count
            "#,
        )
        .bind(game_id)
        .fetch_optional(&self.db)
        .await
        .context("increment play count")?;
        Ok(count)
    }

    async fn create_play_session(
        &self,
        user_id: Uuid,
        game_id: Uuid,
    ) -> anyhow::Result<PlaySession> {
        let session = sqlx::query_as::<_, PlaySession>(
            r#"
            INSERT INTO play_sessions (user_id, game_id, duration)
            VALUES ($1, $2, 0)
            RETURNING id, user_id, game_id, duration, started_at
            "#,
        )
        .bind(user_id)
        .bind(game_id)
        .fetch_one(&self.db)
        .await
        .context("insert play session")?;
        Ok(session)
    }

    async fn set_published(&self, game_id: Uuid, published: bool) -> anyhow::Result<Option<Game>> {
        let game = sqlx::query_as::<_, Game>(&format!(
            r#"
            UPDATE games g
               SET is_published = $2
             WHERE g.id = $1
            RETURNING {GAME_COLUMNS}
            "#
        ))
        .bind(game_id)
        .bind(published)
        .fetch_optional(&self.db)
        .await
        .context("update game publish flag")?;
        Ok(game)
    }
}
