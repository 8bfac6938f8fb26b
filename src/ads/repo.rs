use anyhow::Context;
use axum::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Ad, AdCounter, NewAd};

const AD_COLUMNS: &str = "id, title, image_url, target_url, position, is_active, \
                          start_date, end_date, clicks, impressions, created_at";

#[async_trait]
pub trait AdStore: Send + Sync {
    /// Ads eligible at `now`, optionally for one slot, newest-created first.
    async fn list_eligible(
        &self,
        position: Option<&str>,
        now: OffsetDateTime,
    ) -> anyhow::Result<Vec<Ad>>;

    /// Atomic `+1` on one counter. `false` when the ad does not exist.
    async fn increment(&self, ad_id: Uuid, counter: AdCounter) -> anyhow::Result<bool>;

    async fn create(&self, new: NewAd) -> anyhow::Result<Ad>;
}

#[derive(Clone)]
pub struct PgAdStore {
    db: PgPool,
}

impl PgAdStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdStore for PgAdStore {
    async fn list_eligible(
        &self,
        position: Option<&str>,
        now: OffsetDateTime,
    ) -> anyhow::Result<Vec<Ad>> {
        let rows = sqlx::query_as::<_, Ad>(&format!(
            r#"
            SELECT {AD_COLUMNS}
              FROM ads
             WHERE is_active
               AND (start_date IS NULL OR start_date <= $2)
               AND (end_date IS NULL OR end_date >= $2)
               AND ($1::text IS NULL OR position = $1)
             ORDER BY created_at DESC
            "#
        ))
        .bind(position)
        .bind(now)
        .fetch_all(&self.db)
        .await
        .context("list eligible ads")?;
        Ok(rows)
    }

    async fn increment(&self, ad_id: Uuid, counter: AdCounter) -> anyhow::Result<bool> {
        let column = counter.column();
        let result = sqlx::query(&format!(
            "UPDATE ads SET {column} = {column} + 1 WHERE id = $1"
        ))
        .bind(ad_id)
        .execute(&self.db)
        .await
        .with_context(|| format!("increment ad {column}"))?;
        Ok(result.rows_affected() == 1)
    }

    async fn create(&self, new: NewAd) -> anyhow::Result<Ad> {
        let ad = sqlx::query_as::<_, Ad>(&format!(
            r#"
            INSERT INTO ads (title, image_url, target_url, position, is_active, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {AD_COLUMNS}
            "#
        ))
        .bind(&new.title)
        .bind(&new.image_url)
        .bind(&new.target_url)
        .bind(&new.position)
        .bind(new.is_active)
        .bind(new.start_date)
        .bind(new.end_date)
        .fetch_one(&self.db)
        .await
        .context("insert ad")?;
        Ok(ad)
    }
}
