use anyhow::Context;
use axum::async_trait;
use sqlx::PgPool;

use super::repo_types::{Category, CategoryCountRow};

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Active categories by `display_order` ascending.
    async fn list_active(&self, limit: i64) -> anyhow::Result<Vec<Category>>;

    /// Same ordering, with the number of published games per category.
    async fn list_active_with_counts(&self, limit: i64) -> anyhow::Result<Vec<CategoryCountRow>>;
}

#[derive(Clone)]
pub struct PgCategoryStore {
    db: PgPool,
}

impl PgCategoryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn list_active(&self, limit: i64) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, slug, name, icon, display_order, is_active
              FROM categories
             WHERE is_active
             ORDER BY display_order ASC
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list active categories")?;
        Ok(rows)
    }

    async fn list_active_with_counts(&self, limit: i64) -> anyhow::Result<Vec<CategoryCountRow>> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            r#"
            SELECT c.id, c.slug, c.name, c.icon, c.display_order, c.is_active,
                   gc.game_count
              FROM categories c
              LEFT JOIN (
                    SELECT category_id, COUNT(*) AS game_count
                      FROM games
                     WHERE is_published
                     GROUP BY category_id
              ) gc ON gc.category_id = c.id
             WHERE c.is_active
             ORDER BY c.display_order ASC
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list active categories with counts")?;
        Ok(rows)
    }
}
