use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub icon: Option<String>,
    #[serde(rename = "order")]
    pub display_order: i32,
    pub is_active: bool,
}

/// `game_count` is `None` when the count relation was not joined in.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryCountRow {
    #[sqlx(flatten)]
    pub category: Category,
    pub game_count: Option<i64>,
}
