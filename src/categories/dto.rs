use serde::{Deserialize, Serialize};

use super::repo_types::{Category, CategoryCountRow};
use crate::extract::lenient_i64;

/// Raw query values. Only the literal `includeCounts=true` turns counts on and
/// an unparseable `limit` falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesQuery {
    pub limit: Option<String>,
    pub include_counts: Option<String>,
}

impl CategoriesQuery {
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn limit(&self) -> i64 {
        lenient_i64(self.limit.as_deref(), Self::DEFAULT_LIMIT).clamp(1, 100)
    }

    pub fn include_counts(&self) -> bool {
        self.include_counts.as_deref() == Some("true")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub game_count: i64,
}

impl From<CategoryCountRow> for CategoryWithCount {
    fn from(row: CategoryCountRow) -> Self {
        Self {
            category: row.category,
            game_count: row.game_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse<T> {
    pub categories: Vec<T>,
}
