use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Rating, RatingSummary, ReviewRow};
use crate::extract::lenient_i64;

/// `limit` is kept raw; anything unparseable falls back to the default so the
/// feed never fails on its query string.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewsQuery {
    pub limit: Option<String>,
}

impl ReviewsQuery {
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn limit(&self) -> i64 {
        lenient_i64(self.limit.as_deref(), Self::DEFAULT_LIMIT).clamp(1, 50)
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewUser {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewGame {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub is_like: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user: ReviewUser,
    pub game: ReviewGame,
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        Self {
            id: r.id,
            is_like: r.is_like,
            created_at: r.created_at,
            user: ReviewUser {
                id: r.user_id,
                username: r.username,
                name: r.user_name,
                avatar: r.user_avatar,
            },
            game: ReviewGame {
                id: r.game_id,
                slug: r.game_slug,
                title: r.game_title,
                thumbnail: r.game_thumbnail,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub is_like: bool,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub rating: Rating,
    #[serde(flatten)]
    pub summary: RatingSummary,
}
