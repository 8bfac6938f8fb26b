use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A user's like/dislike of a game. One row per (user, game).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub game_id: Uuid,
    pub is_like: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Rating joined with the minimal user and game columns the feed shows.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub is_like: bool,
    pub created_at: OffsetDateTime,
    pub user_id: Uuid,
    pub username: String,
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
    pub game_id: Uuid,
    pub game_slug: String,
    pub game_title: String,
    pub game_thumbnail: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct RatingSummary {
    pub likes: i64,
    pub dislikes: i64,
}

/// Which rating representations the `ratings` table currently carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingShape {
    pub has_is_like: bool,
    pub has_numeric_value: bool,
}
