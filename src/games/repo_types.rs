use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
    pub play_count: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlaySession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub game_id: Uuid,
    pub duration: i32, // seconds; stays 0 until a session end is reported
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
}

/// How a path segment is matched against games: by slug first, then by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameIdentifier {
    pub slug: String,
    pub id: Option<Uuid>,
}

impl GameIdentifier {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            slug: raw.to_string(),
            id: Uuid::parse_str(raw).ok(),
        }
    }

    /// True when `game` is matched, honouring slug-before-id order.
    pub fn matches(&self, game: &Game) -> bool {
        game.slug == self.slug || self.id == Some(game.id)
    }
}
