use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub target_url: Option<String>,
    pub position: String,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    pub clicks: i64,
    pub impressions: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Ad {
    /// Active, and `now` inside `[start_date, end_date]`; a missing bound is open.
    pub fn is_eligible_at(&self, now: OffsetDateTime) -> bool {
        self.is_active
            && self.start_date.map_or(true, |start| start <= now)
            && self.end_date.map_or(true, |end| end >= now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdCounter {
    Clicks,
    Impressions,
}

impl AdCounter {
    pub fn column(self) -> &'static str {
        match self {
            AdCounter::Clicks => "clicks",
            AdCounter::Impressions => "impressions",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewAd {
    pub title: String,
    pub image_url: Option<String>,
    pub target_url: Option<String>,
    pub position: String,
    pub is_active: bool,
    pub start_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
}
