use serde::{Deserialize, Serialize};

use super::repo_types::Game;

#[derive(Debug, Deserialize)]
pub struct GameListQuery {
    pub category: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct GameListResponse {
    pub games: Vec<Game>,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub game: Game,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_count: Option<i64>,
    pub session_tracked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}
