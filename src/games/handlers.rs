use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{GameListQuery, GameListResponse, GameResponse, PlayResponse},
    repo_types::GameIdentifier,
    services::{register_play, PlayOutcome},
};
use crate::{
    auth::extractors::MaybeUser,
    error::{ApiError, ApiResult},
    extract::ApiQuery,
    state::AppState,
};

pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(list_games))
        .route("/games/:id", get(get_game))
        .route("/games/:id/play", post(play_game))
}

#[instrument(skip(state))]
pub async fn list_games(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<GameListQuery>,
) -> ApiResult<Json<GameListResponse>> {
    let games = state
        .games
        .list_published(q.category.as_deref(), q.limit.clamp(1, 100), q.offset.max(0))
        .await?;
    Ok(Json(GameListResponse { games }))
}

#[instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<GameResponse>> {
    match state.games.find_by_identifier(&GameIdentifier::parse(&id)).await? {
        Some(game) if game.is_published => Ok(Json(GameResponse { game })),
        _ => Err(ApiError::not_found("Game not found")),
    }
}

#[instrument(skip(state, caller))]
pub async fn play_game(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PlayResponse>> {
    let ident = GameIdentifier::parse(&id);
    let body = match register_play(state.games.as_ref(), &ident, caller).await? {
        PlayOutcome::Registered {
            play_count,
            session,
        } => PlayResponse {
            success: true,
            play_count: Some(play_count),
            session_tracked: session.is_recorded(),
            message: None,
        },
        PlayOutcome::Degraded => PlayResponse {
            success: true,
            play_count: None,
            session_tracked: false,
            message: Some("Play registered with limited tracking"),
        },
    };
    Ok(Json(body))
}
