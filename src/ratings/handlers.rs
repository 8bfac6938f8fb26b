use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error, info, instrument};

use super::{
    dto::{RateRequest, RateResponse, Review, ReviewsQuery, ReviewsResponse},
    repo_types::RatingSummary,
};
use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, ApiResult},
    extract::ApiJson,
    games::repo_types::{Game, GameIdentifier},
    state::AppState,
};

pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/games/reviews", get(list_reviews))
        .route("/games/:id/rate", post(rate_game))
        .route("/games/:id/rating", get(game_rating))
}

/// Feed failures degrade to an empty list so the page section renders empty.
#[instrument(skip(state, query))]
pub async fn list_reviews(
    State(state): State<AppState>,
    query: Result<Query<ReviewsQuery>, QueryRejection>,
) -> (StatusCode, Json<ReviewsResponse>) {
    let q = query.map(|Query(q)| q).unwrap_or_else(|rejection| {
        debug!(reason = %rejection.body_text(), "reviews query ignored");
        ReviewsQuery::default()
    });
    match state.ratings.list_recent(q.limit()).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ReviewsResponse {
                reviews: rows.into_iter().map(Review::from).collect(),
                error: None,
            }),
        ),
        Err(e) => {
            error!(error = ?e, "review feed unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ReviewsResponse {
                    reviews: Vec::new(),
                    error: Some("Failed to fetch reviews"),
                }),
            )
        }
    }
}

async fn published_game(state: &AppState, raw: &str) -> ApiResult<Game> {
    match state.games.find_by_identifier(&GameIdentifier::parse(raw)).await? {
        Some(game) if game.is_published => Ok(game),
        _ => Err(ApiError::not_found("Game not found")),
    }
}

#[instrument(skip(state, payload))]
pub async fn rate_game(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<RateRequest>,
) -> ApiResult<Json<RateResponse>> {
    let game = published_game(&state, &id).await?;
    let rating = state.ratings.upsert(user_id, game.id, payload.is_like).await?;
    let summary = state.ratings.summary(game.id).await?;
    info!(%user_id, game_id = %game.id, is_like = rating.is_like, "game rated");
    Ok(Json(RateResponse { rating, summary }))
}

#[instrument(skip(state))]
pub async fn game_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RatingSummary>> {
    let game = published_game(&state, &id).await?;
    Ok(Json(state.ratings.summary(game.id).await?))
}
