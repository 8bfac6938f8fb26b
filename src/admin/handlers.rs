use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::dto::{CreateAdRequest, UpdateGameRequest};
use crate::{
    ads::repo_types::NewAd,
    auth::extractors::AdminUser,
    error::{ApiError, ApiResult, FieldError},
    extract::ApiJson,
    games::repo_types::GameIdentifier,
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/ads", post(create_ad))
        .route("/admin/games/:id", patch(update_game))
}

fn validate_ad(req: &CreateAdRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if req.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    }
    if req.position.trim().is_empty() {
        errors.push(FieldError::new("position", "Position is required"));
    }
    if let (Some(start), Some(end)) = (req.start_date, req.end_date) {
        if end < start {
            errors.push(FieldError::new("endDate", "End date must not precede start date"));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[instrument(skip(state, admin, payload))]
pub async fn create_ad(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(payload): ApiJson<CreateAdRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    validate_ad(&payload).map_err(ApiError::Validation)?;
    let ad = state
        .ads
        .create(NewAd {
            title: payload.title.trim().to_string(),
            image_url: payload.image_url,
            target_url: payload.target_url,
            position: payload.position.trim().to_string(),
            is_active: payload.is_active,
            start_date: payload.start_date,
            end_date: payload.end_date,
        })
        .await?;
    info!(admin_id = %admin.id, ad_id = %ad.id, position = %ad.position, "ad created");
    Ok((StatusCode::CREATED, Json(json!({ "ad": ad }))))
}

#[instrument(skip(state, admin, payload))]
pub async fn update_game(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateGameRequest>,
) -> ApiResult<Json<Value>> {
    let game = state
        .games
        .find_by_identifier(&GameIdentifier::parse(&id))
        .await?
        .ok_or_else(|| ApiError::not_found("Game not found"))?;
    let game = state
        .games
        .set_published(game.id, payload.is_published)
        .await?
        .ok_or_else(|| ApiError::not_found("Game not found"))?;
    info!(admin_id = %admin.id, game_id = %game.id, published = game.is_published, "game updated");
    Ok(Json(json!({ "game": game })))
}
