use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::instrument;

use super::{
    dto::{AdEventRequest, AdsQuery, AdsResponse},
    repo_types::AdCounter,
    services::record_event,
};
use crate::{error::ApiResult, extract::ApiQuery, state::AppState};

pub fn ad_routes() -> Router<AppState> {
    Router::new()
        .route("/ads", get(list_ads))
        .route("/ads/click", post(record_click))
        .route("/ads/impression", post(record_impression))
}

#[instrument(skip(state))]
pub async fn list_ads(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<AdsQuery>,
) -> ApiResult<Json<AdsResponse>> {
    let position = q.position.as_deref().filter(|p| !p.is_empty());
    let ads = state
        .ads
        .list_eligible(position, OffsetDateTime::now_utc())
        .await?;
    Ok(Json(AdsResponse { ads }))
}

#[instrument(skip(state, body))]
pub async fn record_click(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let body = AdEventRequest::from_body(&body);
    record_event(state.ads.as_ref(), body.ad_id.as_deref(), AdCounter::Clicks).await?;
    Ok(Json(json!({ "success": true })))
}

#[instrument(skip(state, body))]
pub async fn record_impression(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let body = AdEventRequest::from_body(&body);
    record_event(
        state.ads.as_ref(),
        body.ad_id.as_deref(),
        AdCounter::Impressions,
    )
    .await?;
    Ok(Json(json!({ "success": true })))
}
