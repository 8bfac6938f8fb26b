use std::time::Duration;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::{debug, instrument};

use super::dto::{CategoriesQuery, CategoriesResponse, CategoryWithCount};
use crate::{error::ApiResult, extract::ApiQuery, state::AppState};

pub fn category_routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

fn cache_key(limit: i64, include_counts: bool) -> String {
    format!("categories:{limit}:{include_counts}")
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CategoriesQuery>,
) -> ApiResult<Json<Value>> {
    let limit = q.limit();
    let include_counts = q.include_counts();
    let key = cache_key(limit, include_counts);
    if let Some(hit) = state.cache.get(&key) {
        debug!(%key, "categories served from cache");
        return Ok(Json(hit));
    }

    let encoded = if include_counts {
        let rows = state.categories.list_active_with_counts(limit).await?;
        serde_json::to_value(CategoriesResponse {
            categories: rows
                .into_iter()
                .map(CategoryWithCount::from)
                .collect::<Vec<_>>(),
        })
    } else {
        let rows = state.categories.list_active(limit).await?;
        serde_json::to_value(CategoriesResponse { categories: rows })
    };
    let body = encoded.map_err(anyhow::Error::from)?;

    state.cache.set(
        &key,
        body.clone(),
        Duration::from_secs(state.config.cache_ttl_seconds),
    );
    Ok(Json(body))
}
