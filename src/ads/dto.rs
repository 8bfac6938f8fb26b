use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::repo_types::Ad;

#[derive(Debug, Deserialize)]
pub struct AdsQuery {
    pub position: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdsResponse {
    pub ads: Vec<Ad>,
}

/// Body of the click and impression beacons. Beacons are often sent without a
/// JSON content type, so the raw body is read and `adId` picked out by hand;
/// anything unreadable leaves it unset and the caller answers 400.
#[derive(Debug, Default)]
pub struct AdEventRequest {
    pub ad_id: Option<String>,
}

impl AdEventRequest {
    pub fn from_body(body: &[u8]) -> Self {
        let ad_id = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|v| v.get("adId").and_then(Value::as_str).map(str::to_string));
        Self { ad_id }
    }
}
