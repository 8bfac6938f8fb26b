use tracing::debug;
use uuid::Uuid;

use super::{repo::AdStore, repo_types::AdCounter};
use crate::error::{ApiError, ApiResult};

pub fn parse_ad_id(raw: Option<&str>) -> ApiResult<Uuid> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Ad ID is required"))?;
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid ad ID"))
}

/// Bumps one counter on the ad. Repeated events from the same viewer are
/// all counted.
pub async fn record_event(
    ads: &dyn AdStore,
    raw_id: Option<&str>,
    counter: AdCounter,
) -> ApiResult<()> {
    let ad_id = parse_ad_id(raw_id)?;
    if !ads.increment(ad_id, counter).await? {
        return Err(ApiError::not_found("Ad not found"));
    }
    debug!(%ad_id, counter = counter.column(), "ad event recorded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn parse_rejects_missing_and_malformed() {
        assert!(matches!(parse_ad_id(None), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_ad_id(Some("  ")), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_ad_id(Some("abc")), Err(ApiError::BadRequest(_))));
        let id = Uuid::new_v4();
        assert_eq!(parse_ad_id(Some(&id.to_string())).unwrap(), id);
    }

    #[tokio::test]
    async fn click_touches_only_clicks() {
        let store = MemoryStore::new();
        let ad = store.add_ad("banner", true, None, None);
        let id = ad.id.to_string();

        record_event(&store, Some(&id), AdCounter::Clicks).await.unwrap();
        let after = store.ad(ad.id).unwrap();
        assert_eq!(after.clicks, 1);
        assert_eq!(after.impressions, 0);

        record_event(&store, Some(&id), AdCounter::Impressions).await.unwrap();
        let after = store.ad(ad.id).unwrap();
        assert_eq!(after.clicks, 1);
        assert_eq!(after.impressions, 1);
    }

    #[tokio::test]
    async fn unknown_ad_is_not_found() {
        let store = MemoryStore::new();
        let err = record_event(&store, Some(&Uuid::new_v4().to_string()), AdCounter::Clicks)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        let ad = store.add_ad("sidebar", true, None, None);
        let id = ad.id.to_string();

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let store = store.clone();
                let id = id.clone();
                tokio::spawn(async move {
                    record_event(store.as_ref(), Some(&id), AdCounter::Impressions).await
                })
            })
            .collect();
        for t in tasks {
            t.await.unwrap().unwrap();
        }

        assert_eq!(store.ad(ad.id).unwrap().impressions, 64);
    }
}
