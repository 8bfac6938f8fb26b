//! Checks whether the `ratings` table already stores like/dislike booleans.
//!
//! Detection only: legacy numeric scores are reported, not converted. How
//! they should map to likes has not been decided.

use gamehub::{config::AppConfig, db, ratings::repo::inspect_shape};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    gamehub::init_tracing("migrate_ratings=info,gamehub=info");

    let pool = db::connect(&AppConfig::database_url_from_env()?).await?;
    let shape = inspect_shape(&pool).await?;

    match (shape.has_is_like, shape.has_numeric_value) {
        (true, false) => info!("ratings already use is_like; nothing to do"),
        (true, true) => warn!("ratings carry both is_like and a numeric column; leaving data untouched"),
        (false, true) => warn!("ratings still use a numeric score; no conversion is implemented"),
        (false, false) => warn!("ratings table missing or has neither shape"),
    }
    Ok(())
}
