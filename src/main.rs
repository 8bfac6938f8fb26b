use std::sync::Arc;

use gamehub::{app, config::AppConfig, db, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    gamehub::init_tracing("gamehub=debug,axum=info,tower_http=info");

    let config = Arc::new(AppConfig::from_env()?);
    let pool = db::connect(&config.database_url).await?;
    db::run_migrations(&pool).await;

    let state = AppState::from_pool(pool, config);
    app::serve(app::build_app(state)).await
}
