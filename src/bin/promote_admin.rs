//! Grants the ADMIN role to an existing user.
//!
//! Usage: `promote_admin <username>`

use anyhow::Context;
use gamehub::{
    auth::{
        repo::{PgUserStore, UserStore},
        repo_types::Role,
    },
    config::AppConfig,
    db,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    gamehub::init_tracing("promote_admin=info,gamehub=info");

    let username = std::env::args()
        .nth(1)
        .context("usage: promote_admin <username>")?;

    let pool = db::connect(&AppConfig::database_url_from_env()?).await?;
    let users = PgUserStore::new(pool);

    match users.set_role(&username, Role::Admin).await? {
        Some(user) => {
            info!(user_id = %user.id, username = %user.username, "user promoted to ADMIN");
            Ok(())
        }
        None => {
            error!(%username, "no such user");
            anyhow::bail!("user {username} not found")
        }
    }
}
