use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthCookieConfig {
    pub name: String,
    pub secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub cookie: AuthCookieConfig,
    pub cache_ttl_seconds: u64,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "gamehub".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "gamehub-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES", 60 * 24 * 7),
        };
        let cookie = AuthCookieConfig {
            name: std::env::var("AUTH_COOKIE_NAME").unwrap_or_else(|_| "auth-token".into()),
            secure: env_parse("AUTH_COOKIE_SECURE", false),
        };
        Ok(Self {
            database_url,
            jwt,
            cookie,
            cache_ttl_seconds: env_parse("CACHE_TTL_SECONDS", 300),
        })
    }

    /// Only the database URL is needed by the maintenance binaries.
    pub fn database_url_from_env() -> anyhow::Result<String> {
        Ok(std::env::var("DATABASE_URL")?)
    }
}
