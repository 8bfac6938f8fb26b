use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::AuthCookieConfig;

/// Auth cookies are `SameSite=Lax`, scoped to `/`.
pub fn session_cookie(cfg: &AuthCookieConfig, token: &str, max_age_secs: i64) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        cfg.name, token, max_age_secs
    );
    if cfg.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn expired_cookie(cfg: &AuthCookieConfig) -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", cfg.name)
}

pub fn set_cookie_headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(value) {
        headers.insert(header::SET_COOKIE, v);
    }
    headers
}

pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (k, v) = pair.trim().split_once('=')?;
            (k == name && !v.is_empty()).then(|| v.to_string())
        })
}

/// Token from the auth cookie, falling back to `Authorization: Bearer`.
pub fn token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    read_cookie(headers, cookie_name).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}
