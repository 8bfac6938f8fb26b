use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use super::{
    dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest, VerifyResponse},
    password::{hash_password, verify_password},
    repo_types::{NewUser, User},
    services::validate_registration,
};
use crate::{
    cookie::{expired_cookie, session_cookie, set_cookie_headers, token_from_headers},
    error::{ApiError, ApiResult},
    extract::ApiJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/verify", get(verify))
}

/// Signs a token for `user` and packs it into the body and a cookie.
fn issue_session(state: &AppState, user: User) -> ApiResult<(HeaderMap, Json<AuthResponse>)> {
    let token = state.jwt.sign(&user)?;
    let headers = set_cookie_headers(&session_cookie(
        &state.config.cookie,
        &token,
        state.jwt.max_age_secs(),
    ));
    Ok((
        headers,
        Json(AuthResponse {
            user: PublicUser::from(user),
            token,
        }),
    ))
}

#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<(HeaderMap, Json<AuthResponse>)> {
    let mut payload = RegisterRequest::from_json(&body).map_err(|details| {
        warn!(violations = details.len(), "registration body has mistyped fields");
        ApiError::Validation(details)
    })?;
    if let Err(details) = validate_registration(&mut payload) {
        warn!(violations = details.len(), "registration payload rejected");
        return Err(ApiError::Validation(details));
    }

    if state
        .users
        .find_by_email_or_username(&payload.email, &payload.username)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, username = %payload.username, "email or username taken");
        return Err(ApiError::Conflict(
            "User with this email or username already exists".into(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = state
        .users
        .create(NewUser {
            email: payload.email,
            username: payload.username,
            password_hash,
            name: payload.name,
        })
        .await?
        // Lost a race with a concurrent registration.
        .ok_or_else(|| {
            ApiError::Conflict("User with this email or username already exists".into())
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    issue_session(&state, user)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<(HeaderMap, Json<AuthResponse>)> {
    let login = payload.login.trim();
    let login_email = login.to_lowercase();
    let invalid = || ApiError::Unauthorized("Invalid credentials".into());

    let Some(user) = state
        .users
        .find_by_email_or_username(&login_email, login)
        .await?
    else {
        warn!(login = %login, "login unknown user");
        return Err(invalid());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(invalid());
    }

    info!(user_id = %user.id, "user logged in");
    issue_session(&state, user)
}

pub async fn logout(State(state): State<AppState>) -> (HeaderMap, Json<Value>) {
    (
        set_cookie_headers(&expired_cookie(&state.config.cookie)),
        Json(json!({ "success": true })),
    )
}

/// Resolves the current user from the cookie or bearer token. Every failure
/// mode degrades to `{user: null}`.
#[instrument(skip_all)]
pub async fn verify(State(state): State<AppState>, headers: HeaderMap) -> Json<VerifyResponse> {
    let Some(token) = token_from_headers(&headers, &state.config.cookie.name) else {
        return Json(VerifyResponse { user: None });
    };
    let claims = match state.jwt.verify(&token) {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "verify: token rejected");
            return Json(VerifyResponse { user: None });
        }
    };
    let user = match state.users.find_by_id(claims.sub).await {
        Ok(u) => u.map(PublicUser::from),
        Err(e) => {
            warn!(error = %e, user_id = %claims.sub, "verify: user lookup failed");
            None
        }
    };
    Json(VerifyResponse { user })
}
