use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

use service::auth::{domain::LoginInput, AuthService};
use service::contact::ContactRelay;
use service::contact_info::ContactInfoService;
use service::ordered::OrderedRepository;

use crate::errors::JsonApiError;

pub const SESSION_COOKIE: &str = "session";
pub const LOGIN_PAGE: &str = "/admin/login";

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct ServerState {
    pub records: Arc<dyn OrderedRepository>,
    pub contact_info: ContactInfoService,
    pub auth: AuthService,
    pub relay: ContactRelay,
    pub cookie_secure: bool,
}

/// Verified admin identity, inserted into request extensions by [`require_admin_session`].
#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    pub user_id: Uuid,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct LoginOutput { pub user_id: Uuid, pub email: String, pub token: String, pub expires_at: DateTime<Utc> }

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(State(state): State<ServerState>, jar: CookieJar, Json(input): Json<LoginInput>) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let cookie = Cookie::build((SESSION_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax);
    let jar = jar.add(cookie);
    let out = LoginOutput { user_id: session.user.id, email: session.user.email, token: session.token, expires_at: session.expires_at };
    Ok((jar, Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Signed Out")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/auth/session", tag = "auth", responses((status = 200, description = "Current Session"), (status = 401, description = "Unauthorized")))]
pub async fn current_session(Extension(session): Extension<AdminSession>) -> Json<AdminSession> {
    Json(session)
}

/// Bearer header first, then the session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(h) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return h.strip_prefix("Bearer ").map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    }
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|a| a.contains("text/html"))
        .unwrap_or(false)
}

/// Admin gate: a valid session token continues with an [`AdminSession`] extension.
/// Otherwise browsers are redirected (303) to the login page and API clients get 401.
pub async fn require_admin_session(State(state): State<ServerState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let verified = session_token(req.headers()).map(|t| state.auth.verify_token(&t));
    match verified {
        Some(Ok(claims)) => {
            let expires_at = Utc.timestamp_opt(claims.exp, 0).single().unwrap_or_else(Utc::now);
            req.extensions_mut().insert(AdminSession { user_id: claims.uid, email: claims.sub, expires_at });
            next.run(req).await
        }
        other => {
            match other {
                Some(Err(e)) => tracing::warn!(path = %path, err = %e, "session validation failed"),
                _ => tracing::debug!(path = %path, "no session token"),
            }
            if wants_html(req.headers()) {
                Redirect::to(LOGIN_PAGE).into_response()
            } else {
                JsonApiError::unauthorized().into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_wins_over_cookie() {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_static("session=from-cookie"));
        assert_eq!(session_token(&h).as_deref(), Some("from-cookie"));
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_token(&h).as_deref(), Some("from-header"));
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(session_token(&h), None);
    }

    #[test]
    fn html_detection() {
        let mut h = HeaderMap::new();
        assert!(!wants_html(&h));
        h.insert(header::ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml"));
        assert!(wants_html(&h));
    }
}
