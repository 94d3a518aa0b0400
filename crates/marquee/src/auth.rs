//! Admin session handling.
//!
//! Login exchanges the console password for an opaque bearer token carried in
//! a cookie. The gate stores only SHA-256 digests of issued tokens together
//! with their expiry, so a leaked process dump cannot replay live sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "admin_session";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid password")]
    InvalidPassword,
    #[error("missing or expired session")]
    Unauthorized,
}

/// Opaque session token handed to the client once, at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

/// Issues and verifies admin sessions.
pub struct AdminGate {
    password_digest: [u8; 32],
    ttl: Duration,
    sessions: Mutex<HashMap<[u8; 32], DateTime<Utc>>>,
}

impl AdminGate {
    pub fn new(password: &str, ttl: Duration) -> Self {
        Self {
            password_digest: digest(password.as_bytes()),
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Checks the password and mints a fresh token on success.
    pub fn login(&self, password: &str) -> Result<SessionToken, AuthError> {
        if !digests_equal(&digest(password.as_bytes()), &self.password_digest) {
            return Err(AuthError::InvalidPassword);
        }

        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.ttl;
        let mut sessions = lock(&self.sessions);
        sessions.insert(digest(token.as_bytes()), expires_at);
        Ok(SessionToken(token))
    }

    /// Accepts a token only while its session is live. Expired entries are
    /// purged on the way through.
    pub fn authorize(&self, token: &str) -> Result<(), AuthError> {
        let now = Utc::now();
        let mut sessions = lock(&self.sessions);
        sessions.retain(|_, expires_at| *expires_at > now);
        if sessions.contains_key(&digest(token.as_bytes())) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    /// Drops the session behind a token. Unknown tokens are a no-op.
    pub fn logout(&self, token: &str) {
        let mut sessions = lock(&self.sessions);
        sessions.remove(&digest(token.as_bytes()));
    }

    pub fn live_sessions(&self) -> usize {
        let now = Utc::now();
        let sessions = lock(&self.sessions);
        sessions.values().filter(|expires_at| **expires_at > now).count()
    }
}

fn lock<'a>(
    sessions: &'a Mutex<HashMap<[u8; 32], DateTime<Utc>>>,
) -> std::sync::MutexGuard<'a, HashMap<[u8; 32], DateTime<Utc>>> {
    // A poisoned gate only means a panic mid-insert; the map stays usable.
    sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Compares two digests without short-circuiting on the first mismatch.
fn digests_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Extractor guarding admin handlers. Resolves the session cookie against the
/// gate installed as a router extension and rejects with 401 otherwise.
pub struct AdminSession {
    pub token: SessionToken,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let gate = parts
            .extensions
            .get::<Arc<AdminGate>>()
            .cloned()
            .ok_or_else(|| unauthorized_response())?;

        let token = session_token(parts).ok_or_else(unauthorized_response)?;
        gate.authorize(&token).map_err(|_| unauthorized_response())?;
        Ok(Self {
            token: SessionToken(token),
        })
    }
}

fn session_token(parts: &Parts) -> Option<String> {
    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({ "error": "missing or expired session" })),
    )
        .into_response()
}

pub(crate) fn session_cookie(token: &SessionToken, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        token.0,
        ttl.num_seconds()
    )
}

fn expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Router builder for the login and logout endpoints.
pub fn auth_router(gate: Arc<AdminGate>) -> Router {
    Router::new()
        .route("/api/v1/admin/login", post(login_handler))
        .route("/api/v1/admin/logout", post(logout_handler))
        .layer(axum::Extension(gate.clone()))
        .with_state(gate)
}

async fn login_handler(
    State(gate): State<Arc<AdminGate>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response {
    match gate.login(&request.password) {
        Ok(token) => {
            let cookie = session_cookie(&token, gate.ttl);
            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                axum::Json(json!({ "status": "ok" })),
            )
                .into_response()
        }
        Err(error) => {
            tracing::warn!("admin login rejected");
            (
                StatusCode::UNAUTHORIZED,
                axum::Json(json!({ "error": error.to_string() })),
            )
                .into_response()
        }
    }
}

async fn logout_handler(
    State(gate): State<Arc<AdminGate>>,
    session: AdminSession,
) -> Response {
    gate.logout(&session.token.0);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, expired_cookie())],
        axum::Json(json!({ "status": "ok" })),
    )
        .into_response()
}
