//! Session lifecycle: login, logout, status.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::server::app::AppState;
use crate::server::session::{self, clear_session_cookie, session_cookie};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let config = &state.config;
    if payload.username == config.admin_username && payload.password == config.admin_password {
        let id = state.sessions.create(&payload.username);
        info!(username = %payload.username, "admin logged in");
        (
            StatusCode::OK,
            AppendHeaders([(SET_COOKIE, session_cookie(&id))]),
            Json(json!({ "success": true, "message": "Login successful" })),
        )
    } else {
        warn!(username = %payload.username, "rejected login attempt");
        (
            StatusCode::UNAUTHORIZED,
            AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        )
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(id) = session::session_id(&headers) {
        state.sessions.destroy(&id);
    }
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(json!({ "success": true, "message": "Logout successful" })),
    )
}

pub async fn status(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let username = session::session_id(&headers).and_then(|id| state.sessions.username(&id));
    Json(json!({
        "isAuthenticated": username.is_some(),
        "username": username
    }))
}
