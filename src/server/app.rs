use std::sync::Arc;

use anyhow::Result;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use super::handlers::{auth, data, health, upload};
use super::session::{self, SessionStore};
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::sheets::SheetStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SheetStore>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Pass when the request carries a live session cookie, or — for header
    /// clients kept from before sessions existed — a matching admin token
    /// in `Authorization: Bearer` or `x-admin-token`.
    pub fn require_auth(&self, headers: &HeaderMap) -> Result<(), AppError> {
        if let Some(id) = session::session_id(headers) {
            if self.sessions.username(&id).is_some() {
                return Ok(());
            }
        }

        if let Some(expected) = &self.config.admin_token {
            let bearer = headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "));
            let alt = headers.get("x-admin-token").and_then(|v| v.to_str().ok());
            if bearer == Some(expected.as_str()) || alt == Some(expected.as_str()) {
                return Ok(());
            }
        }

        Err(AppError::Unauthorized)
    }
}

pub fn create_app(store: Arc<dyn SheetStore>, config: Arc<AppConfig>) -> Result<Router> {
    // Uploads land inside the public dir so the static service covers them.
    std::fs::create_dir_all(config.uploads_dir())?;

    let state = AppState {
        store,
        sessions: Arc::new(SessionStore::default()),
        config: config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/data", get(data::get_data).post(data::create_data))
        .route(
            "/data/:row",
            put(data::update_data).delete(data::delete_data),
        )
        .route("/upload", post(upload::upload_file))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/auth/status", get(auth::status))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}
