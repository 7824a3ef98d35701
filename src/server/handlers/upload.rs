//! Multipart image upload into the append-only uploads directory.

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::response::Json;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::server::app::AppState;

pub async fn upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    state.require_auth(&headers)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original = field.file_name().unwrap_or("upload").to_string();
        let stored_name = storage_name(&original);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        let path = state.config.uploads_dir().join(&stored_name);
        tokio::fs::write(&path, &bytes).await?;

        info!(file = %stored_name, size = bytes.len(), "stored upload");
        return Ok(Json(json!({
            "status": "success",
            "url": format!("/uploads/{}", stored_name)
        })));
    }

    Err(AppError::Upload("No file uploaded".to_string()))
}

/// Timestamp-qualified storage name: `{unix_millis}_{sanitized_base}{ext}`.
/// The base keeps only `[A-Za-z0-9-_]`, the extension is lowercased. No
/// cleanup or size limit; the directory only grows.
fn storage_name(original: &str) -> String {
    let (base, ext) = match original.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base, format!(".{}", ext.to_lowercase())),
        _ => (original, String::new()),
    };

    let base: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let base = if base.is_empty() {
        "upload".to_string()
    } else {
        base
    };

    format!("{}_{}{}", Utc::now().timestamp_millis(), base, ext)
}
