//! Grid CRUD: the HTTP face of the gateway + mapper.
//!
//! `GET /data` returns the raw grid (image columns pre-normalized) rather
//! than decoded records — both existing clients decode the payload
//! themselves, so decoding server-side would change the contract.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::mapper::{self, Grid};
use crate::record::Record;
use crate::server::app::AppState;

pub async fn get_data(State(state): State<AppState>) -> Result<Json<Grid>, AppError> {
    let mut grid = state
        .store
        .fetch_all()
        .await
        .map_err(AppError::gateway("Failed to fetch data from spreadsheet"))?;

    mapper::normalize_grid_images(&mut grid);

    info!(rows = grid.len(), "fetched grid from spreadsheet");
    Ok(Json(grid))
}

pub async fn create_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(record): Json<Record>,
) -> Result<Json<Value>, AppError> {
    state.require_auth(&headers)?;
    require_create_fields(&record)?;

    let row = mapper::encode_new_row(&record);
    state
        .store
        .append(row)
        .await
        .map_err(AppError::gateway("Failed to add data to spreadsheet"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Data berhasil ditambahkan"
    })))
}

pub async fn update_data(
    State(state): State<AppState>,
    Path(row_reference): Path<u32>,
    headers: HeaderMap,
    Json(record): Json<Record>,
) -> Result<Json<Value>, AppError> {
    state.require_auth(&headers)?;
    require_positive(row_reference)?;

    // Full replace: every field the body omits is written back as empty.
    let row = mapper::encode_row(&record);
    state
        .store
        .update_at(row_reference, row)
        .await
        .map_err(AppError::gateway("Failed to update data in spreadsheet"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Data berhasil diperbarui"
    })))
}

pub async fn delete_data(
    State(state): State<AppState>,
    Path(row_reference): Path<u32>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    state.require_auth(&headers)?;
    require_positive(row_reference)?;

    // Not idempotent: once earlier rows are removed, a stale row-reference
    // points at whatever row shifted into that position, and this deletes
    // it without complaint.
    state
        .store
        .delete_at(row_reference)
        .await
        .map_err(AppError::gateway("Failed to delete data from spreadsheet"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Data berhasil dihapus"
    })))
}

fn require_positive(row_reference: u32) -> Result<(), AppError> {
    if row_reference == 0 {
        return Err(AppError::Validation(
            "Row reference must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// Field-presence policy for create, rejected before any remote call.
fn require_create_fields(record: &Record) -> Result<(), AppError> {
    if record.title.is_empty() || record.author.is_empty() || record.date.is_empty() {
        return Err(AppError::Validation(
            "Judul, Penulis, dan Tanggal harus diisi".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_author_and_date() {
        let mut record = Record {
            title: "t".into(),
            author: "a".into(),
            ..Default::default()
        };
        assert!(require_create_fields(&record).is_err());

        record.date = "1/1/2024".into();
        assert!(require_create_fields(&record).is_ok());
    }

    #[test]
    fn row_reference_zero_is_rejected() {
        assert!(require_positive(0).is_err());
        assert!(require_positive(1).is_ok());
    }
}
