//! Bidirectional mapping between the raw spreadsheet grid and [`Record`]s.
//!
//! Reads are name-based through the header row; writes are positional
//! through [`WRITE_LAYOUT`]. The two contracts are deliberately separate —
//! see the registry notes in [`crate::columns`].

use chrono::Local;
use serde_json::Value;
use tracing::debug;

use crate::columns::{Field, HeaderIndex, IMAGE_COLUMNS, WRITE_LAYOUT};
use crate::record::Record;

/// One raw row of cells as returned by the remote datastore.
pub type Row = Vec<Value>;

/// The full raw 2-D grid, header row included at index 0.
pub type Grid = Vec<Row>;

/// Decode a raw grid into records, one per data row, in row order.
///
/// Columns are resolved by normalized header name; a missing column or cell
/// yields an empty string, never an error. Each record carries its 1-based
/// row-reference (header is row 1, so the first data row decodes with
/// row-reference 2). The result is recomputed fresh from the grid on every
/// call; there is no incremental state.
pub fn decode(grid: &Grid) -> Vec<Record> {
    let Some(header) = grid.first() else {
        return Vec::new();
    };

    let header_cells: Vec<String> = header.iter().map(cell_text).collect();
    let index = HeaderIndex::from_header_row(&header_cells);

    grid.iter()
        .enumerate()
        .skip(1)
        .map(|(r, row)| decode_row(row, &index, (r + 1) as u32))
        .collect()
}

fn decode_row(row: &Row, index: &HeaderIndex, row_reference: u32) -> Record {
    let mut record = Record {
        row: Some(row_reference),
        ..Default::default()
    };

    for field in Field::ALL {
        let value = match index.position(field) {
            Some(col) => match row.get(col) {
                Some(cell) if is_image_field(field) => image_cell_url(cell),
                Some(cell) => cell_text(cell),
                None => String::new(),
            },
            None => String::new(),
        };
        record.set(field, value);
    }

    record
}

fn is_image_field(field: Field) -> bool {
    matches!(field, Field::Image | Field::BusinessImage)
}

/// Encode a record into the fixed 17-column positional row used for update.
///
/// Every absent field is written as an empty string, overwriting whatever
/// the cell held before; there are no partial-patch semantics. The image
/// value lands in both slot 4 and slot 8 of the layout.
pub fn encode_row(record: &Record) -> Vec<String> {
    WRITE_LAYOUT
        .iter()
        .map(|field| record.get(*field).to_string())
        .collect()
}

/// Encode a record for create: same positional row as [`encode_row`], but
/// an empty date defaults to today. Updates never default the date.
pub fn encode_new_row(record: &Record) -> Vec<String> {
    let mut row = encode_row(record);
    let date_slot = Field::Date.write_position();
    if row[date_slot].is_empty() {
        row[date_slot] = today();
    }
    row
}

/// Today in the `d/m/yyyy` shape the id-ID locale produces (no zero
/// padding), matching the dates already stored in the sheet.
fn today() -> String {
    Local::now().format("%-d/%-m/%Y").to_string()
}

/// Rewrite the positional image columns (E, I and P) of every data row
/// through [`image_cell_url`], leaving empty cells untouched. This is the
/// read-path pre-normalization applied before the grid is handed to
/// clients; writes never go through it.
pub fn normalize_grid_images(grid: &mut Grid) {
    for row in grid.iter_mut().skip(1) {
        for col in IMAGE_COLUMNS {
            let Some(cell) = row.get_mut(col) else {
                continue;
            };
            if cell_is_empty(cell) {
                continue;
            }
            *cell = Value::String(image_cell_url(cell));
        }
    }
}

fn cell_is_empty(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Normalize an image cell to a plain string URL.
///
/// Variants are tried in order: an absolute http(s) URL string passes
/// through; a structured object is probed for `url`, `src` then `link`; an
/// object carrying a Drive `imageId` gets an external storage URL
/// synthesized from it. Anything else fails soft to an empty string —
/// availability over correctness.
pub fn image_cell_url(cell: &Value) -> String {
    if let Value::String(s) = cell {
        if s.starts_with("http://") || s.starts_with("https://") {
            return s.clone();
        }
    }

    if let Value::Object(map) = cell {
        for key in ["url", "src", "link"] {
            if let Some(Value::String(s)) = map.get(key) {
                return s.clone();
            }
        }
        if let Some(Value::String(id)) = map.get("imageId") {
            return format!("https://drive.google.com/uc?id={}", id);
        }
    }

    debug!(cell = %cell, "could not normalize image cell");
    String::new()
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
