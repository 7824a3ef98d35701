//! Spreadsheet gateway: the only component that touches the remote
//! datastore.
//!
//! Rows are addressed by 1-based row-reference over the whole grid, header
//! included. That reference is positional, not a stable key — deleting a
//! row shifts every later reference up by one, so callers reload the grid
//! after any write.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::GatewayError;
use crate::mapper::Grid;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Remote tabular datastore operations. No retries; failures carry the
/// remote message verbatim.
#[async_trait]
pub trait SheetStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Grid, GatewayError>;
    async fn append(&self, row: Vec<String>) -> Result<(), GatewayError>;
    async fn update_at(&self, row_reference: u32, row: Vec<String>) -> Result<(), GatewayError>;
    async fn delete_at(&self, row_reference: u32) -> Result<(), GatewayError>;
}

/// Gateway speaking the Google Sheets v4 values/batchUpdate REST surface.
///
/// The access token is supplied by configuration; minting and refreshing it
/// is outside this service.
pub struct GoogleSheetsGateway {
    client: reqwest::Client,
    spreadsheet_id: String,
    sheet_name: String,
    /// Numeric sheet id (gid) required by deleteDimension.
    sheet_gid: i64,
    api_token: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Grid,
}

impl GoogleSheetsGateway {
    pub fn new(spreadsheet_id: String, sheet_name: String, sheet_gid: i64, api_token: String) -> Self {
        GoogleSheetsGateway {
            client: reqwest::Client::new(),
            spreadsheet_id,
            sheet_name,
            sheet_gid,
            api_token,
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/{}/values/{}", SHEETS_API_BASE, self.spreadsheet_id, range)
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Remote {
            status: status.as_u16(),
            message: remote_message(&body),
        })
    }
}

/// Pull the `error.message` out of a Google error body, falling back to the
/// raw body when it does not parse.
fn remote_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl SheetStore for GoogleSheetsGateway {
    async fn fetch_all(&self) -> Result<Grid, GatewayError> {
        let response = self
            .client
            .get(self.values_url(&self.sheet_name))
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        let range: ValueRange = self.check(response).await?.json().await?;
        Ok(range.values)
    }

    async fn append(&self, row: Vec<String>) -> Result<(), GatewayError> {
        // The current row count is read first, matching the behavior this
        // service has always had. Two concurrent appends can observe the
        // same count; whether they serialize cleanly is up to the remote
        // append semantics.
        let next_row = self.fetch_all().await?.len() + 1;
        debug!(next_row, "appending row");

        let response = self
            .client
            .post(format!("{}:append", self.values_url(&self.sheet_name)))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.api_token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        self.check(response).await?;
        info!(next_row, "appended row to spreadsheet");
        Ok(())
    }

    async fn update_at(&self, row_reference: u32, row: Vec<String>) -> Result<(), GatewayError> {
        let range = format!("{}!A{}:Q{}", self.sheet_name, row_reference, row_reference);
        let response = self
            .client
            .put(self.values_url(&range))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.api_token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        self.check(response).await?;
        info!(row_reference, "updated spreadsheet row");
        Ok(())
    }

    async fn delete_at(&self, row_reference: u32) -> Result<(), GatewayError> {
        // deleteDimension takes a 0-based, end-exclusive row range on the
        // numeric sheet id.
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": self.sheet_gid,
                        "dimension": "ROWS",
                        "startIndex": row_reference - 1,
                        "endIndex": row_reference
                    }
                }
            }]
        });
        let response = self
            .client
            .post(format!(
                "{}/{}:batchUpdate",
                SHEETS_API_BASE, self.spreadsheet_id
            ))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;
        self.check(response).await?;
        info!(row_reference, "deleted spreadsheet row");
        Ok(())
    }
}

/// In-process `SheetStore` used by the test suite.
///
/// Reproduces the positional semantics of the remote store: updates land at
/// an absolute row, padding the grid when the target is past the end, and
/// deletes shift every subsequent row up by one.
#[derive(Default)]
pub struct MemorySheet {
    rows: RwLock<Grid>,
}

impl MemorySheet {
    pub fn new(grid: Grid) -> Self {
        MemorySheet {
            rows: RwLock::new(grid),
        }
    }

    pub async fn snapshot(&self) -> Grid {
        self.rows.read().await.clone()
    }
}

fn to_cells(row: Vec<String>) -> Vec<Value> {
    row.into_iter().map(Value::String).collect()
}

#[async_trait]
impl SheetStore for MemorySheet {
    async fn fetch_all(&self) -> Result<Grid, GatewayError> {
        Ok(self.rows.read().await.clone())
    }

    async fn append(&self, row: Vec<String>) -> Result<(), GatewayError> {
        self.rows.write().await.push(to_cells(row));
        Ok(())
    }

    async fn update_at(&self, row_reference: u32, row: Vec<String>) -> Result<(), GatewayError> {
        let mut rows = self.rows.write().await;
        let idx = row_reference as usize - 1;
        if idx >= rows.len() {
            rows.resize(idx + 1, Vec::new());
        }
        rows[idx] = to_cells(row);
        Ok(())
    }

    async fn delete_at(&self, row_reference: u32) -> Result<(), GatewayError> {
        let mut rows = self.rows.write().await;
        let idx = row_reference as usize - 1;
        if idx >= rows.len() {
            return Err(GatewayError::Remote {
                status: 400,
                message: format!("Invalid requests[0].deleteDimension: row {} out of bounds", row_reference),
            });
        }
        rows.remove(idx);
        Ok(())
    }
}
