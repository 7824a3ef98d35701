//! Runtime configuration, read from the environment (a local `.env` file is
//! honored via dotenvy).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const DEFAULT_SPREADSHEET_ID: &str = "1c_SPp4R6KlL6e3-EfRY0dtK4rfhFrCn5i4sz7cUXr30";
const DEFAULT_SHEET_NAME: &str = "Sheet1";
const DEFAULT_ADMIN_USERNAME: &str = "AdminKurahan";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Fixed spreadsheet identifier of the external datastore.
    pub spreadsheet_id: String,
    /// Sheet/range name used for all value reads and writes.
    pub sheet_name: String,
    /// Numeric sheet id (gid), needed by row deletion.
    pub sheet_gid: i64,
    /// Bearer token for the Sheets API. Minting and refreshing the token is
    /// external to this service.
    pub api_token: String,
    pub admin_username: String,
    pub admin_password: String,
    /// Optional static token accepted on write routes, kept for clients
    /// that authenticate with a header instead of a session.
    pub admin_token: Option<String>,
    /// Directory holding the static site; uploads live beneath it.
    pub public_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = get("SHEETS_API_TOKEN")
            .filter(|v| !v.is_empty())
            .context("SHEETS_API_TOKEN is not set; the spreadsheet gateway cannot authenticate")?;

        let sheet_gid = match get("SHEET_GID") {
            Some(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("SHEET_GID is not a number: {}", raw))?,
            None => 0,
        };

        Ok(AppConfig {
            spreadsheet_id: get("SPREADSHEET_ID")
                .unwrap_or_else(|| DEFAULT_SPREADSHEET_ID.to_string()),
            sheet_name: get("SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            sheet_gid,
            api_token,
            admin_username: get("ADMIN_USERNAME")
                .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string()),
            admin_password: get("ADMIN_PASSWORD").context("ADMIN_PASSWORD is not set")?,
            admin_token: get("ADMIN_TOKEN").filter(|v| !v.is_empty()),
            public_dir: PathBuf::from(get("PUBLIC_DIR").unwrap_or_else(|| "public".to_string())),
        })
    }

    /// Append-only upload storage, served under `/uploads`.
    pub fn uploads_dir(&self) -> PathBuf {
        self.public_dir.join("uploads")
    }

    /// Configuration for tests: fixed values, no environment reads.
    pub fn for_tests(public_dir: &Path) -> Self {
        AppConfig {
            spreadsheet_id: "test-spreadsheet".to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            sheet_gid: 0,
            api_token: "test-token".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "hunter2".to_string(),
            admin_token: Some("static-admin-token".to_string()),
            public_dir: public_dir.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn minimal_env_uses_defaults() {
        let config = AppConfig::from_lookup(env(&[
            ("SHEETS_API_TOKEN", "tok"),
            ("ADMIN_PASSWORD", "pw"),
        ]))
        .unwrap();

        assert_eq!(config.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!(config.sheet_gid, 0);
        assert_eq!(config.admin_username, DEFAULT_ADMIN_USERNAME);
        assert_eq!(config.admin_token, None);
        assert_eq!(config.uploads_dir(), PathBuf::from("public/uploads"));
    }

    #[test]
    fn missing_api_token_is_an_error() {
        let err = AppConfig::from_lookup(env(&[("ADMIN_PASSWORD", "pw")])).unwrap_err();
        assert!(err.to_string().contains("SHEETS_API_TOKEN"));
    }

    #[test]
    fn bad_sheet_gid_is_an_error() {
        let result = AppConfig::from_lookup(env(&[
            ("SHEETS_API_TOKEN", "tok"),
            ("ADMIN_PASSWORD", "pw"),
            ("SHEET_GID", "main"),
        ]));
        assert!(result.is_err());
    }
}
