pub mod app;
pub mod handlers;
pub mod session;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::sheets::GoogleSheetsGateway;

pub async fn start_server(port: u16, config: AppConfig) -> Result<()> {
    let gateway = GoogleSheetsGateway::new(
        config.spreadsheet_id.clone(),
        config.sheet_name.clone(),
        config.sheet_gid,
        config.api_token.clone(),
    );

    let config = Arc::new(config);
    let app = app::create_app(Arc::new(gateway), config.clone())?;

    log_routes(&config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes(config: &AppConfig) {
    info!("Spreadsheet ID: {}", config.spreadsheet_id);
    info!("Available endpoints:");
    info!("  GET    /data        - Fetch all data from spreadsheet");
    info!("  POST   /data        - Add new row to spreadsheet");
    info!("  PUT    /data/:row   - Update specific row");
    info!("  DELETE /data/:row   - Delete specific row");
    info!("  POST   /upload      - Store an uploaded image");
    info!("  POST   /login, /logout, GET /auth/status - admin session");
    info!("  GET    /health      - Health check");
    info!(
        "  static site from {} (uploads under /uploads)",
        config.public_dir.display()
    );
}
