use anyhow::{Context, Result};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use wedding_invitation::api::{self, AppState};
use wedding_invitation::config::Config;
use wedding_invitation::sheets::GoogleSheetsClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wedding_invitation=info".parse()?),
        )
        .init();

    info!("Starting wedding invitation server");

    let config = Config::from_env()?;

    // Both are checked per request; the site itself still works without them
    if config.google_sheet_id.is_none() {
        warn!("GOOGLE_SHEET_ID is not set, RSVP submissions will fail");
    }
    let sheets = GoogleSheetsClient::new(&config);
    if !sheets.has_credentials() {
        warn!("Google service account credentials are not set, RSVP submissions will fail");
    }

    let state = AppState {
        store: Arc::new(sheets),
        spreadsheet_id: config.google_sheet_id.clone(),
        range: config.google_sheets_range.clone(),
    };

    let addr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), config.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, api::app(state))
        .await
        .context("Server terminated unexpectedly")
}
