//! Append-only row-store backed by the Google Sheets v4 API.

mod auth;
mod client;

pub use auth::{ServiceAccountCredentials, TokenProvider, SHEETS_SCOPE};
pub use client::GoogleSheetsClient;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Missing Google Sheets credentials")]
    MissingCredentials,

    #[error("Invalid service account private key: {0}")]
    InvalidKey(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid Sheets API URL: {0}")]
    InvalidUrl(String),

    #[error("Request to Google failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Google token endpoint error ({status}): {body}")]
    Token { status: u16, body: String },

    #[error("Google Sheets API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Destination for RSVP rows. Rows can only be appended.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Append exactly one row to `range` of the spreadsheet `spreadsheet_id`.
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: &[String],
    ) -> Result<(), SheetsError>;
}
