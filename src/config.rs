use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Google Sheets destination (absence is reported per request, not at startup)
    pub google_sheet_id: Option<String>,
    pub google_sheets_range: String,

    // Google service account
    pub google_sheets_client_email: Option<String>,
    pub google_sheets_private_key: Option<String>,

    // Google endpoints (overridable for testing)
    pub google_sheets_api_url: String,
    pub google_oauth_token_url: String,
}

/// Read an optional variable, treating blank values as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match optional_var("PORT") {
            Some(value) => value
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", value))?,
            None => 8080,
        };

        Ok(Self {
            port,

            google_sheet_id: optional_var("GOOGLE_SHEET_ID"),
            google_sheets_range: optional_var("GOOGLE_SHEETS_RANGE")
                .unwrap_or_else(|| "Sheet1!A:H".to_string()),

            google_sheets_client_email: optional_var("GOOGLE_SHEETS_CLIENT_EMAIL"),
            google_sheets_private_key: optional_var("GOOGLE_SHEETS_PRIVATE_KEY"),

            google_sheets_api_url: optional_var("GOOGLE_SHEETS_API_URL")
                .unwrap_or_else(|| "https://sheets.googleapis.com".to_string()),
            google_oauth_token_url: optional_var("GOOGLE_OAUTH_TOKEN_URL")
                .unwrap_or_else(|| "https://oauth2.googleapis.com/token".to_string()),
        })
    }
}
