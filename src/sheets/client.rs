use crate::config::Config;
use crate::sheets::{RowStore, ServiceAccountCredentials, SheetsError, TokenProvider};
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct AppendRequest<'a> {
    values: [&'a [String]; 1],
}

/// Google Sheets `values:append` client.
///
/// Each call appends one row; there is no retry on failure.
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    api_base: String,
    auth: TokenProvider,
}

impl GoogleSheetsClient {
    pub fn new(config: &Config) -> Self {
        let credentials = ServiceAccountCredentials::from_parts(
            config.google_sheets_client_email.clone(),
            config.google_sheets_private_key.clone(),
        );
        Self::with_endpoints(
            credentials,
            &config.google_sheets_api_url,
            &config.google_oauth_token_url,
        )
    }

    /// Build a client against explicit API and token endpoints.
    pub fn with_endpoints(
        credentials: Option<ServiceAccountCredentials>,
        api_base: &str,
        token_url: &str,
    ) -> Self {
        let http = reqwest::Client::new();
        Self {
            auth: TokenProvider::new(http.clone(), credentials, token_url),
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.auth.has_credentials()
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}:append?valueInputOption=USER_ENTERED`
    fn append_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url, SheetsError> {
        let mut url =
            Url::parse(&self.api_base).map_err(|e| SheetsError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::InvalidUrl(self.api_base.clone()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                spreadsheet_id,
                "values",
                &format!("{}:append", range),
            ]);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        Ok(url)
    }
}

#[async_trait]
impl RowStore for GoogleSheetsClient {
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: &[String],
    ) -> Result<(), SheetsError> {
        let token = self.auth.access_token().await?;
        let url = self.append_url(spreadsheet_id, range)?;

        debug!("Appending {} cells to {}", row.len(), range);
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&AppendRequest { values: [row] })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api { status, body });
        }

        Ok(())
    }
}
