//! Service-account authentication (OAuth 2.0 JWT bearer grant).

use crate::sheets::SheetsError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

/// OAuth scope granting read/write access to spreadsheets.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before Google says they expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Clone)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ServiceAccountCredentials {
    /// Build credentials when both parts are configured.
    ///
    /// Keys pasted into environment variables usually carry literal `\n`
    /// sequences; those are turned back into newlines.
    pub fn from_parts(client_email: Option<String>, private_key: Option<String>) -> Option<Self> {
        match (client_email, private_key) {
            (Some(client_email), Some(private_key)) => Some(Self {
                client_email,
                private_key: private_key.replace("\\n", "\n"),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Signs the JWT assertion for the token endpoint.
fn sign_assertion(
    credentials: &ServiceAccountCredentials,
    token_url: &str,
    now: DateTime<Utc>,
) -> Result<String, SheetsError> {
    let claims = Claims {
        iss: &credentials.client_email,
        scope: SHEETS_SCOPE,
        aud: token_url,
        iat: now.timestamp(),
        exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
    };
    let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())?;
    Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
}

/// Exchanges service-account assertions for access tokens, caching the
/// current token until shortly before it expires.
pub struct TokenProvider {
    http: reqwest::Client,
    credentials: Option<ServiceAccountCredentials>,
    token_url: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        http: reqwest::Client,
        credentials: Option<ServiceAccountCredentials>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            credentials,
            token_url: token_url.into(),
            cached: Mutex::new(None),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// A bearer token valid for at least another minute.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SheetsError::MissingCredentials)?;

        let mut cached = self.cached.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now {
                return Ok(token.token.clone());
            }
        }

        debug!("Requesting Google access token for {}", credentials.client_email);
        let assertion = sign_assertion(credentials, &self.token_url, now)?;

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Token { status, body });
        }

        let token: TokenResponse = response.json().await?;
        let expires_at = Duration::try_seconds(token.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| SheetsError::Token {
                status: 200,
                body: format!("expires_in out of range: {}", token.expires_in),
            })?;
        *cached = Some(CachedToken {
            token: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }
}
