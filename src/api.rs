//! HTTP surface: RSVP ingestion, language switching and the allergy sheet,
//! assembled into one axum [`Router`] behind the locale middleware.

use crate::allergy::{AllergenCategory, AllergySelection, CATALOG};
use crate::i18n::Locale;
use crate::pages;
use crate::router::{self, encode_path, preference_cookie, switch_locale_path};
use crate::rsvp::row::{build_row, seoul_now};
use crate::rsvp::RsvpSubmission;
use crate::sheets::{RowStore, SheetsError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{error, info, Level};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RowStore>,
    pub spreadsheet_id: Option<String>,
    pub range: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Spreadsheet ID missing")]
    MissingSpreadsheetId,

    #[error(transparent)]
    RowStore(#[from] SheetsError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Invalid redirect target: {0}")]
    InvalidRedirect(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingSpreadsheetId | ApiError::RowStore(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidBody(_) | ApiError::InvalidRedirect(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedLocale(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `POST /api/rsvp`: append one spreadsheet row per accepted submission.
pub async fn submit_rsvp(
    State(state): State<AppState>,
    payload: Result<Json<RsvpSubmission>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = append_submission(&state, payload).await;
    if let Err(e) = &result {
        error!("RSVP Error: {}", e);
    }
    result
}

async fn append_submission(
    state: &AppState,
    payload: Result<Json<RsvpSubmission>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(submission) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let spreadsheet_id = state
        .spreadsheet_id
        .as_deref()
        .ok_or(ApiError::MissingSpreadsheetId)?;

    let row = build_row(&submission, seoul_now());
    state
        .store
        .append_row(spreadsheet_id, &state.range, &row)
        .await?;

    info!(
        "RSVP recorded ({}, {} guests, locale {})",
        submission.attendance, submission.guests, submission.locale
    );
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct SwitchParams {
    path: Option<String>,
}

/// `GET /api/locale/{code}?path=...`: persist the choice and send the visitor
/// to the same page in the chosen locale.
///
/// `path` arrives decoded; it is re-encoded segment by segment before it
/// becomes the `Location` header.
pub async fn switch_locale(
    Path(code): Path<String>,
    Query(params): Query<SwitchParams>,
) -> Result<Response, ApiError> {
    let locale = Locale::from_code(&code).map_err(|_| ApiError::UnsupportedLocale(code))?;

    let current = params.path.unwrap_or_else(|| "/".to_string());
    let target = encode_path(&switch_locale_path(&current, locale));
    let location =
        HeaderValue::try_from(target.as_str()).map_err(|_| ApiError::InvalidRedirect(target))?;

    Ok((
        StatusCode::SEE_OTHER,
        [(header::SET_COOKIE, preference_cookie(locale))],
        [(header::LOCATION, location)],
    )
        .into_response())
}

/// `GET /allergy`
pub async fn allergy_catalog() -> Json<&'static [AllergenCategory]> {
    Json(CATALOG)
}

#[derive(Debug, Deserialize)]
pub struct PhraseRequest {
    #[serde(default)]
    selected: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PhraseResponse {
    korean: String,
    japanese: String,
}

/// `POST /allergy/phrase`
pub async fn allergy_phrase(Json(request): Json<PhraseRequest>) -> Json<PhraseResponse> {
    let selection = AllergySelection::new(request.selected);
    Json(PhraseResponse {
        korean: selection.korean_phrase(),
        japanese: selection.japanese_phrase(),
    })
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/rsvp", post(submit_rsvp))
        .route("/api/locale/:code", get(switch_locale))
        .route("/allergy", get(allergy_catalog))
        .route("/allergy/phrase", post(allergy_phrase))
        .fallback(pages::page)
        .layer(middleware::from_fn(router::locale_redirect))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(state)
}
