//! Integration tests for the wedding invitation site
//!
//! These tests drive the assembled axum router: they cover the locale
//! redirects, page rendering, the RSVP endpoint and the allergy API.
//! Spreadsheet access is replaced by an in-memory row store, except in
//! the end-to-end test that talks to a mocked Google endpoint.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use wedding_invitation::api::{app, AppState};
use wedding_invitation::i18n::Locale;
use wedding_invitation::rsvp::{Attendance, HttpRsvpClient, RsvpForm, SubmitError};
use wedding_invitation::sheets::{
    GoogleSheetsClient, RowStore, ServiceAccountCredentials, SheetsError,
};

const TEST_KEY: &str = include_str!("fixtures/test_service_account_key.pem");

// ==================== Test Helpers ====================

/// Row store keeping appended rows in memory
#[derive(Default)]
struct MemoryStore {
    rows: Mutex<Vec<(String, String, Vec<String>)>>,
}

impl MemoryStore {
    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, row)| row.clone())
            .collect()
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: &[String],
    ) -> Result<(), SheetsError> {
        self.rows.lock().unwrap().push((
            spreadsheet_id.to_string(),
            range.to_string(),
            row.to_vec(),
        ));
        Ok(())
    }
}

/// Row store that always fails like a rejected Sheets call
struct FailingStore;

#[async_trait]
impl RowStore for FailingStore {
    async fn append_row(&self, _: &str, _: &str, _: &[String]) -> Result<(), SheetsError> {
        Err(SheetsError::Api {
            status: 403,
            body: "The caller does not have permission".to_string(),
        })
    }
}

fn test_app(store: Arc<dyn RowStore>, spreadsheet_id: Option<&str>) -> Router {
    app(AppState {
        store,
        spreadsheet_id: spreadsheet_id.map(str::to_string),
        range: "Sheet1!A:H".to_string(),
    })
}

fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (test_app(store.clone(), Some("sheet-123")), store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

fn kim_submission() -> serde_json::Value {
    serde_json::json!({
        "name": "Kim",
        "attendance": "yes",
        "guests": 2,
        "message": "",
        "countryCode": "+82",
        "phone": "1012345678",
        "email": "",
        "locale": "ko"
    })
}

// ==================== Locale Redirect Tests ====================

#[tokio::test]
async fn test_unlocalized_path_redirects_to_fallback() {
    let (app, _) = memory_app();
    let response = app.oneshot(get("/rsvp")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/ko/rsvp");
}

#[tokio::test]
async fn test_redirect_keeps_query_string() {
    let (app, _) = memory_app();
    let response = app.oneshot(get("/gallery?photo=3")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/ko/gallery?photo=3");
}

#[tokio::test]
async fn test_root_uses_preference_cookie() {
    let (app, _) = memory_app();
    let request = Request::builder()
        .uri("/")
        .header(header::COOKIE, "theme=dark; i18next=ja")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/ja");
}

#[tokio::test]
async fn test_root_without_cookie_goes_to_korean() {
    let (app, _) = memory_app();
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(location(&response), "/ko");
}

#[tokio::test]
async fn test_root_ignores_unknown_cookie_value() {
    let (app, _) = memory_app();
    let request = Request::builder()
        .uri("/")
        .header(header::COOKIE, "i18next=fr")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(location(&response), "/ko");
}

#[tokio::test]
async fn test_excluded_paths_are_not_redirected() {
    let (app, _) = memory_app();
    let response = app.clone().oneshot(get("/allergy")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/images/cover.jpg")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ==================== Page Tests ====================

#[tokio::test]
async fn test_korean_page_renders() {
    let (app, _) = memory_app();
    let response = app.oneshot(get("/ko")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"<html lang="ko">"#));
    assert!(html.contains("최인회"));
    assert!(html.contains("/api/locale/ja?path=%2Fko\""));
}

#[tokio::test]
async fn test_japanese_subpage_renders() {
    let (app, _) = memory_app();
    let response = app.oneshot(get("/ja/rsvp")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"<html lang="ja">"#));
    assert!(html.contains("送信する"));
}

// ==================== Language Switch Tests ====================

#[tokio::test]
async fn test_switch_locale_sets_cookie_and_redirects() {
    let (app, _) = memory_app();
    let response = app
        .oneshot(get("/api/locale/ja?path=/ko/rsvp"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/ja/rsvp");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("i18next=ja;"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=31536000"));
}

#[tokio::test]
async fn test_switch_locale_without_path_goes_to_locale_root() {
    let (app, _) = memory_app();
    let response = app.oneshot(get("/api/locale/ko")).await.unwrap();
    assert_eq!(location(&response), "/ko");
}

#[tokio::test]
async fn test_switcher_link_round_trips_non_ascii_path() {
    let (app, _) = memory_app();
    let page = app.clone().oneshot(get("/ko/%EA%B0%80")).await.unwrap();
    let html = body_string(page).await;
    assert!(html.contains("/api/locale/ja?path=%2Fko%2F%EA%B0%80\""));

    let response = app
        .oneshot(get("/api/locale/ja?path=%2Fko%2F%EA%B0%80"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/ja/%EA%B0%80");
}

#[tokio::test]
async fn test_switch_locale_encodes_control_characters() {
    let (app, _) = memory_app();
    let response = app
        .oneshot(get("/api/locale/ja?path=/ko/%0Ax"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/ja/%0Ax");
}

#[tokio::test]
async fn test_switch_locale_keeps_ampersand_in_path() {
    let (app, _) = memory_app();
    let response = app
        .oneshot(get("/api/locale/ja?path=%2Fko%2Fa%26b%3Dc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/ja/a%26b%3Dc");
}

#[tokio::test]
async fn test_switch_to_unknown_locale_is_not_found() {
    let (app, _) = memory_app();
    let response = app.oneshot(get("/api/locale/fr?path=/ko")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unsupported locale: fr");
}

// ==================== RSVP Endpoint Tests ====================

#[tokio::test]
async fn test_rsvp_appends_one_row() {
    let (app, store) = memory_app();
    let response = app
        .oneshot(post_json("/api/rsvp", kim_submission()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "success": true }));

    let rows = store.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.len(), 8);
    assert_eq!(row[2], "Kim");
    assert_eq!(row[3], "'+82 1012345678");
    assert_eq!(row[4], "");
    assert_eq!(row[5], "yes");
    assert_eq!(row[6], "2");
    assert_eq!(row[7], "");
}

#[tokio::test]
async fn test_rsvp_writes_to_configured_sheet_and_range() {
    let (app, store) = memory_app();
    app.oneshot(post_json("/api/rsvp", kim_submission()))
        .await
        .unwrap();

    let recorded = store.rows.lock().unwrap();
    assert_eq!(recorded[0].0, "sheet-123");
    assert_eq!(recorded[0].1, "Sheet1!A:H");
}

#[tokio::test]
async fn test_rsvp_japanese_email_row() {
    let (app, store) = memory_app();
    let body = serde_json::json!({
        "name": "田中",
        "attendance": "no",
        "guests": 0,
        "message": "おめでとう",
        "countryCode": "+81",
        "phone": "",
        "email": "tanaka@example.jp",
        "locale": "ja"
    });
    let response = app.oneshot(post_json("/api/rsvp", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let row = &store.rows()[0];
    assert_eq!(row[3], "");
    assert_eq!(row[4], "'tanaka@example.jp");
    assert_eq!(row[5], "no");
    assert_eq!(row[7], "おめでとう");
}

#[tokio::test]
async fn test_rsvp_without_sheet_id() {
    let store = Arc::new(MemoryStore::default());
    let app = test_app(store.clone(), None);

    let response = app
        .oneshot(post_json("/api/rsvp", kim_submission()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Spreadsheet ID missing" })
    );
    assert!(store.rows().is_empty());
}

#[tokio::test]
async fn test_rsvp_store_failure_reports_message() {
    let app = test_app(Arc::new(FailingStore), Some("sheet-123"));

    let response = app
        .oneshot(post_json("/api/rsvp", kim_submission()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("The caller does not have permission"));
}

#[tokio::test]
async fn test_rsvp_malformed_body_is_rejected() {
    let (app, store) = memory_app();
    let response = app
        .oneshot(post_json("/api/rsvp", serde_json::json!({ "name": "Kim" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
    assert!(store.rows().is_empty());
}

#[tokio::test]
async fn test_duplicate_submissions_append_separate_rows() {
    let (app, store) = memory_app();
    app.clone()
        .oneshot(post_json("/api/rsvp", kim_submission()))
        .await
        .unwrap();
    app.oneshot(post_json("/api/rsvp", kim_submission()))
        .await
        .unwrap();

    assert_eq!(store.rows().len(), 2);
}

// ==================== Allergy API Tests ====================

#[tokio::test]
async fn test_allergy_catalog() {
    let (app, _) = memory_app();
    let response = app.oneshot(get("/allergy")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
    assert_eq!(body[0]["category"], "畜産品");
    assert_eq!(body[0]["items"][0], serde_json::json!({ "ja": "卵", "ko": "계란" }));
}

#[tokio::test]
async fn test_allergy_phrase() {
    let (app, _) = memory_app();
    let response = app
        .oneshot(post_json(
            "/allergy/phrase",
            serde_json::json!({ "selected": ["卵", "えび"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["korean"],
        "저는 계란, 새우에 알레르기가 있습니다. 해당 음식에 위 재료가 들어가 있나요?"
    );
    assert_eq!(
        body["japanese"],
        "私は 卵、えび アレルギーがあります。この料理にこれらが含まれていますか？"
    );
}

// ==================== End-to-End Tests ====================

/// Serve `app` on an ephemeral port and return the RSVP endpoint URL
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/rsvp", addr)
}

#[tokio::test]
async fn test_form_submission_through_server() {
    let (app, store) = memory_app();
    let client = HttpRsvpClient::new(serve(app).await);

    let mut form = RsvpForm::new(Locale::Korean);
    form.set_name("Kim");
    form.set_guests(5);
    form.set_attendance(Some(Attendance::No));
    form.set_phone("1012345678");

    form.submit(&client).await.expect("Submission should succeed");
    assert_eq!(form.status_message(), Some("소중한 답변 감사합니다!"));
    assert_eq!(form.draft().name, "");

    let rows = store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][5], "no");
    assert_eq!(rows[0][6], "0");
}

#[tokio::test]
async fn test_form_keeps_draft_when_server_fails() {
    let app = test_app(Arc::new(MemoryStore::default()), None);
    let client = HttpRsvpClient::new(serve(app).await);

    let mut form = RsvpForm::new(Locale::Japanese);
    form.set_name("田中");
    form.set_email("tanaka@example.jp");

    let error = form.submit(&client).await.unwrap_err();
    assert!(matches!(error, SubmitError::Transport(_)));
    assert!(error.to_string().contains("Spreadsheet ID missing"));
    assert_eq!(form.draft().name, "田中");
}

#[tokio::test]
async fn test_rsvp_reaches_google_sheets() {
    let google = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.test-token",
            "expires_in": 3599
        })))
        .mount(&google)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-123/values/Sheet1!A:H:append"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&google)
        .await;

    let sheets = GoogleSheetsClient::with_endpoints(
        Some(ServiceAccountCredentials {
            client_email: "rsvp@wedding.iam.gserviceaccount.com".to_string(),
            private_key: TEST_KEY.to_string(),
        }),
        &google.uri(),
        &format!("{}/token", google.uri()),
    );
    let app = test_app(Arc::new(sheets), Some("sheet-123"));

    let response = app
        .oneshot(post_json("/api/rsvp", kim_submission()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = google.received_requests().await.unwrap();
    let append = requests
        .iter()
        .find(|r| r.url.path().ends_with(":append"))
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&append.body).unwrap();
    assert_eq!(body["values"][0][3], "'+82 1012345678");
}

#[tokio::test]
async fn test_rsvp_without_credentials_reports_error() {
    let sheets = GoogleSheetsClient::with_endpoints(None, "http://127.0.0.1:9", "http://127.0.0.1:9/token");
    let app = test_app(Arc::new(sheets), Some("sheet-123"));

    let response = app
        .oneshot(post_json("/api/rsvp", kim_submission()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Missing Google Sheets credentials" })
    );
}
