//! Locale router: makes sure every page request carries a supported locale
//! segment before it reaches page rendering.
//!
//! The decision itself is the pure [`resolve`] function; [`locale_redirect`]
//! is the axum middleware wrapping it at the edge of the request pipeline.

use crate::i18n::{Locale, LocaleRegistry, PREFERENCE_COOKIE, PREFERENCE_MAX_AGE_SECS};
use axum::extract::Request;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

/// Path prefixes (after the leading `/`) that are never localized.
pub const EXCLUDED_PREFIXES: &[&str] = &[
    "api",
    "_next/static",
    "_next/image",
    "images",
    "favicon.ico",
    "allergy",
];

/// Outcome of routing a single request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve the request unchanged. Carries the locale named by the path,
    /// or `None` for excluded (non-localized) paths.
    PassThrough(Option<Locale>),
    /// Redirect to the given path.
    Redirect(String),
}

/// Decide whether `path` is served as-is or redirected.
///
/// # Arguments
/// * `path` - The request path, without query string
/// * `preference` - Raw value of the locale preference cookie, if any. It is
///   only consulted for the site root; unknown values are ignored.
///
/// # Returns
/// * `RouteDecision::Redirect` for the root and for unlocalized page paths
/// * `RouteDecision::PassThrough` for localized and excluded paths
pub fn resolve(path: &str, preference: Option<&str>) -> RouteDecision {
    let fallback = Locale::fallback();

    if path == "/" {
        let preferred = preference
            .filter(|code| LocaleRegistry::get().is_supported(code))
            .and_then(|code| Locale::from_code(code).ok());
        let locale = preferred.unwrap_or(fallback);
        return RouteDecision::Redirect(format!("/{}", locale.code()));
    }

    if is_excluded(path) {
        return RouteDecision::PassThrough(None);
    }

    if let Some(locale) = locale_of_path(path) {
        return RouteDecision::PassThrough(Some(locale));
    }

    let separator = if path.starts_with('/') { "" } else { "/" };
    RouteDecision::Redirect(format!("/{}{}{}", fallback.code(), separator, path))
}

/// The locale named by the first path segment.
///
/// # Arguments
/// * `path` - The request path (e.g., "/ja/rsvp")
///
/// # Returns
/// * `Some(Locale)` if the path is exactly `/<locale>` or starts with `/<locale>/`
/// * `None` otherwise, including `/kor` or `/japan`
pub fn locale_of_path(path: &str) -> Option<Locale> {
    Locale::ALL.into_iter().find(|locale| {
        let prefix = format!("/{}", locale.code());
        path == prefix || path.starts_with(&format!("{}/", prefix))
    })
}

/// Whether the path belongs to a route that is never localized.
///
/// Prefixes are compared as plain string prefixes of the path without its
/// leading `/`, so `/images2` is excluded as well as `/images/a.png`.
pub fn is_excluded(path: &str) -> bool {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

/// Rewrite `path` so that it names `locale` instead of its current locale.
///
/// # Arguments
/// * `path` - A decoded site path (e.g., "/ko/rsvp"); empty means the root
/// * `locale` - The locale to switch to
///
/// # Returns
/// The same path with its first segment set to `locale`. A path without a
/// locale segment gets one prepended.
pub fn switch_locale_path(path: &str, locale: Locale) -> String {
    let code = locale.code();
    if path.is_empty() || path == "/" {
        return format!("/{}", code);
    }

    match locale_of_path(path) {
        Some(current) => format!("/{}{}", code, &path[current.code().len() + 1..]),
        None if path.starts_with('/') => format!("/{}{}", code, path),
        None => format!("/{}/{}", code, path),
    }
}

/// Percent-encode each segment of a decoded path, keeping the `/` separators.
///
/// The result is plain ASCII, safe to use as a `Location` header value or
/// as a query parameter.
///
/// # Arguments
/// * `path` - A decoded path (e.g., "/ja/가")
///
/// # Returns
/// The encoded path (e.g., "/ja/%EA%B0%80")
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read the locale preference cookie from request headers.
///
/// # Returns
/// * `Some(value)` with the trimmed raw value of the first `i18next` cookie
/// * `None` if no such cookie was sent
pub fn preference_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == PREFERENCE_COOKIE)
        .map(|(_, value)| value.trim().to_string())
}

/// `Set-Cookie` value persisting the visitor's locale choice site-wide.
///
/// # Arguments
/// * `locale` - The locale the visitor picked
///
/// # Returns
/// A cookie valid for every path for one year
/// (e.g., `i18next=ja; Path=/; Max-Age=31536000; SameSite=Lax`).
pub fn preference_cookie(locale: Locale) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        PREFERENCE_COOKIE,
        locale.code(),
        PREFERENCE_MAX_AGE_SECS
    )
}

/// Middleware applying [`resolve`] to every request.
///
/// Redirects are `307 Temporary Redirect` and carry the original query
/// string. Localized requests get their [`Locale`] inserted as a request
/// extension; excluded requests pass through untouched.
pub async fn locale_redirect(mut req: Request, next: Next) -> Response {
    let preference = preference_from_headers(req.headers());

    match resolve(req.uri().path(), preference.as_deref()) {
        RouteDecision::Redirect(mut target) => {
            if let Some(query) = req.uri().query() {
                target.push('?');
                target.push_str(query);
            }
            debug!("Redirecting {} -> {}", req.uri().path(), target);
            Redirect::temporary(&target).into_response()
        }
        RouteDecision::PassThrough(Some(locale)) => {
            req.extensions_mut().insert(locale);
            next.run(req).await
        }
        RouteDecision::PassThrough(None) => next.run(req).await,
    }
}
