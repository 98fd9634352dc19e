//! Minimal server-rendered pages for `/<locale>` and `/<locale>/...`.

use crate::i18n::{Locale, LocaleRegistry};
use crate::rsvp::{ContactChannel, ContactPolicy, MAX_GUESTS};
use axum::extract::{Extension, OriginalUri};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};

/// 2026-11-28 13:40 KST
pub const WEDDING_TIMESTAMP: i64 = 1_795_840_800;

/// Time left until the ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn is_over(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

/// Breakdown of the time left as of `now`; all zero once the ceremony has started.
pub fn countdown(now: DateTime<Utc>) -> Countdown {
    let remaining = (WEDDING_TIMESTAMP - now.timestamp()).max(0);
    Countdown {
        days: remaining / 86_400,
        hours: (remaining / 3_600) % 24,
        minutes: (remaining / 60) % 60,
        seconds: remaining % 60,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn multiline(text: &str) -> String {
    text.lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>")
}

fn countdown_line(locale: Locale, now: DateTime<Utc>) -> String {
    let strings = locale.strings();
    let left = countdown(now);
    if left.is_over() {
        return strings.countdown_passed.to_string();
    }
    strings
        .countdown
        .replace("{days}", &left.days.to_string())
        .replace("{hours}", &left.hours.to_string())
        .replace("{minutes}", &left.minutes.to_string())
        .replace("{seconds}", &left.seconds.to_string())
}

/// Links to `/api/locale/{code}` for every locale. `path` is the decoded
/// current path and travels as one encoded query value.
fn language_switcher(locale: Locale, path: &str) -> String {
    let path = urlencoding::encode(path);
    LocaleRegistry::get()
        .list_all()
        .iter()
        .filter_map(|config| Locale::from_code(config.code).ok())
        .map(|target| {
            let current = if target == locale {
                r#" aria-current="true""#
            } else {
                ""
            };
            format!(
                r#"<a href="/api/locale/{code}?path={path}" lang="{code}" title="{native}"{current}>{label}</a>"#,
                code = target.code(),
                path = path,
                native = target.native_name(),
                current = current,
                label = target.config().switcher_label,
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn rsvp_form(locale: Locale) -> String {
    let strings = locale.strings();
    let policy = ContactPolicy::for_locale(locale);
    let required = |channel: ContactChannel| if policy.requires(channel) { " required" } else { "" };

    let guest_options = (0..=MAX_GUESTS)
        .map(|n| format!(r#"<option value="{}">{}</option>"#, n, escape_html(&strings.guests_label(n))))
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<form id="rsvp" data-endpoint="/api/rsvp" data-locale="{code}">
<h2>{title}</h2>
<p>{guide}</p>
<label>{name}<input name="name" required></label>
<label>{phone}<select name="countryCode"><option value="+82"{kr}>KR (+82)</option><option value="+81"{jp}>JP (+81)</option></select><input name="phone" type="tel"{phone_required}></label>
<label>{email}<input name="email" type="email"{email_required}></label>
<fieldset><label><input type="radio" name="attendance" value="yes" checked>{yes}</label><label><input type="radio" name="attendance" value="no">{no}</label></fieldset>
<select name="guests">{guest_options}</select>
<label>{message}<textarea name="message" rows="4"></textarea></label>
<button type="submit">{send}</button>
</form>"#,
        code = locale.code(),
        title = escape_html(strings.rsvp_title),
        guide = multiline(strings.rsvp_guide),
        name = escape_html(strings.rsvp_name),
        phone = escape_html(strings.rsvp_phone),
        kr = if locale.default_country_code() == "+82" { " selected" } else { "" },
        jp = if locale.default_country_code() == "+81" { " selected" } else { "" },
        phone_required = required(ContactChannel::Phone),
        email = escape_html(strings.rsvp_email),
        email_required = required(ContactChannel::Email),
        yes = escape_html(strings.attendance_yes),
        no = escape_html(strings.attendance_no),
        guest_options = guest_options,
        message = escape_html(strings.rsvp_message),
        send = escape_html(strings.rsvp_btn_send),
    )
}

/// Render the invitation page for `locale` as of `now`.
pub fn render_invitation(locale: Locale, path: &str, now: DateTime<Utc>) -> String {
    let strings = locale.strings();
    format!(
        r#"<!DOCTYPE html>
<html lang="{code}">
<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title></head>
<body>
<nav>{switcher}</nav>
<header><h1>{groom_name} &amp; {bride_name}</h1><p>{subtitle}</p></header>
<section id="invitation"><p>{invitation}</p><p>{groom} {groom_name} · {bride} {bride_name}</p></section>
<section id="calendar"><p>{date}</p><p>{countdown}</p></section>
{form}
</body>
</html>
"#,
        code = locale.code(),
        title = escape_html(strings.page_title),
        switcher = language_switcher(locale, path),
        groom = escape_html(strings.groom),
        groom_name = escape_html(strings.groom_name),
        bride = escape_html(strings.bride),
        bride_name = escape_html(strings.bride_name),
        subtitle = escape_html(strings.hero_subtitle),
        invitation = multiline(strings.invitation_text),
        date = escape_html(strings.wedding_date),
        countdown = escape_html(&countdown_line(locale, now)),
        form = rsvp_form(locale),
    )
}

/// Fallback handler: serves every localized path, 404 for anything else.
///
/// The locale comes from the router middleware; requests it did not
/// localize carry none.
pub async fn page(locale: Option<Extension<Locale>>, OriginalUri(uri): OriginalUri) -> Response {
    match locale {
        Some(Extension(locale)) => {
            let path = urlencoding::decode(uri.path())
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| uri.path().to_string());
            Html(render_invitation(locale, &path, Utc::now())).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
