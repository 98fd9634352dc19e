//! Spreadsheet row layout for stored RSVPs.
//!
//! The row-store has no schema of its own, so the column order here is the
//! schema. Reordering requires migrating the existing sheet.

use crate::rsvp::submission::RsvpSubmission;
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Column order of an appended row.
pub const SHEET_COLUMNS: [&str; 8] = [
    "date",
    "time",
    "name",
    "phone",
    "email",
    "attendance",
    "guests",
    "message",
];

/// Marker forcing spreadsheet clients to keep the value as literal text.
pub const TEXT_MARKER: char = '\'';

/// Asia/Seoul is UTC+09:00 all year round.
const SEOUL_OFFSET_SECS: i32 = 9 * 3600;

pub fn seoul_offset() -> FixedOffset {
    FixedOffset::east_opt(SEOUL_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current time in the timezone rows are stamped with.
pub fn seoul_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&seoul_offset())
}

/// `'<country code> <number>`, or empty when no number was given.
pub fn format_phone(country_code: &str, phone: &str) -> String {
    let phone = phone.trim();
    if phone.is_empty() {
        return String::new();
    }
    let country_code = country_code.trim();
    if country_code.is_empty() {
        format!("{}{}", TEXT_MARKER, phone)
    } else {
        format!("{}{} {}", TEXT_MARKER, country_code, phone)
    }
}

/// `'<email>`, or empty when no address was given.
pub fn format_email(email: &str) -> String {
    let email = email.trim();
    if email.is_empty() {
        String::new()
    } else {
        format!("{}{}", TEXT_MARKER, email)
    }
}

/// Build the row for `submission` received at `received_at`.
pub fn build_row(submission: &RsvpSubmission, received_at: DateTime<FixedOffset>) -> Vec<String> {
    vec![
        received_at.format("%Y. %m. %d.").to_string(),
        received_at.format("%H:%M:%S").to_string(),
        submission.name.clone(),
        format_phone(&submission.country_code, &submission.phone),
        format_email(&submission.email),
        submission.attendance.to_string(),
        submission.guests.to_string(),
        submission.message.clone(),
    ]
}
