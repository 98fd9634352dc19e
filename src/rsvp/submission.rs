use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest guest count a submission may carry.
pub const MAX_GUESTS: u8 = 10;

/// Whether the guest will attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Yes,
    No,
}

impl Attendance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Yes => "yes",
            Attendance::No => "no",
        }
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RSVP record as sent from the form to `POST /api/rsvp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub name: String,
    pub attendance: Attendance,
    pub guests: u8,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "Locale::fallback")]
    pub locale: Locale,
}
