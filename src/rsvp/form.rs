//! Client-side RSVP form: draft record, locale-keyed contact policy,
//! field-scoped validation and the submission state machine.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──2xx──────▶ Success ──dismiss / 5s──▶ Idle
//!   ▲                   └──error/non-2xx──▶ Error ──dismiss──────────▶ Idle
//!   └───────────────────────────────────────────┘ (resubmit allowed from Error)
//! ```

use crate::i18n::Locale;
use crate::rsvp::client::{RsvpTransport, TransportError};
use crate::rsvp::submission::{Attendance, RsvpSubmission, MAX_GUESTS};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// How long the success confirmation stays up before the form returns to idle.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

/// Minimum length of a phone number (country code excluded).
pub const MIN_PHONE_LEN: usize = 8;

// ==================== Contact Policy ====================

/// A way of reaching the guest after they reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactChannel {
    Phone,
    Email,
}

/// Which contact channel a locale requires.
///
/// Both fields are shown in every locale; only the required one is
/// format-checked; the other is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPolicy {
    /// Korean guests must leave a phone number.
    PhoneRequired,
    /// Japanese guests must leave an email address.
    EmailRequired,
}

impl ContactPolicy {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Korean => ContactPolicy::PhoneRequired,
            Locale::Japanese => ContactPolicy::EmailRequired,
        }
    }

    pub fn required_channel(&self) -> ContactChannel {
        match self {
            ContactPolicy::PhoneRequired => ContactChannel::Phone,
            ContactPolicy::EmailRequired => ContactChannel::Email,
        }
    }

    pub fn requires(&self, channel: ContactChannel) -> bool {
        self.required_channel() == channel
    }
}

// ==================== Validation ====================

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Attendance,
    Guests,
    Phone,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("required")]
    Required,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid phone")]
    InvalidPhone,
    #[error("guest count must be between 0 and {}", MAX_GUESTS)]
    GuestsOutOfRange,
}

/// All field errors found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(Field, FieldError)>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, error: FieldError) {
        self.errors.push((field, error));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, error)| *error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, FieldError)> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, error)| format!("{:?}: {}", field, error))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Standard email syntax check: local part, `@`, dotted domain with a
/// top-level label of at least two letters.
pub fn is_valid_email(email: &str) -> bool {
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
        )
        .expect("Invalid email regex")
    });
    !email.starts_with('.') && !email.contains("..") && regex.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().count() >= MIN_PHONE_LEN
}

// ==================== Draft ====================

/// The in-progress, unsubmitted record. Owned exclusively by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpDraft {
    pub name: String,
    pub attendance: Option<Attendance>,
    pub guests: u8,
    pub message: String,
    pub country_code: String,
    pub phone: String,
    pub email: String,
}

impl RsvpDraft {
    /// Default field values for a form rendered in `locale`.
    pub fn defaults_for(locale: Locale) -> Self {
        Self {
            name: String::new(),
            attendance: Some(Attendance::Yes),
            guests: 0,
            message: String::new(),
            country_code: locale.default_country_code().to_string(),
            phone: String::new(),
            email: String::new(),
        }
    }

    /// Validate against `policy` and produce the record to send.
    ///
    /// The guest count is forced to 0 for non-attending guests whatever the
    /// field last held.
    pub fn validate(
        &self,
        locale: Locale,
        policy: ContactPolicy,
    ) -> Result<RsvpSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.push(Field::Name, FieldError::Required);
        }

        let attendance = match self.attendance {
            Some(attendance) => Some(attendance),
            None => {
                errors.push(Field::Attendance, FieldError::Required);
                None
            }
        };

        let guests = if attendance == Some(Attendance::No) {
            0
        } else {
            self.guests
        };
        if guests > MAX_GUESTS {
            errors.push(Field::Guests, FieldError::GuestsOutOfRange);
        }

        // Checked on the trimmed value, the same one the spreadsheet row gets
        let phone = self.phone.trim();
        let email = self.email.trim();
        match policy.required_channel() {
            ContactChannel::Phone => {
                if phone.is_empty() {
                    errors.push(Field::Phone, FieldError::Required);
                } else if !is_valid_phone(phone) {
                    errors.push(Field::Phone, FieldError::InvalidPhone);
                }
            }
            ContactChannel::Email => {
                if email.is_empty() {
                    errors.push(Field::Email, FieldError::Required);
                } else if !is_valid_email(email) {
                    errors.push(Field::Email, FieldError::InvalidEmail);
                }
            }
        }

        match attendance {
            Some(attendance) if errors.is_empty() => Ok(RsvpSubmission {
                name: self.name.clone(),
                attendance,
                guests,
                message: self.message.clone(),
                country_code: self.country_code.clone(),
                phone: phone.to_string(),
                email: email.to_string(),
                locale,
            }),
            _ => Err(errors),
        }
    }
}

// ==================== State Machine ====================

/// State of a single submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success { shown_at: Instant },
    Error,
}

impl FormState {
    fn name(&self) -> &'static str {
        match self {
            FormState::Idle => "idle",
            FormState::Submitting => "submitting",
            FormState::Success { .. } => "success",
            FormState::Error => "error",
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("cannot submit while the form is {0}")]
    InvalidState(&'static str),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// RSVP form bound to the locale it was rendered in.
#[derive(Debug, Clone)]
pub struct RsvpForm {
    locale: Locale,
    policy: ContactPolicy,
    draft: RsvpDraft,
    errors: ValidationErrors,
    state: FormState,
}

impl RsvpForm {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            policy: ContactPolicy::for_locale(locale),
            draft: RsvpDraft::defaults_for(locale),
            errors: ValidationErrors::default(),
            state: FormState::Idle,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn policy(&self) -> ContactPolicy {
        self.policy
    }

    pub fn draft(&self) -> &RsvpDraft {
        &self.draft
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    // ==================== Field Input ====================

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    /// Choosing "not attending" resets the guest count to 0.
    pub fn set_attendance(&mut self, attendance: Option<Attendance>) {
        self.draft.attendance = attendance;
        if attendance == Some(Attendance::No) {
            self.draft.guests = 0;
        }
    }

    pub fn set_guests(&mut self, guests: u8) {
        self.draft.guests = guests;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.draft.message = message.into();
    }

    pub fn set_country_code(&mut self, country_code: impl Into<String>) {
        self.draft.country_code = country_code.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.draft.phone = phone.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    // ==================== Transitions ====================

    /// Validate and, if valid, send the record through `transport`.
    ///
    /// Invalid drafts never reach the transport. On failure the draft is kept
    /// so the guest can resubmit; on success it is reset to the defaults.
    pub async fn submit<T>(&mut self, transport: &T) -> Result<(), SubmitError>
    where
        T: RsvpTransport + ?Sized,
    {
        match self.state {
            FormState::Idle | FormState::Error => {}
            other => return Err(SubmitError::InvalidState(other.name())),
        }

        let submission = match self.draft.validate(self.locale, self.policy) {
            Ok(submission) => submission,
            Err(errors) => {
                debug!("RSVP blocked by validation: {}", errors);
                self.errors = errors.clone();
                self.state = FormState::Idle;
                return Err(SubmitError::Validation(errors));
            }
        };

        self.errors = ValidationErrors::default();
        self.state = FormState::Submitting;

        match transport.send(&submission).await {
            Ok(()) => {
                self.draft = RsvpDraft::defaults_for(self.locale);
                self.state = FormState::Success {
                    shown_at: Instant::now(),
                };
                Ok(())
            }
            Err(e) => {
                warn!("RSVP submission failed: {}", e);
                self.state = FormState::Error;
                Err(SubmitError::Transport(e))
            }
        }
    }

    /// Close the success or error notice.
    pub fn dismiss(&mut self) {
        if matches!(self.state, FormState::Success { .. } | FormState::Error) {
            self.state = FormState::Idle;
        }
    }

    /// Return to idle once the success notice has been shown long enough.
    pub fn poll_timeout(&mut self, now: Instant) {
        if let FormState::Success { shown_at } = self.state {
            if now.saturating_duration_since(shown_at) >= SUCCESS_DISPLAY {
                self.state = FormState::Idle;
            }
        }
    }

    // ==================== Messages ====================

    /// Localized notice for the current state, if one is shown.
    pub fn status_message(&self) -> Option<&'static str> {
        let strings = self.locale.strings();
        match self.state {
            FormState::Success { .. } => Some(strings.rsvp_success),
            FormState::Error => Some(strings.rsvp_error),
            FormState::Idle | FormState::Submitting => None,
        }
    }

    /// Localized error shown under `field`, if validation flagged it.
    pub fn field_message(&self, field: Field) -> Option<&'static str> {
        let strings = self.locale.strings();
        self.errors.get(field).map(|error| match error {
            FieldError::Required => match field {
                Field::Phone => strings.rsvp_error_phone,
                Field::Email => strings.rsvp_error_email,
                _ => strings.rsvp_required,
            },
            FieldError::InvalidEmail => strings.rsvp_error_email,
            FieldError::InvalidPhone => strings.rsvp_error_phone,
            FieldError::GuestsOutOfRange => strings.rsvp_error_guests,
        })
    }

    /// Label for the submit button.
    pub fn submit_label(&self) -> &'static str {
        let strings = self.locale.strings();
        match self.state {
            FormState::Submitting => strings.rsvp_btn_submitting,
            _ => strings.rsvp_btn_send,
        }
    }
}
