//! Guest RSVP: the client-side form, its HTTP transport and the row layout
//! the server appends to the spreadsheet.

pub mod client;
pub mod form;
pub mod row;
pub mod submission;

pub use client::{HttpRsvpClient, RsvpTransport, TransportError};
pub use form::{ContactChannel, ContactPolicy, Field, FieldError, FormState, RsvpDraft, RsvpForm, SubmitError, ValidationErrors};
pub use submission::{Attendance, RsvpSubmission, MAX_GUESTS};
