//! Internationalization (i18n) module for the Korean and Japanese site.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported locales and their metadata
//! - `locale`: The closed `Locale` enum used throughout request handling
//! - `strings`: Localized strings for pages and the RSVP form
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::Locale;
//!
//! let fallback = Locale::fallback();
//! let japanese = Locale::from_code("ja")?;
//! println!("{}", japanese.strings().rsvp_title);
//! ```

mod locale;
mod registry;
mod strings;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::LocaleStrings;

/// Name of the cookie storing the visitor's locale preference.
pub const PREFERENCE_COOKIE: &str = "i18next";

/// Lifetime of the locale preference cookie (one year).
pub const PREFERENCE_MAX_AGE_SECS: u64 = 31_536_000;
