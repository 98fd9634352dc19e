//! Locale registry: Single source of truth for all supported locales.
//!
//! The set of locales is closed and known at build time, so the registry is a
//! plain `static` rather than a lazily-initialized singleton.

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Path segment and cookie value (e.g., "ko", "ja")
    pub code: &'static str,

    /// English name of the locale (e.g., "Korean")
    pub name: &'static str,

    /// Native name of the locale (e.g., "한국어", "日本語")
    pub native_name: &'static str,

    /// Short label shown on the language switcher (e.g., "KR", "JP")
    pub switcher_label: &'static str,

    /// Phone country code pre-selected on the RSVP form
    pub default_country_code: &'static str,

    /// Whether this is the fallback locale (exactly one must be true)
    pub is_fallback: bool,
}

/// Registry of every locale the site serves.
///
/// This registry contains all supported locales and provides methods to query
/// them. It is immutable and shared by the router, the pages and the RSVP form.
pub struct LocaleRegistry {
    locales: &'static [LocaleConfig],
}

static REGISTRY: LocaleRegistry = LocaleRegistry {
    locales: &[
        LocaleConfig {
            code: "ko",
            name: "Korean",
            native_name: "한국어",
            switcher_label: "KR",
            default_country_code: "+82",
            is_fallback: true,
        },
        LocaleConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            switcher_label: "JP",
            default_country_code: "+81",
            is_fallback: false,
        },
    ],
};

impl LocaleRegistry {
    /// Get the global locale registry.
    ///
    /// The table is a `static`, so this never allocates or initializes
    /// anything; every call returns the same instance.
    pub fn get() -> &'static LocaleRegistry {
        &REGISTRY
    }

    /// Get a locale configuration by its code.
    ///
    /// # Arguments
    /// * `code` - The locale code (e.g., "ko", "ja"). The match is exact:
    ///   `"KO"` or `"kor"` are not supported codes.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the locale is not found
    pub fn get_by_code(&self, code: &str) -> Option<&'static LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get all supported locales.
    ///
    /// # Returns
    /// A slice of every locale configuration, in language switcher order.
    pub fn list_all(&self) -> &'static [LocaleConfig] {
        self.locales
    }

    /// Get the fallback locale configuration.
    ///
    /// The fallback locale is used for the site root when no preference
    /// cookie is set, and as the prefix for unlocalized paths.
    ///
    /// # Returns
    /// A reference to the fallback locale configuration.
    ///
    /// # Panics
    /// Panics if the static table does not contain exactly one fallback
    /// locale (a build-time configuration error covered by tests).
    pub fn fallback(&self) -> &'static LocaleConfig {
        let mut fallbacks = self.locales.iter().filter(|locale| locale.is_fallback);
        match (fallbacks.next(), fallbacks.next()) {
            (Some(config), None) => config,
            (None, _) => panic!("No fallback locale found in registry"),
            (Some(_), Some(_)) => panic!("Multiple fallback locales found in registry"),
        }
    }

    /// Check if a code names a supported locale.
    ///
    /// # Arguments
    /// * `code` - The locale code to check, typically a cookie value
    ///
    /// # Returns
    /// `true` if the locale exists, `false` otherwise.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}
