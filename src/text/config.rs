//! Configuration for display-string rendering

use serde::{Deserialize, Serialize};

/// Locale used when a requested locale has no matching text
pub const FALLBACK_LOCALE: &str = "en";

/// Options controlling how display strings are produced
///
/// These are presentation switches only. Stored names and descriptions are
/// never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    /// Requested language tag (e.g. "en", "fr")
    pub locale: String,

    /// Escape quotes into XML entities and strip control characters
    pub sanitize: bool,

    /// Maximum number of characters in the rendered string (None = unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            locale: FALLBACK_LOCALE.to_string(),
            sanitize: false,
            max_length: None,
        }
    }
}

impl DisplayOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options for a locale, keeping the other defaults
    pub fn for_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }

    /// Create a builder for custom options
    pub fn builder() -> DisplayOptionsBuilder {
        DisplayOptionsBuilder::default()
    }
}

/// Builder for DisplayOptions
#[derive(Debug, Default)]
pub struct DisplayOptionsBuilder {
    options: DisplayOptions,
}

impl DisplayOptionsBuilder {
    /// Set the requested locale
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.options.locale = locale.into();
        self
    }

    /// Enable or disable sanitising
    pub fn sanitize(mut self, sanitize: bool) -> Self {
        self.options.sanitize = sanitize;
        self
    }

    /// Truncate rendered strings to at most `max` characters
    pub fn max_length(mut self, max: usize) -> Self {
        self.options.max_length = Some(max);
        self
    }

    /// Build the options
    pub fn build(self) -> DisplayOptions {
        self.options
    }
}
