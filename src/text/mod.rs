//! Localised text and display-string resolution
//!
//! Names and descriptions are ordered lists of [`LocalisedText`]. Lookup by
//! locale is a pure scan of such a list:
//!
//! 1. the entry whose language tag equals the requested locale
//! 2. otherwise the last entry without a language tag
//! 3. otherwise, when the locale is not `"en"`, the same lookup for `"en"`

pub mod config;

pub use config::{DisplayOptions, DisplayOptionsBuilder, FALLBACK_LOCALE};

use crate::validation::input::sanitize_display_text;
use serde::{Deserialize, Serialize};

/// Rendered for artefacts that have neither text nor an id
pub const UNNAMED_ARTEFACT: &str = "NameableType";

/// A piece of text with an optional language tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalisedText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub text: String,
}

impl LocalisedText {
    /// Text tagged with a language
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            lang: Some(lang.into()),
            text: text.into(),
        }
    }

    /// Text without a language tag
    pub fn untagged(text: impl Into<String>) -> Self {
        Self {
            lang: None,
            text: text.into(),
        }
    }
}

/// Find the entry for `locale` using the fallback chain described above
pub fn find_localised<'a>(texts: &'a [LocalisedText], locale: &str) -> Option<&'a LocalisedText> {
    let found = scan_locale(texts, locale);
    if found.is_none() && locale != FALLBACK_LOCALE {
        return scan_locale(texts, FALLBACK_LOCALE);
    }
    found
}

fn scan_locale<'a>(texts: &'a [LocalisedText], locale: &str) -> Option<&'a LocalisedText> {
    let mut untagged = None;
    for entry in texts {
        match entry.lang.as_deref() {
            Some(lang) if lang == locale => return Some(entry),
            None => untagged = Some(entry),
            Some(_) => {}
        }
    }
    untagged
}

/// Resolve the display string for a nameable artefact
///
/// Order: localised name, localised description, first name in any language,
/// first description in any language, the raw id, then [`UNNAMED_ARTEFACT`].
pub fn display_text(
    names: &[LocalisedText],
    descriptions: &[LocalisedText],
    id: Option<&str>,
    options: &DisplayOptions,
) -> String {
    let resolved = find_localised(names, &options.locale)
        .or_else(|| find_localised(descriptions, &options.locale))
        .or_else(|| names.first())
        .or_else(|| descriptions.first())
        .map(|entry| entry.text.as_str())
        .or(id)
        .unwrap_or(UNNAMED_ARTEFACT);

    format_for_display(resolved, options)
}

/// Apply truncation and sanitising to an already resolved string
///
/// `max_length` counts characters of the resolved text. Escaping runs on the
/// truncated text, so an entity is never cut in half.
pub fn format_for_display(text: &str, options: &DisplayOptions) -> String {
    let truncated: String = match options.max_length {
        Some(max) => text.chars().take(max).collect(),
        None => text.to_string(),
    };

    if options.sanitize {
        sanitize_display_text(&truncated)
    } else {
        truncated
    }
}
