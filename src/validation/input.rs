//! Identifier validation and display sanitisation.
//!
//! These checks follow the SDMX identifier grammar and are used by the
//! structural validator and by loaders that want to reject malformed keys
//! before registering artefacts.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum length for identifiers in general
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

/// SDMX IDType: letters, digits, underscore, at, dollar and hyphen
static ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_@$\-]+$").unwrap());

/// Agency ids are dot-separated NCName segments (e.g. "ECB", "SDMX.EXT")
static AGENCY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_\-]*(\.[A-Za-z][A-Za-z0-9_\-]*)*$").unwrap()
});

/// Legacy dotted numeric versions ("1", "1.0", "2.1.3")
static LEGACY_VERSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)*$").unwrap());

/// Semantic versions with an optional extension ("1.0.0-draft")
static SEMANTIC_VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+(-[0-9A-Za-z\-]+(\.[0-9A-Za-z\-]+)*)?$").unwrap()
});

/// Errors that can occur during input validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} contains invalid characters: {value}")]
    InvalidCharacters { field: &'static str, value: String },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_length(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_IDENTIFIER_LENGTH,
            actual: value.len(),
        });
    }
    Ok(())
}

/// Validate an artefact or item id.
///
/// # Examples
///
/// ```
/// use sdmx_registry::validation::input::validate_id;
///
/// assert!(validate_id("CL_FREQ").is_ok());
/// assert!(validate_id("A-1@x").is_ok());
/// assert!(validate_id("").is_err());
/// assert!(validate_id("CL FREQ").is_err());
/// ```
pub fn validate_id(id: &str) -> ValidationResult<()> {
    check_length("id", id)?;
    if !ID_REGEX.is_match(id) {
        return Err(ValidationError::InvalidCharacters {
            field: "id",
            value: id.to_string(),
        });
    }
    Ok(())
}

/// Validate a maintenance agency id.
///
/// # Examples
///
/// ```
/// use sdmx_registry::validation::input::validate_agency_id;
///
/// assert!(validate_agency_id("ECB").is_ok());
/// assert!(validate_agency_id("SDMX.EXT").is_ok());
/// assert!(validate_agency_id("1ECB").is_err());
/// ```
pub fn validate_agency_id(agency_id: &str) -> ValidationResult<()> {
    check_length("agency id", agency_id)?;
    if !AGENCY_REGEX.is_match(agency_id) {
        return Err(ValidationError::InvalidFormat(
            "agency id",
            format!(
                "'{}' must be dot-separated segments starting with a letter",
                agency_id
            ),
        ));
    }
    Ok(())
}

/// Validate a version string (legacy dotted numeric or semantic).
///
/// # Examples
///
/// ```
/// use sdmx_registry::validation::input::validate_version;
///
/// assert!(validate_version("1.0").is_ok());
/// assert!(validate_version("2.1.0-draft").is_ok());
/// assert!(validate_version("v1").is_err());
/// ```
pub fn validate_version(version: &str) -> ValidationResult<()> {
    check_length("version", version)?;
    if !LEGACY_VERSION_REGEX.is_match(version) && !SEMANTIC_VERSION_REGEX.is_match(version) {
        return Err(ValidationError::InvalidFormat(
            "version",
            format!("'{}' is neither a dotted numeric nor a semantic version", version),
        ));
    }
    Ok(())
}

/// Sanitize a string for display.
///
/// Control characters other than whitespace are removed and quotes are
/// escaped as XML entities.
pub fn sanitize_display_text(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\'' => sanitized.push_str("&apos;"),
            '"' => sanitized.push_str("&quot;"),
            c if c.is_control() && c != '\n' && c != '\t' && c != '\r' => {}
            c => sanitized.push(c),
        }
    }
    sanitized
}
