//! Error types for registry operations
//!
//! Lookup misses are never errors: every `find_*` operation returns an
//! `Option`. The variants here cover the cases where a caller asked for
//! something that cannot be answered correctly.

use thiserror::Error;

/// Errors raised by the structural model and its value types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The component is neither a dimension nor the time dimension of the structure
    #[error("component '{component}' is not part of the key of data structure '{structure}'")]
    KeyPosition { structure: String, component: String },

    /// A URN or URI could not be decoded into a reference
    #[error("malformed structure URI: {0}")]
    MalformedUri(String),

    /// A reporting year outside the supported range
    #[error("year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    /// A time period string or sub-period that cannot be represented
    #[error("invalid time period: {0}")]
    InvalidTimePeriod(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
