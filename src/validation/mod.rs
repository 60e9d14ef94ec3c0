//! Validation functionality
//!
//! Provides validation logic for:
//! - SDMX identifier, agency and version grammar, and display-text sanitising
//! - Structural consistency of a loaded registry (component ids, hierarchies, references)

pub mod input;
pub mod structures;

pub use input::{ValidationError, sanitize_display_text, validate_agency_id, validate_id, validate_version};
pub use structures::{StructureIssue, StructureValidationResult, StructureValidator};
