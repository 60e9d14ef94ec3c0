//! SDMX Registry - in-memory catalog of SDMX structural metadata
//!
//! Provides:
//! - The identity and versioning capability traits shared by all artefacts
//! - Code lists and concept schemes with parent/child hierarchies
//! - Data structures with dimension, attribute and measure lookup
//! - Dataflows and the [`Structures`] registry resolving references between them
//! - Snapshot publication of a registry to concurrent readers
//! - Input and structural validation

pub mod error;
pub mod models;
pub mod registry;
pub mod text;
pub mod validation;

pub use error::{RegistryError, Result};

// Re-export models
pub use models::{
    Code, Codelist, Component, ComponentId, ComponentKind, ComponentRef, Concept, ConceptScheme,
    DataStructure, DataStructureBuilder, Dataflow, Dimension, Identifiable, ItemScheme,
    Maintainable, MaintainableArtefact, Nameable, PeriodKind, Reference, StructureClass, TimePeriod,
    Versionable,
};

// Re-export registry types
pub use registry::{
    CodeLists, Concepts, DataStructures, DataflowList, MaintainableCollection, RegistryHooks,
    SharedStructures, Structures,
};

pub use text::{DisplayOptions, LocalisedText};
pub use validation::{StructureIssue, StructureValidationResult, StructureValidator, ValidationError};
