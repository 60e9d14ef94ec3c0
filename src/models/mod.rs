//! Structural metadata models
//!
//! Defines the artefacts held by the registry: code lists and concept
//! schemes (item schemes), data structures with their components, and
//! dataflows, together with the identity traits and reference type used to
//! look them up.

pub mod component;
pub mod data_structure;
pub mod dataflow;
pub mod identity;
pub mod item;
pub mod reference;
pub mod time_period;
pub mod version;

pub use component::{
    AssignmentStatus, Attribute, AttributeRelationship, Component, ComponentId, ComponentKind,
    ComponentRef, Dimension, MISSING_COMPONENT_ID, MeasureDimension, OBS_VALUE, PrimaryMeasure,
    StructureComponent, TimeDimension,
};
pub use data_structure::{
    AttributeList, DataStructure, DataStructureBuilder, DataStructureComponents, DimensionList,
    MeasureList,
};
pub use dataflow::Dataflow;
pub use identity::{
    Annotation, Identifiable, IdentifiableArtefact, Maintainable, MaintainableArtefact, Nameable,
    NameableArtefact, Versionable,
};
pub use item::{
    Code, Codelist, Concept, ConceptScheme, ItemScheme, MAX_HIERARCHY_DEPTH, Representation,
    SchemeItem, TextFormat,
};
pub use reference::{Reference, StructureClass, versions_match};
pub use time_period::{PeriodKind, TimePeriod};
pub use version::{compare_optional_versions, compare_versions};
