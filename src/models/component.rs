//! Data structure components
//!
//! A component takes its id from its own `id` when present, otherwise from
//! the concept it references. A component with neither resolves to
//! [`ComponentId::Missing`], rendered as `"MISS"`. Several such components
//! collapse onto the same identity; the structure validator reports them.

use super::identity::{Identifiable, IdentifiableArtefact, Nameable, NameableArtefact};
use super::item::Representation;
use super::reference::Reference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved id of the primary measure
pub const OBS_VALUE: &str = "OBS_VALUE";

/// Rendering of [`ComponentId::Missing`]
pub const MISSING_COMPONENT_ID: &str = "MISS";

/// Resolved identity of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId<'a> {
    /// The component's own id
    Explicit(&'a str),
    /// Borrowed from the referenced concept
    Concept(&'a str),
    /// Neither an id nor a concept reference
    Missing,
}

impl<'a> ComponentId<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            ComponentId::Explicit(id) | ComponentId::Concept(id) => id,
            ComponentId::Missing => MISSING_COMPONENT_ID,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ComponentId::Missing)
    }
}

impl fmt::Display for ComponentId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a component within a data structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Dimension,
    TimeDimension,
    MeasureDimension,
    Attribute,
    PrimaryMeasure,
}

/// Fields common to every component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(flatten)]
    pub nameable: NameableArtefact,
    /// Concept (as an item reference into a concept scheme) the component measures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept_identity: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_representation: Option<Representation>,
}

impl Component {
    /// Component with an explicit id
    pub fn new(id: &str) -> Self {
        Self {
            nameable: NameableArtefact::new(id),
            ..Self::default()
        }
    }

    /// Component without an id, identified by its concept
    pub fn from_concept(concept: Reference) -> Self {
        Self {
            concept_identity: Some(concept),
            ..Self::default()
        }
    }

    pub fn with_concept(mut self, concept: Reference) -> Self {
        self.concept_identity = Some(concept);
        self
    }

    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.local_representation = Some(representation);
        self
    }

    /// Explicit id, then concept id, then [`ComponentId::Missing`]
    pub fn component_id(&self) -> ComponentId<'_> {
        if let Some(id) = self.nameable.identity.id.as_deref() {
            return ComponentId::Explicit(id);
        }
        match self
            .concept_identity
            .as_ref()
            .and_then(|concept| concept.item_id.as_deref())
        {
            Some(id) => ComponentId::Concept(id),
            None => ComponentId::Missing,
        }
    }

    /// Code list enumerating this component's values, if locally declared
    pub fn enumeration(&self) -> Option<&Reference> {
        self.local_representation
            .as_ref()
            .and_then(|r| r.enumeration.as_ref())
    }
}

impl Identifiable for Component {
    fn identifiable(&self) -> &IdentifiableArtefact {
        &self.nameable.identity
    }

    fn identifies_me_str(&self, id: &str) -> bool {
        self.component_id().as_str() == id
    }
}

impl Nameable for Component {
    fn nameable(&self) -> &NameableArtefact {
        &self.nameable
    }
}

/// Access to the shared component fields of each refinement
pub trait StructureComponent {
    fn component(&self) -> &Component;

    fn kind(&self) -> ComponentKind;

    fn component_id(&self) -> ComponentId<'_> {
        self.component().component_id()
    }
}

/// A key dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(flatten)]
    pub component: Component,
    /// Declared position in the key, when the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// The time dimension, placed after all other dimensions in the key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDimension {
    #[serde(flatten)]
    pub component: Component,
}

/// A dimension whose values identify measures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureDimension {
    #[serde(flatten)]
    pub component: Component,
}

/// Whether an attribute value must be reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Mandatory,
    #[default]
    Conditional,
}

/// What an attribute value is attached to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "ids")]
pub enum AttributeRelationship {
    #[default]
    None,
    DataSet,
    Dimensions(Vec<String>),
    Group(String),
    PrimaryMeasure,
}

/// An attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub component: Component,
    #[serde(default)]
    pub assignment_status: AssignmentStatus,
    #[serde(default)]
    pub relationship: AttributeRelationship,
}

/// The observed value
///
/// Besides its own id, the primary measure always answers to [`OBS_VALUE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryMeasure {
    #[serde(flatten)]
    pub component: Component,
}

macro_rules! impl_structure_component {
    ($ty:ident, $kind:expr) => {
        impl $ty {
            pub fn new(id: &str) -> Self {
                Self::from_component(Component::new(id))
            }

            pub fn from_component(component: Component) -> Self {
                let mut built = Self::default();
                built.component = component;
                built
            }
        }

        impl StructureComponent for $ty {
            fn component(&self) -> &Component {
                &self.component
            }

            fn kind(&self) -> ComponentKind {
                $kind
            }
        }
    };
}

impl_structure_component!(Dimension, ComponentKind::Dimension);
impl_structure_component!(TimeDimension, ComponentKind::TimeDimension);
impl_structure_component!(MeasureDimension, ComponentKind::MeasureDimension);
impl_structure_component!(Attribute, ComponentKind::Attribute);
impl_structure_component!(PrimaryMeasure, ComponentKind::PrimaryMeasure);

impl Attribute {
    pub fn mandatory(mut self) -> Self {
        self.assignment_status = AssignmentStatus::Mandatory;
        self
    }

    pub fn attached_to(mut self, relationship: AttributeRelationship) -> Self {
        self.relationship = relationship;
        self
    }
}

impl PrimaryMeasure {
    /// True for the measure's own id and for [`OBS_VALUE`]
    pub fn answers_to(&self, id: &str) -> bool {
        self.component.identifies_me_str(id) || id == OBS_VALUE
    }
}

/// A component found in a data structure, tagged with its role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentRef<'a> {
    Dimension(&'a Dimension),
    TimeDimension(&'a TimeDimension),
    MeasureDimension(&'a MeasureDimension),
    Attribute(&'a Attribute),
    PrimaryMeasure(&'a PrimaryMeasure),
}

impl<'a> ComponentRef<'a> {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentRef::Dimension(_) => ComponentKind::Dimension,
            ComponentRef::TimeDimension(_) => ComponentKind::TimeDimension,
            ComponentRef::MeasureDimension(_) => ComponentKind::MeasureDimension,
            ComponentRef::Attribute(_) => ComponentKind::Attribute,
            ComponentRef::PrimaryMeasure(_) => ComponentKind::PrimaryMeasure,
        }
    }

    pub fn component(&self) -> &'a Component {
        match *self {
            ComponentRef::Dimension(c) => &c.component,
            ComponentRef::TimeDimension(c) => &c.component,
            ComponentRef::MeasureDimension(c) => &c.component,
            ComponentRef::Attribute(c) => &c.component,
            ComponentRef::PrimaryMeasure(c) => &c.component,
        }
    }

    pub fn component_id(&self) -> ComponentId<'a> {
        self.component().component_id()
    }
}
