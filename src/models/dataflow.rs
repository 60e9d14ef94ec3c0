//! Dataflow model

use super::identity::{MaintainableArtefact, impl_maintainable};
use super::reference::{Reference, StructureClass};
use serde::{Deserialize, Serialize};

/// A dataflow: a named flow of data conforming to a data structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataflow {
    #[serde(flatten)]
    pub maintainable: MaintainableArtefact,
    /// The data structure the flow's data conforms to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<Reference>,
}

impl_maintainable!(Dataflow);

impl Dataflow {
    pub fn new(maintainable: MaintainableArtefact, structure: Option<Reference>) -> Self {
        Self {
            maintainable,
            structure: structure.map(|r| r.with_class(StructureClass::DataStructure)),
        }
    }
}
