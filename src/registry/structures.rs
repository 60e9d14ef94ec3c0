//! The composite structure registry
//!
//! [`Structures`] holds at most one collection of each artefact kind and
//! resolves references across them. A lookup against an absent collection is
//! a miss, never an error.

use super::collection::{CodeLists, Concepts, DataStructures, DataflowList, MaintainableCollection};
use crate::models::identity::Maintainable;
use crate::models::item::{Code, Codelist, Concept, ConceptScheme};
use crate::models::reference::Reference;
use crate::models::{DataStructure, Dataflow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle callbacks of a registry backend.
///
/// The in-memory registry has nothing to do on any of them.
pub trait RegistryHooks {
    fn clear(&mut self) {}

    fn load(&mut self) {}

    fn unload(&mut self) {}

    fn save(&self) {}
}

/// Code lists, concept schemes, data structures and dataflows known together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structures {
    #[serde(skip_serializing_if = "Option::is_none")]
    codelists: Option<CodeLists>,
    #[serde(skip_serializing_if = "Option::is_none")]
    concepts: Option<Concepts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_structures: Option<DataStructures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dataflows: Option<DataflowList>,
}

impl RegistryHooks for Structures {}

impl Structures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn codelists(&self) -> Option<&CodeLists> {
        self.codelists.as_ref()
    }

    pub fn set_codelists(&mut self, codelists: CodeLists) {
        self.codelists = Some(codelists);
    }

    pub fn concepts(&self) -> Option<&Concepts> {
        self.concepts.as_ref()
    }

    pub fn set_concepts(&mut self, concepts: Concepts) {
        self.concepts = Some(concepts);
    }

    pub fn data_structures(&self) -> Option<&DataStructures> {
        self.data_structures.as_ref()
    }

    pub fn set_data_structures(&mut self, data_structures: DataStructures) {
        self.data_structures = Some(data_structures);
    }

    pub fn dataflows(&self) -> Option<&DataflowList> {
        self.dataflows.as_ref()
    }

    pub fn set_dataflows(&mut self, dataflows: DataflowList) {
        self.dataflows = Some(dataflows);
    }

    pub fn with_codelists(mut self, codelists: CodeLists) -> Self {
        self.set_codelists(codelists);
        self
    }

    pub fn with_concepts(mut self, concepts: Concepts) -> Self {
        self.set_concepts(concepts);
        self
    }

    pub fn with_data_structures(mut self, data_structures: DataStructures) -> Self {
        self.set_data_structures(data_structures);
        self
    }

    pub fn with_dataflows(mut self, dataflows: DataflowList) -> Self {
        self.set_dataflows(dataflows);
        self
    }

    pub fn find_data_structure(&self, reference: &Reference) -> Option<&DataStructure> {
        self.data_structures.as_ref()?.find_by_reference(reference)
    }

    pub fn find_dataflow(&self, reference: &Reference) -> Option<&Dataflow> {
        self.dataflows.as_ref()?.find_by_reference(reference)
    }

    pub fn find_codelist(&self, reference: &Reference) -> Option<&Codelist> {
        self.codelists.as_ref()?.find_by_reference(reference)
    }

    pub fn find_concept_scheme(&self, reference: &Reference) -> Option<&ConceptScheme> {
        self.concepts.as_ref()?.find_by_reference(reference)
    }

    /// Code named by an item reference into a code list
    pub fn find_code(&self, reference: &Reference) -> Option<&Code> {
        let key = reference.resolve_key()?;
        self.find_codelist(&key)?.find_item_by_reference(&key)
    }

    /// Concept named by an item reference into a concept scheme
    pub fn find_concept(&self, reference: &Reference) -> Option<&Concept> {
        let key = reference.resolve_key()?;
        self.find_concept_scheme(&key)?.find_item_by_reference(&key)
    }

    pub fn find_data_structure_by_uri(&self, uri: &str) -> Option<&DataStructure> {
        self.data_structures.as_ref()?.find_by_uri(uri)
    }

    pub fn find_dataflow_by_uri(&self, uri: &str) -> Option<&Dataflow> {
        self.dataflows.as_ref()?.find_by_uri(uri)
    }

    pub fn find_codelist_by_uri(&self, uri: &str) -> Option<&Codelist> {
        self.codelists.as_ref()?.find_by_uri(uri)
    }

    pub fn find_concept_scheme_by_uri(&self, uri: &str) -> Option<&ConceptScheme> {
        self.concepts.as_ref()?.find_by_uri(uri)
    }

    /// The data structure a dataflow conforms to
    pub fn structure_of(&self, dataflow: &Dataflow) -> Option<&DataStructure> {
        self.find_data_structure(dataflow.structure.as_ref()?)
    }

    /// Code list enumerating a component's values.
    ///
    /// A locally declared enumeration takes precedence over the core
    /// representation of the component's concept, even when it does not
    /// resolve.
    pub fn codelist_for_component(
        &self,
        structure: &DataStructure,
        component_id: &str,
    ) -> Option<&Codelist> {
        let component = structure.find_component(component_id)?.component();
        if let Some(enumeration) = component.enumeration() {
            return self.find_codelist(enumeration);
        }
        let concept = self.find_concept(component.concept_identity.as_ref()?)?;
        let enumeration = concept.core_representation.as_ref()?.enumeration.as_ref()?;
        self.find_codelist(enumeration)
    }

    /// Append every artefact of `other`, collection by collection.
    ///
    /// Duplicates are kept; a collection absent here is taken over whole.
    pub fn merge(&mut self, other: Structures) {
        debug!(
            "Merging structures: {} code lists, {} concept schemes, {} data structures, {} dataflows",
            count(&other.codelists),
            count(&other.concepts),
            count(&other.data_structures),
            count(&other.dataflows)
        );
        merge_collection(&mut self.codelists, other.codelists);
        merge_collection(&mut self.concepts, other.concepts);
        merge_collection(&mut self.data_structures, other.data_structures);
        merge_collection(&mut self.dataflows, other.dataflows);
    }

    /// True when no collection holds any artefact
    pub fn is_empty(&self) -> bool {
        count(&self.codelists) == 0
            && count(&self.concepts) == 0
            && count(&self.data_structures) == 0
            && count(&self.dataflows) == 0
    }
}

fn count<T: Maintainable>(collection: &Option<MaintainableCollection<T>>) -> usize {
    collection.as_ref().map_or(0, |c| c.len())
}

fn merge_collection<T: Maintainable>(
    target: &mut Option<MaintainableCollection<T>>,
    incoming: Option<MaintainableCollection<T>>,
) {
    let Some(incoming) = incoming else {
        return;
    };
    match target {
        Some(existing) => existing.merge(incoming),
        None => *target = Some(incoming),
    }
}
