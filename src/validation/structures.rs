//! Structural validation of a loaded registry
//!
//! The model accepts anything a loader hands it: components without ids,
//! dimensions and attributes sharing an id, parents that do not exist, cyclic
//! hierarchies and references into nothing. Lookups cope with all of these
//! (first match wins, walks are bounded), so this pass is where such input is
//! surfaced. It never fails; it reports.

use crate::models::component::{ComponentKind, ComponentRef};
use crate::models::data_structure::DataStructure;
use crate::models::identity::{Identifiable, Maintainable};
use crate::models::item::{ItemScheme, SchemeItem};
use crate::registry::Structures;
use crate::validation::input::{ValidationError, validate_agency_id, validate_id, validate_version};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{info, warn};

/// A problem found in a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureIssue {
    /// Agency, id or version of a maintainable artefact breaks the identifier grammar
    InvalidIdentifier {
        artefact: String,
        error: ValidationError,
    },
    /// Two components of one data structure resolve to the same id
    DuplicateComponentId { structure: String, component: String },
    /// A component has neither an id nor a concept to take one from
    MissingComponentId { structure: String, kind: ComponentKind },
    /// An item names a parent that is not in its scheme
    UnresolvedParent {
        scheme: String,
        item: String,
        parent: String,
    },
    /// Items whose parent chain loops back on itself
    HierarchyCycle { scheme: String, items: Vec<String> },
    /// A dataflow whose data structure is not registered
    UnresolvedDataStructure { dataflow: String, structure: String },
    /// A component enumerated by a code list that is not registered
    UnresolvedEnumeration {
        structure: String,
        component: String,
        codelist: String,
    },
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureIssue::InvalidIdentifier { artefact, error } => {
                write!(f, "Artefact {} has an invalid key: {}", artefact, error)
            }
            StructureIssue::DuplicateComponentId { structure, component } => write!(
                f,
                "Data structure {} declares component '{}' more than once",
                structure, component
            ),
            StructureIssue::MissingComponentId { structure, kind } => write!(
                f,
                "Data structure {} has a {:?} without id or concept",
                structure, kind
            ),
            StructureIssue::UnresolvedParent {
                scheme,
                item,
                parent,
            } => write!(
                f,
                "Item '{}' of {} names unknown parent '{}'",
                item, scheme, parent
            ),
            StructureIssue::HierarchyCycle { scheme, items } => write!(
                f,
                "Items of {} form a parent cycle: {}",
                scheme,
                items.join(", ")
            ),
            StructureIssue::UnresolvedDataStructure {
                dataflow,
                structure,
            } => write!(
                f,
                "Dataflow {} references unknown data structure {}",
                dataflow, structure
            ),
            StructureIssue::UnresolvedEnumeration {
                structure,
                component,
                codelist,
            } => write!(
                f,
                "Component '{}' of {} is enumerated by unknown code list {}",
                component, structure, codelist
            ),
        }
    }
}

/// Result of structural validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureValidationResult {
    pub issues: Vec<StructureIssue>,
}

impl StructureValidationResult {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    fn report(&mut self, issue: StructureIssue) {
        warn!("{}", issue);
        self.issues.push(issue);
    }
}

/// Structure validator
#[derive(Debug, Default)]
pub struct StructureValidator;

impl StructureValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check every artefact in the registry
    pub fn validate(&self, structures: &Structures) -> StructureValidationResult {
        let mut result = StructureValidationResult::default();

        for codelist in structures.codelists().into_iter().flatten() {
            self.check_identity(codelist, &mut result);
            self.check_hierarchy(codelist, &mut result);
        }
        for scheme in structures.concepts().into_iter().flatten() {
            self.check_identity(scheme, &mut result);
            self.check_hierarchy(scheme, &mut result);
        }
        for dsd in structures.data_structures().into_iter().flatten() {
            self.check_identity(dsd, &mut result);
            self.check_components(dsd, &mut result);
            self.check_enumerations(structures, dsd, &mut result);
        }
        for dataflow in structures.dataflows().into_iter().flatten() {
            self.check_identity(dataflow, &mut result);
            let Some(reference) = dataflow.structure.as_ref() else {
                continue;
            };
            if structures.find_data_structure(reference).is_none() {
                result.report(StructureIssue::UnresolvedDataStructure {
                    dataflow: dataflow.as_reference().to_string(),
                    structure: reference.to_string(),
                });
            }
        }

        info!(
            "Validated structures: {} issue(s) found",
            result.issues.len()
        );
        result
    }

    /// Agency, id and version grammar; a missing agency or id is reported as empty
    fn check_identity<T: Maintainable>(&self, artefact: &T, result: &mut StructureValidationResult) {
        let checks = [
            validate_agency_id(artefact.agency_id().unwrap_or_default()),
            validate_id(artefact.id().unwrap_or_default()),
            artefact.version().map_or(Ok(()), validate_version),
        ];
        for error in checks.into_iter().filter_map(Result::err) {
            result.report(StructureIssue::InvalidIdentifier {
                artefact: artefact.as_reference().to_string(),
                error,
            });
        }
    }

    /// Id collisions and components without identity.
    ///
    /// The primary measure is exempt from the identity check since it always
    /// answers to `OBS_VALUE`.
    fn check_components(&self, dsd: &DataStructure, result: &mut StructureValidationResult) {
        let structure = dsd.as_reference().to_string();
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        for found in dsd.components.iter_components() {
            let id = found.component_id();
            if id.is_missing() {
                if !matches!(found, ComponentRef::PrimaryMeasure(_)) {
                    result.report(StructureIssue::MissingComponentId {
                        structure: structure.clone(),
                        kind: found.kind(),
                    });
                }
                continue;
            }
            if !seen.insert(id.as_str()) && reported.insert(id.as_str()) {
                result.report(StructureIssue::DuplicateComponentId {
                    structure: structure.clone(),
                    component: id.as_str().to_string(),
                });
            }
        }
    }

    fn check_enumerations(
        &self,
        structures: &Structures,
        dsd: &DataStructure,
        result: &mut StructureValidationResult,
    ) {
        for found in dsd.components.iter_components() {
            let Some(enumeration) = found.component().enumeration() else {
                continue;
            };
            if structures.find_codelist(enumeration).is_none() {
                result.report(StructureIssue::UnresolvedEnumeration {
                    structure: dsd.as_reference().to_string(),
                    component: found.component_id().to_string(),
                    codelist: enumeration.to_string(),
                });
            }
        }
    }

    /// Dangling parents, then cycles among the resolvable parent links
    fn check_hierarchy<T: SchemeItem>(
        &self,
        scheme: &ItemScheme<T>,
        result: &mut StructureValidationResult,
    ) {
        let scheme_ref = scheme.as_reference().to_string();
        let index = scheme.item_index();

        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
        for item in scheme.items() {
            let (Some(id), Some(parent)) = (item.id(), item.parent_id()) else {
                continue;
            };
            if !index.contains_key(parent) {
                result.report(StructureIssue::UnresolvedParent {
                    scheme: scheme_ref.clone(),
                    item: id.to_string(),
                    parent: parent.to_string(),
                });
                continue;
            }
            let child_node = *nodes.entry(id).or_insert_with(|| graph.add_node(id));
            let parent_node = *nodes.entry(parent).or_insert_with(|| graph.add_node(parent));
            graph.update_edge(child_node, parent_node, ());
        }

        for component in tarjan_scc(&graph) {
            let is_cycle = match component.as_slice() {
                [single] => graph.contains_edge(*single, *single),
                _ => true,
            };
            if !is_cycle {
                continue;
            }
            let mut items: Vec<String> = component.iter().map(|n| graph[*n].to_string()).collect();
            items.sort();
            result.report(StructureIssue::HierarchyCycle {
                scheme: scheme_ref.clone(),
                items,
            });
        }
    }
}
