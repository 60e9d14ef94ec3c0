//! Collections of maintainable artefacts
//!
//! Every collection is a flat list searched linearly. Lookups come in two
//! flavours:
//!
//! - by compound key (`find_by_key`, `find_by_uri`): the first artefact that
//!   identifies itself with the key wins
//! - by bare id (`find_by_id`): among all artefacts with that id, the one
//!   with the highest version wins; on equal versions the earliest stays

use crate::models::identity::Maintainable;
use crate::models::item::{Codelist, ConceptScheme};
use crate::models::reference::{Reference, versions_match};
use crate::models::version::compare_optional_versions;
use crate::models::{DataStructure, Dataflow};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// A flat, unordered list of maintainable artefacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaintainableCollection<T> {
    items: Vec<T>,
}

/// Code lists
pub type CodeLists = MaintainableCollection<Codelist>;

/// Concept schemes
pub type Concepts = MaintainableCollection<ConceptScheme>;

/// Data structure definitions
pub type DataStructures = MaintainableCollection<DataStructure>;

/// Dataflows
pub type DataflowList = MaintainableCollection<Dataflow>;

impl<T> Default for MaintainableCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for MaintainableCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for MaintainableCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a MaintainableCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Maintainable> MaintainableCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Alias of [`MaintainableCollection::len`]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First artefact identified by `{agency, id, version}`
    pub fn find_by_key(&self, agency_id: &str, id: &str, version: Option<&str>) -> Option<&T> {
        self.items
            .iter()
            .find(|item| item.identifies_me(agency_id, id, version))
    }

    /// First artefact identified by a URN or REST URL
    pub fn find_by_uri(&self, uri: &str) -> Option<&T> {
        self.items.iter().find(|item| item.identifies_me_uri(uri))
    }

    /// Highest version of the artefacts with the given id, whatever their agency
    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        self.best_version(|item| item.identifies_me_str(id))
    }

    /// Resolve a reference.
    ///
    /// With agency and id the compound key is used. With only an id the
    /// highest matching version wins. A reference holding only a URN is
    /// decoded first.
    pub fn find_by_reference(&self, reference: &Reference) -> Option<&T> {
        let key = reference.resolve_key()?;
        match (key.agency_id.as_deref(), key.maintainable_id.as_deref()) {
            (Some(agency_id), Some(id)) => self.find_by_key(agency_id, id, key.version.as_deref()),
            (None, Some(id)) => self.best_version(|item| {
                item.identifies_me_str(id) && versions_match(item.version(), key.version.as_deref())
            }),
            _ => None,
        }
    }

    /// All versions of one artefact, in collection order
    pub fn versions_of(&self, agency_id: &str, id: &str) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.identifies_me(agency_id, id, None))
            .collect()
    }

    /// Append every artefact of `other`. Duplicates are kept.
    pub fn merge(&mut self, other: MaintainableCollection<T>) {
        debug!(
            "Merging {} artefacts into collection of {}",
            other.items.len(),
            self.items.len()
        );
        self.items.extend(other.items);
    }

    fn best_version<F>(&self, mut matches: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut best: Option<&T> = None;
        for item in self.items.iter().filter(|item| matches(*item)) {
            match best {
                None => best = Some(item),
                Some(current) => {
                    if compare_optional_versions(item.version(), current.version())
                        == Ordering::Greater
                    {
                        trace!(
                            "Version {:?} of {:?} supersedes {:?}",
                            item.version(),
                            item.id(),
                            current.version()
                        );
                        best = Some(item);
                    }
                }
            }
        }
        best
    }
}
