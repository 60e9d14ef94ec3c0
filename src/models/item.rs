//! Items and item schemes
//!
//! An [`ItemScheme`] owns its items in insertion order. Hierarchy is expressed
//! by each item naming its parent's id; parents are resolved through the
//! scheme, never through pointers between items. Parent ids are not checked
//! on insert, so a dangling parent simply ends an upward walk.

use super::identity::{
    Identifiable, IdentifiableArtefact, MaintainableArtefact, Nameable, NameableArtefact,
    impl_maintainable,
};
use super::reference::Reference;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Upper bound on parent hops when computing levels
///
/// Malformed or cyclic parent chains report this level instead of looping.
pub const MAX_HIERARCHY_DEPTH: usize = 30;

/// An item that may name a parent within its scheme
pub trait SchemeItem: Nameable {
    fn parent_id(&self) -> Option<&str>;
}

/// Text format constraints of a non-enumerated representation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// How values of a concept or component are represented
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representation {
    /// Code list the values are drawn from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_format: Option<TextFormat>,
}

impl Representation {
    /// Representation enumerated by a code list
    pub fn enumerated(codelist: Reference) -> Self {
        Self {
            enumeration: Some(codelist),
            text_format: None,
        }
    }

    /// Free text representation of the given type (e.g. "String", "Double")
    pub fn text(text_type: &str) -> Self {
        Self {
            enumeration: None,
            text_format: Some(TextFormat {
                text_type: Some(text_type.to_string()),
                ..TextFormat::default()
            }),
        }
    }
}

/// A code in a code list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    #[serde(flatten)]
    pub nameable: NameableArtefact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Code {
    pub fn new(id: &str) -> Self {
        Self {
            nameable: NameableArtefact::new(id),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent = Some(parent_id.to_string());
        self
    }

    pub fn with_name(mut self, lang: &str, text: &str) -> Self {
        self.nameable = self.nameable.with_name(lang, text);
        self
    }
}

/// A concept in a concept scheme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    #[serde(flatten)]
    pub nameable: NameableArtefact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_representation: Option<Representation>,
}

impl Concept {
    pub fn new(id: &str) -> Self {
        Self {
            nameable: NameableArtefact::new(id),
            parent: None,
            core_representation: None,
        }
    }

    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent = Some(parent_id.to_string());
        self
    }

    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.core_representation = Some(representation);
        self
    }
}

macro_rules! impl_scheme_item {
    ($ty:ty) => {
        impl Identifiable for $ty {
            fn identifiable(&self) -> &IdentifiableArtefact {
                &self.nameable.identity
            }
        }

        impl Nameable for $ty {
            fn nameable(&self) -> &NameableArtefact {
                &self.nameable
            }
        }

        impl SchemeItem for $ty {
            fn parent_id(&self) -> Option<&str> {
                self.parent.as_deref()
            }
        }
    };
}

impl_scheme_item!(Code);
impl_scheme_item!(Concept);

/// A maintained, possibly hierarchical list of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemScheme<T> {
    #[serde(flatten)]
    pub maintainable: MaintainableArtefact,
    /// The scheme holds a subset of the items of the full scheme
    #[serde(default)]
    pub is_partial: bool,
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

impl_maintainable!(impl<T> ItemScheme<T>);

/// A code list
pub type Codelist = ItemScheme<Code>;

/// A concept scheme
pub type ConceptScheme = ItemScheme<Concept>;

impl<T: SchemeItem> ItemScheme<T> {
    /// Create an empty scheme
    pub fn new(maintainable: MaintainableArtefact) -> Self {
        Self::with_items(maintainable, Vec::new())
    }

    /// Create a scheme holding `items`
    pub fn with_items(maintainable: MaintainableArtefact, items: Vec<T>) -> Self {
        Self {
            maintainable,
            is_partial: false,
            items,
        }
    }

    /// Items in insertion order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Alias of [`ItemScheme::len`]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Append an item
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Insert an item at `index`, clamped to the end of the list
    pub fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Remove the item at `index`
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Replace the item at `index`, returning the previous one
    pub fn replace(&mut self, index: usize, item: T) -> Option<T> {
        self.items
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, item))
    }

    /// Position of the first item with the given id
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.identifies_me_str(id))
    }

    /// First item with the given id
    pub fn find_item_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.identifies_me_str(id))
    }

    /// Item named by the reference's item id
    pub fn find_item_by_reference(&self, reference: &Reference) -> Option<&T> {
        reference
            .item_id
            .as_deref()
            .and_then(|id| self.find_item_by_id(id))
    }

    /// Lookup table by id; the first item wins when ids repeat
    pub fn item_index(&self) -> HashMap<&str, &T> {
        let mut index = HashMap::with_capacity(self.items.len());
        for item in &self.items {
            if let Some(id) = item.id() {
                index.entry(id).or_insert(item);
            }
        }
        index
    }

    /// Children of `parent_id`, or the root items when `parent_id` is None
    pub fn sub_items_of(&self, parent_id: Option<&str>) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.parent_id() == parent_id)
            .collect()
    }

    /// True when no item declares a parent
    pub fn is_flat(&self) -> bool {
        self.items.iter().all(|item| item.parent_id().is_none())
    }

    /// Depth of the item, 1 for a root. Unknown ids report 0.
    pub fn level_of(&self, id: &str) -> usize {
        level_in(&self.item_index(), id)
    }

    /// Items whose level equals `level`
    pub fn items_on_level(&self, level: usize) -> Vec<&T> {
        let index = self.item_index();
        self.items
            .iter()
            .filter(|item| item.id().is_some_and(|id| level_in(&index, id) == level))
            .collect()
    }

    /// Deepest level in the scheme, 0 when empty
    pub fn max_level(&self) -> usize {
        let index = self.item_index();
        self.items
            .iter()
            .filter_map(|item| item.id())
            .map(|id| level_in(&index, id))
            .max()
            .unwrap_or(0)
    }

    /// Parents of the item, nearest first
    pub fn ancestors_of(&self, id: &str) -> Vec<&T> {
        let index = self.item_index();
        let mut ancestors = Vec::new();
        let mut current = index.get(id).copied();
        while let Some(item) = current {
            if ancestors.len() + 1 >= MAX_HIERARCHY_DEPTH {
                break;
            }
            current = item.parent_id().and_then(|parent| index.get(parent).copied());
            if let Some(parent) = current {
                ancestors.push(parent);
            }
        }
        ancestors
    }
}

fn level_in<T: SchemeItem>(index: &HashMap<&str, &T>, id: &str) -> usize {
    let Some(mut current) = index.get(id).copied() else {
        return 0;
    };
    let mut level = 1;
    while level < MAX_HIERARCHY_DEPTH {
        match current.parent_id().and_then(|parent| index.get(parent).copied()) {
            Some(parent) => {
                current = parent;
                level += 1;
            }
            None => break,
        }
    }
    level
}
