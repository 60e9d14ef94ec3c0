//! Snapshot publication of a structure registry
//!
//! [`SharedStructures`] lets one writer replace or extend the registry while
//! any number of readers keep querying the snapshot they loaded. A snapshot is
//! never mutated after publication, so readers see either the registry before
//! a merge or after it.

use super::structures::Structures;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct SharedStructures {
    snapshot: ArcSwap<Structures>,
}

impl Default for SharedStructures {
    fn default() -> Self {
        Self::new(Structures::default())
    }
}

impl SharedStructures {
    pub fn new(structures: Structures) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(structures),
        }
    }

    /// The current registry
    #[inline]
    pub fn snapshot(&self) -> Arc<Structures> {
        self.snapshot.load_full()
    }

    /// Replace the registry wholesale
    pub fn publish(&self, structures: Structures) {
        debug!("Publishing new structure snapshot");
        self.snapshot.store(Arc::new(structures));
    }

    /// Merge `other` into a copy of the current registry and publish the copy
    pub fn merge(&self, other: Structures) {
        self.snapshot.rcu(|current| {
            let mut next = Structures::clone(current);
            next.merge(other.clone());
            next
        });
        debug!("Published merged structure snapshot");
    }
}
