//! In-memory registry of structural metadata

pub mod collection;
pub mod shared;
pub mod structures;

pub use collection::{CodeLists, Concepts, DataStructures, DataflowList, MaintainableCollection};
pub use shared::SharedStructures;
pub use structures::{RegistryHooks, Structures};
