//! Generic object table keyed by opaque handles (spec.md §3, §4.2).
//!
//! Mirrors the teacher's pattern of wrapping a raw resource id in a thin
//! owning container (e.g. `resource::pool::Pool`): handles are never owned
//! by more than one table, and cross references (image -> memory) are
//! plain lookups, not ownership (see DESIGN.md, "Cyclic/back-references").

use std::collections::HashMap;

use crate::error::Error;

/// An opaque handle into a [`State`](crate::state::State) object table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct Handle(pub u64);

/// A table of objects of one kind, keyed by [`Handle`].
///
/// `Create*` commands call [`insert`](ObjectTable::insert); `Destroy*`/
/// `Free*` commands call [`remove`](ObjectTable::remove). Removing a handle
/// that is not present is a double-destroy and is an error (spec.md §3).
#[derive(Debug, Clone)]
pub struct ObjectTable<O> {
    objects: HashMap<Handle, O>,
}

impl<O> Default for ObjectTable<O> {
    fn default() -> Self {
        ObjectTable {
            objects: HashMap::new(),
        }
    }
}

impl<O> ObjectTable<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.objects.contains_key(&handle)
    }

    pub fn get(&self, handle: Handle) -> Option<&O> {
        self.objects.get(&handle)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut O> {
        self.objects.get_mut(&handle)
    }

    /// Create a new object at `handle`. Does not check for collisions:
    /// a capture that recreates a handle without destroying the previous
    /// object first is malformed, but the table is not the place to detect
    /// that (the behaviour provider is, see §4.8 rule 2).
    pub fn insert(&mut self, handle: Handle, object: O) {
        self.objects.insert(handle, object);
    }

    /// Remove `handle`. Double-destroy (removing a handle that was never
    /// inserted, or already removed) surfaces as [`Error::DoubleDestroy`].
    pub fn remove(&mut self, handle: Handle) -> Result<O, Error> {
        self.objects.remove(&handle).ok_or(Error::DoubleDestroy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Handle, &O)> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<O: PartialEq> ObjectTable<O> {
    /// Component-wise equality of the live handle set, used by DCE
    /// soundness checks (spec.md §8, testable property 5): two tables
    /// are equal here iff they contain the same handles mapped to equal
    /// objects, regardless of insertion order.
    pub fn live_handles_equal(&self, other: &Self) -> bool {
        if self.objects.len() != other.objects.len() {
            return false;
        }
        self.objects.iter().all(|(h, o)| other.objects.get(h) == Some(o))
    }
}
