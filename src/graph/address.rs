//! Dense address interning for the dependency graph (spec.md §4.9,
//! component C8).
//!
//! The graph tracks liveness per *address*, not per handle: a `Binding`'s
//! data cell, an object's own identity, and a descriptor slot all need a
//! stable, hashable, copyable key distinct from the `Handle` the state
//! table uses, since an address can outlive the object that currently owns
//! it (a freed-then-recreated handle is a different address).

use std::collections::{HashMap, HashSet};

use crate::state::table::Handle;

/// A dense, interned address. Two `(parent, key)` pairs intern to the same
/// `Addr` iff they are equal; interning is idempotent (spec.md §4.9).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Addr(u64);

/// Which object table a [`StateKey::Object`] refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    Image,
    Buffer,
    DeviceMemory,
    Pipeline,
    RenderPass,
    Framebuffer,
    Queue,
    DescriptorSet,
    CommandBuffer,
    Swapchain,
    /// A handle whose owning table the caller didn't need to distinguish
    /// (e.g. a `DeferredBehaviour::ReadHandle`, which fires for both
    /// descriptor sets and the resources bound into them).
    Opaque,
}

/// The pre-interning identity of an address: an object's own existence, one
/// of its bindings' data cells, or one descriptor slot.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum StateKey {
    /// The object's identity itself (liveness of the handle, not its data).
    Object(ObjectKind, Handle),
    /// The data cell backing one `DeviceMemory` binding.
    Binding(Handle, usize),
    /// One `(binding, array element)` slot of a descriptor set.
    DescriptorSlot(Handle, u32),
}

/// Interns `(parent, StateKey)` pairs into dense [`Addr`]s. `parent` lets
/// two otherwise-identical keys under different owners stay distinct
/// without widening [`StateKey`] itself (e.g. the same binding index under
/// two different memory objects is naturally disambiguated by `Handle`
/// already, so `parent` is usually `None`; it exists for state keys that
/// don't carry enough context on their own).
#[derive(Debug, Clone, Default)]
pub struct AddressMap {
    interned: HashMap<(Option<Addr>, StateKey), Addr>,
    /// `addr -> parent`, recorded alongside interning so the DCE liveness
    /// sweep can walk a child's ancestry (spec.md §3, §4.9: "parent(addr)
    /// always lies below addr in dependency: writes to a parent cell
    /// invalidate all children").
    parents: HashMap<Addr, Addr>,
    next: u64,
}

impl AddressMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, parent: Option<Addr>, key: StateKey) -> Addr {
        if let Some(&addr) = self.interned.get(&(parent, key.clone())) {
            return addr;
        }
        let addr = Addr(self.next);
        self.next += 1;
        self.interned.insert((parent, key), addr);
        if let Some(parent) = parent {
            self.parents.insert(addr, parent);
        }
        addr
    }

    /// Shorthand for keys with no distinguishing parent.
    pub fn intern_root(&mut self, key: StateKey) -> Addr {
        self.intern(None, key)
    }

    /// The address this one was interned under, if any.
    pub fn parent(&self, addr: Addr) -> Option<Addr> {
        self.parents.get(&addr).copied()
    }

    /// `addr` and every address transitively reached by following `parent`
    /// links starting at one of `roots` -- i.e. every address a write to
    /// one of `roots` also invalidates.
    pub fn descendants_of(&self, roots: impl IntoIterator<Item = Addr>) -> HashSet<Addr> {
        let mut out: HashSet<Addr> = roots.into_iter().collect();
        let mut changed = true;
        while changed {
            changed = false;
            for (&child, &parent) in &self.parents {
                if out.contains(&parent) && !out.contains(&child) {
                    out.insert(child);
                    changed = true;
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.next as usize
    }
}
