//! `DeviceMemory` bindings (spec.md §3).
//!
//! A memory object owns zero or more bindings, each a half-open byte range
//! with an attached data cell. The data cell -- not the binding itself --
//! is the unit the dependency graph tracks reads/writes against, so that
//! overlapping writes to the same memory object can still retain distinct
//! prior live writers per sub-range.

use crate::command::observation::MemoryRange;

/// One `[start, end)` byte range of a `DeviceMemory` object, created by
/// `Bind{Image,Buffer}Memory`. The binding's *index* within its owning
/// memory object's binding list is its identity for the dependency graph
/// (interned fresh on each lookup -- interning is idempotent, spec.md §4.8
/// -- rather than cached here, so `State` (C2) stays independent of the
/// dependency-graph machinery (C8)).
#[derive(Debug, Clone)]
pub struct Binding {
    pub range: MemoryRange,
    /// True for a binding whose size was never queried (e.g. an image
    /// bound before `vkGetImageMemoryRequirements`); always conservatively
    /// `modify`d rather than `write`-killed (spec.md §4.8 rule 4).
    pub zero_length: bool,
}

impl Binding {
    pub fn new(range: MemoryRange) -> Self {
        Binding {
            zero_length: range.is_empty(),
            range,
        }
    }
}
