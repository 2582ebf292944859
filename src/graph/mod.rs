//! Dependency graph and dead-code elimination (spec.md §4.9, components C8
//! and C9).

pub mod address;
pub mod behaviour;
pub mod dce;
pub mod dependency_graph;

pub use address::{Addr, AddressMap, ObjectKind, StateKey};
pub use behaviour::AtomBehaviour;
pub use dce::Dce;
pub use dependency_graph::{BehaviourProvider, DependencyGraph};
