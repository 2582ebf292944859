//! Scenario Sc5 / testable properties 5-7 (spec.md §8): DCE soundness
//! (every command the request transitively depends on survives),
//! monotonicity (a superset request never drops something a smaller
//! request kept), and aliased-write conservatism (a zero-length/aliased
//! write never kills the previous writer).

use std::collections::HashMap;

use gapir_core::command::{Cmd, CmdId, Noop};
use gapir_core::config::Config;
use gapir_core::graph::{Addr, AddressMap, AtomBehaviour, BehaviourProvider, Dce, DependencyGraph, StateKey, ObjectKind};
use gapir_core::state::table::Handle;

/// A fixed-script behaviour provider: behaviour per `CmdId` is whatever the
/// test wired up ahead of time, independent of the actual (trivial, noop)
/// state mutation. This isolates the DCE algorithm from any one API
/// plug-in's semantics.
struct ScriptedProvider {
    behaviours: HashMap<CmdId, AtomBehaviour>,
}

impl BehaviourProvider for ScriptedProvider {
    fn behaviour(
        &self,
        id: CmdId,
        _cmd: &dyn Cmd,
        _pre: &gapir_core::state::State,
        _post: &gapir_core::state::State,
        _addresses: &mut AddressMap,
    ) -> AtomBehaviour {
        self.behaviours.get(&id).cloned().unwrap_or_default()
    }
}

fn noop_stream(n: u64) -> Vec<(CmdId, Box<dyn Cmd>)> {
    (0..n)
        .map(|i| (CmdId::new(i), Box::new(Noop::new()) as Box<dyn Cmd>))
        .collect()
}

fn addr_for(addresses: &mut AddressMap, handle: u64) -> Addr {
    addresses.intern_root(StateKey::Object(ObjectKind::Buffer, Handle(handle)))
}

#[test]
fn soundness_keeps_every_transitive_dependency() {
    let mut addresses = AddressMap::new();
    let a = addr_for(&mut addresses, 1);

    let mut behaviours = HashMap::new();
    // cmd 0 writes `a`, cmd 1 reads `a`, cmd 2 is unrelated.
    behaviours.insert(CmdId::new(0), AtomBehaviour::new().with_write(a));
    behaviours.insert(CmdId::new(1), AtomBehaviour::new().with_read(a));
    behaviours.insert(CmdId::new(2), AtomBehaviour::new());

    let provider = ScriptedProvider { behaviours };
    let commands = noop_stream(3);
    let (mut graph, _state) = DependencyGraph::build(&commands, &provider).unwrap();
    graph.addresses = addresses;

    let config = Config::default();
    let dce = Dce::new(&graph, &config);
    let live = dce.run(&[a]);

    assert!(live.contains(&CmdId::new(0)));
    assert!(live.contains(&CmdId::new(1)));
    assert!(!live.contains(&CmdId::new(2)));
}

#[test]
fn monotonicity_a_superset_request_never_drops_what_a_subset_kept() {
    let mut addresses = AddressMap::new();
    let a = addr_for(&mut addresses, 1);
    let b = addr_for(&mut addresses, 2);

    let mut behaviours = HashMap::new();
    behaviours.insert(CmdId::new(0), AtomBehaviour::new().with_write(a));
    behaviours.insert(CmdId::new(1), AtomBehaviour::new().with_write(b));

    let provider = ScriptedProvider { behaviours };
    let commands = noop_stream(2);
    let (mut graph, _state) = DependencyGraph::build(&commands, &provider).unwrap();
    graph.addresses = addresses;

    let config = Config::default();
    let dce = Dce::new(&graph, &config);

    let small = dce.run(&[a]);
    let large = dce.run(&[a, b]);

    assert!(small.is_subset(&large));
}

#[test]
fn keep_alive_survives_even_with_no_readers() {
    let mut addresses = AddressMap::new();
    let _unused = addr_for(&mut addresses, 1);

    let mut behaviours = HashMap::new();
    behaviours.insert(CmdId::new(0), AtomBehaviour::new().keep_alive());
    behaviours.insert(CmdId::new(1), AtomBehaviour::new());

    let provider = ScriptedProvider { behaviours };
    let commands = noop_stream(2);
    let (mut graph, _state) = DependencyGraph::build(&commands, &provider).unwrap();
    graph.addresses = addresses;

    let config = Config::default();
    let dce = Dce::new(&graph, &config);
    let live = dce.run(&[]);

    assert!(live.contains(&CmdId::new(0)));
    assert!(!live.contains(&CmdId::new(1)));
}

#[test]
fn aliased_write_never_kills_the_previous_writer() {
    let mut addresses = AddressMap::new();
    let a = addr_for(&mut addresses, 1);

    let mut behaviours = HashMap::new();
    // cmd 0 writes `a` fully; cmd 1 is a zero-length/aliased write,
    // classified as `modify` -- it must not sever cmd 0 from a later
    // reader of `a`.
    behaviours.insert(CmdId::new(0), AtomBehaviour::new().with_write(a));
    behaviours.insert(CmdId::new(1), AtomBehaviour::new().with_modify(a));
    behaviours.insert(CmdId::new(2), AtomBehaviour::new().with_read(a));

    let provider = ScriptedProvider { behaviours };
    let commands = noop_stream(3);
    let (mut graph, _state) = DependencyGraph::build(&commands, &provider).unwrap();
    graph.addresses = addresses;

    let config = Config::default();
    let dce = Dce::new(&graph, &config);
    let live = dce.run(&[a]);

    assert!(live.contains(&CmdId::new(0)));
    assert!(live.contains(&CmdId::new(1)));
    assert!(live.contains(&CmdId::new(2)));
}

#[test]
fn a_write_to_a_parent_address_invalidates_its_children() {
    let mut addresses = AddressMap::new();
    let memory = addresses.intern_root(StateKey::Object(ObjectKind::DeviceMemory, Handle(1)));
    let binding = addresses.intern(Some(memory), StateKey::Binding(Handle(1), 0));

    let mut behaviours = HashMap::new();
    // cmd 0 writes the binding directly.
    behaviours.insert(CmdId::new(0), AtomBehaviour::new().with_write(binding));
    // cmd 1 rewrites the owning memory object itself -- this must also
    // invalidate the binding carved out of it, so a later reader of the
    // binding depends on cmd 1, not cmd 0.
    behaviours.insert(CmdId::new(1), AtomBehaviour::new().with_write(memory));
    behaviours.insert(CmdId::new(2), AtomBehaviour::new().with_read(binding));

    let provider = ScriptedProvider { behaviours };
    let commands = noop_stream(3);
    let (mut graph, _state) = DependencyGraph::build(&commands, &provider).unwrap();
    graph.addresses = addresses;

    let config = Config::default();
    let dce = Dce::new(&graph, &config);
    let live = dce.run(&[binding]);

    assert!(live.contains(&CmdId::new(1)));
    assert!(live.contains(&CmdId::new(2)));
    // cmd 0's write was superseded by cmd 1's parent write before cmd 2
    // ever reads, so it is not part of this request's transitive closure.
    assert!(!live.contains(&CmdId::new(0)));
}

#[test]
fn disabling_dce_keeps_the_whole_stream_alive() {
    let behaviours = HashMap::new();
    let provider = ScriptedProvider { behaviours };
    let commands = noop_stream(5);
    let (graph, _state) = DependencyGraph::build(&commands, &provider).unwrap();

    let mut config = Config::default();
    config.disable_dead_code_elimination = true;
    let dce = Dce::new(&graph, &config);
    let live = dce.run(&[]);

    assert_eq!(live.len(), 5);
}
