//! Dependency-graph construction (spec.md §4.9, component C8, build phase).

use std::collections::HashMap;

use crate::command::{BoxedCmd, CmdId};
use crate::error::Error;
use crate::state::State;

use super::address::AddressMap;
use super::behaviour::AtomBehaviour;

/// Classifies one command's effect on the address space. Implemented per
/// API (see [`crate::vulkan::behaviour_provider::VulkanBehaviourProvider`]
/// for C10); the dependency graph itself is API-agnostic.
///
/// `pre`/`post` are the state immediately before and after `cmd.mutate` ran:
/// reads are classified against `pre` (what the command observed), writes
/// and new-object addresses against `post` (what the command produced).
pub trait BehaviourProvider {
    fn behaviour(
        &self,
        id: CmdId,
        cmd: &dyn crate::command::Cmd,
        pre: &State,
        post: &State,
        addresses: &mut AddressMap,
    ) -> AtomBehaviour;
}

/// The built dependency graph: one [`AtomBehaviour`] per command, in
/// submission order, plus the interned address space they're expressed
/// over.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    pub addresses: AddressMap,
    pub behaviours: HashMap<CmdId, AtomBehaviour>,
    pub order: Vec<CmdId>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the whole command list forward through `mutate`, classifying
    /// each command's behaviour as it goes. Returns the graph and the
    /// resulting final state (the behaviour provider's `post` snapshot for
    /// the last command).
    ///
    /// Full-state cloning per command (to get a `pre` snapshot) trades
    /// throughput for a single source of truth for command semantics --
    /// production GAPIS instead tracks deltas. Acceptable here; see
    /// DESIGN.md, "Dependency-graph build: full-state clone per command".
    pub fn build<P: BehaviourProvider>(
        commands: &[(CmdId, BoxedCmd)],
        provider: &P,
    ) -> Result<(Self, State), Error> {
        let mut state = State::new();
        let mut graph = DependencyGraph::new();

        for (id, cmd) in commands {
            let pre = state.clone();
            let result = cmd.mutate(&mut state, None);
            let mut behaviour = provider.behaviour(*id, cmd.as_ref(), &pre, &state, &mut graph.addresses);
            if let Err(ref e) = result {
                log::warn!("command {} ({}) aborted: {}", id, cmd.name(), e);
                behaviour.aborted = true;
            }
            graph.behaviours.insert(*id, behaviour);
            graph.order.push(*id);
        }

        Ok((graph, state))
    }
}
