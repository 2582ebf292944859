//! Dead-code elimination over a built [`DependencyGraph`] (spec.md §4.9,
//! component C9): request / propagate / emit.
//!
//! "Build" is [`DependencyGraph::build`]; the three phases here run after
//! it, against a caller-supplied request set (the addresses the caller
//! still needs correct -- e.g. the resource a `Get` RPC is about to read).

use std::collections::HashSet;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};

use crate::command::CmdId;
use crate::config::Config;

use super::address::Addr;
use super::dependency_graph::DependencyGraph;

/// Runs the DCE sweep over a [`DependencyGraph`].
pub struct Dce<'g> {
    graph: &'g DependencyGraph,
    config: &'g Config,
}

impl<'g> Dce<'g> {
    pub fn new(graph: &'g DependencyGraph, config: &'g Config) -> Self {
        Dce { graph, config }
    }

    /// Returns the set of commands that must survive to keep every address
    /// in `request` (and every `keep_alive` command) correct.
    ///
    /// Phase "propagate" is a reverse reachability sweep: build a DAG with
    /// an edge `writer -> reader` for every address a command reads that
    /// was last written by an earlier command, seed it with the requested
    /// addresses' writers plus all `keep_alive` commands, then walk edges
    /// backward from the seed -- every command a seed command (transitively)
    /// depends on is live. If `disable_dead_code_elimination` is set, every
    /// command is live and the sweep is skipped entirely.
    pub fn run(&self, request: &[Addr]) -> HashSet<CmdId> {
        if self.config.disable_dead_code_elimination {
            return self.graph.order.iter().copied().collect();
        }

        let mut dag = DiGraph::<CmdId, ()>::new();
        let mut node_of = std::collections::HashMap::with_capacity(self.graph.order.len());
        for &id in &self.graph.order {
            node_of.insert(id, dag.add_node(id));
        }

        let mut last_writer: std::collections::HashMap<Addr, CmdId> = std::collections::HashMap::new();
        let mut seeds: HashSet<NodeIndex> = HashSet::new();

        for &id in &self.graph.order {
            let behaviour = match self.graph.behaviours.get(&id) {
                Some(b) => b,
                None => continue,
            };
            if behaviour.aborted {
                continue;
            }
            let idx = node_of[&id];

            for addr in behaviour.reads.iter().chain(behaviour.modifies.iter()) {
                if let Some(&writer) = last_writer.get(addr) {
                    dag.add_edge(node_of[&writer], idx, ());
                }
            }
            // Zero-length/aliased writes classify as `modifies`, never
            // clobbering the previous writer in `last_writer` before also
            // depending on it above would be wrong; insert after reading.
            //
            // A pure write also kills every address whose parent chain
            // passes through it (spec.md §3, §4.9): a later read of a
            // child address must depend on this write too, since the
            // write clobbered whatever the child previously held.
            for addr in &behaviour.writes {
                for descendant in self.graph.addresses.descendants_of([*addr]) {
                    last_writer.insert(descendant, id);
                }
            }
            for addr in &behaviour.modifies {
                last_writer.insert(*addr, id);
            }

            if behaviour.keep_alive || self.config.all_initial_commands_live {
                seeds.insert(idx);
            }
        }

        for addr in request {
            if let Some(&writer) = last_writer.get(addr) {
                seeds.insert(node_of[&writer]);
            }
        }

        let reversed = Reversed(&dag);
        let mut live = HashSet::new();
        for &start in &seeds {
            let mut dfs = Dfs::new(&reversed, start);
            while let Some(n) = dfs.next(&reversed) {
                live.insert(n);
            }
        }

        live.into_iter().map(|idx| dag[idx]).collect()
    }
}
