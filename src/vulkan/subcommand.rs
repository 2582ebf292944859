//! Depth-first walk over a `QueueSubmit`'s command buffers (spec.md §4.10).
//!
//! Shared by the behaviour provider (resolving a submit's aggregate
//! [`AtomBehaviour`](crate::graph::AtomBehaviour)) and the Vulkan terminator
//! (locating the Nth executed subcommand to truncate a partial submission,
//! scenario Sc1). Pure: reads `state.command_buffers` but mutates nothing,
//! so the dependency-graph build pass and a live replay-apply pass see the
//! same walk order.

use crate::command::SubcommandIndex;
use crate::state::command_buffer::DeferredBehaviour;
use crate::state::table::Handle;
use crate::state::State;

/// One visited leaf of the walk: its nested index and the behaviours it
/// queued at record time.
pub struct Visited<'s> {
    pub index: SubcommandIndex,
    pub behaviours: &'s [DeferredBehaviour],
}

/// Walks `command_buffers` (the order `QueueSubmit` named them in) in
/// submission order, descending into any `CmdExecuteCommands` secondary
/// buffer depth-first before moving to the next recorded command.
///
/// `submit_index` is the position of this `QueueSubmit` within its batch of
/// submits (spec.md fixes 3-long indices for primary-buffer stops,
/// `[submit, cb, cmd]`, and 5-long for secondary-buffer stops,
/// `[submit, cb, cmd, scb, sub]`).
pub fn walk_submission<'s>(state: &'s State, submit_index: usize, command_buffers: &[Handle]) -> Vec<Visited<'s>> {
    let mut out = Vec::new();
    for (cb_idx, &cb) in command_buffers.iter().enumerate() {
        if let Some(record) = state.command_buffers.get(cb) {
            walk_record(state, &[submit_index, cb_idx], record, &mut out);
        }
    }
    out
}

fn walk_record<'s>(state: &'s State, prefix: &[usize], record: &'s crate::state::command_buffer::CommandBufferRecord, out: &mut Vec<Visited<'s>>) {
    for (cmd_idx, recorded) in record.records.iter().enumerate() {
        let mut index_path = prefix.to_vec();
        index_path.push(cmd_idx);

        for behaviour in &recorded.behaviours {
            if let DeferredBehaviour::SecondaryCommandBuffer(secondary) = behaviour {
                if let Some(secondary_record) = state.command_buffers.get(*secondary) {
                    walk_secondary(state, &index_path, secondary_record, out);
                }
            }
        }

        out.push(Visited {
            index: SubcommandIndex(index_path),
            behaviours: &recorded.behaviours,
        });
    }
}

fn walk_secondary<'s>(
    state: &'s State,
    primary_index: &[usize],
    record: &'s crate::state::command_buffer::CommandBufferRecord,
    out: &mut Vec<Visited<'s>>,
) {
    for (sub_idx, recorded) in record.records.iter().enumerate() {
        let mut index_path = primary_index.to_vec();
        index_path.push(0);
        index_path.push(sub_idx);
        out.push(Visited {
            index: SubcommandIndex(index_path),
            behaviours: &recorded.behaviours,
        });
    }
    let _ = state;
}
