//! Rebuilds a `QueueSubmit`'s command-buffer list so it stops exactly at a
//! requested [`SubcommandIndex`] (spec.md §4.7, scenario Sc1).
//!
//! Command buffers before the one containing the stop point are kept
//! whole; the one containing it is replaced by a synthesized handle whose
//! record is truncated to the stop's prefix; everything after it is
//! dropped from the submit entirely.

use crate::command::SubcommandIndex;
use crate::state::command_buffer::CommandBufferRecord;
use crate::state::table::Handle;
use crate::state::State;

fn truncate(record: &CommandBufferRecord, up_to_inclusive: usize, handle: Handle) -> CommandBufferRecord {
    let end = (up_to_inclusive + 1).min(record.records.len());
    CommandBufferRecord {
        handle: Some(handle),
        records: record.records[..end].to_vec(),
    }
}

/// Rewrites `command_buffers` (a `QueueSubmit`'s command-buffer list) so
/// that replaying it stops at `stop`. `alloc_handle` mints a fresh handle
/// for each synthesized command buffer this needs to insert into `state`.
///
/// Returns the replacement command-buffer list to submit instead of the
/// original.
pub fn rebuild_for_stop(
    state: &mut State,
    command_buffers: &[Handle],
    stop: &SubcommandIndex,
    mut alloc_handle: impl FnMut() -> Handle,
) -> Vec<Handle> {
    let stop_cb = match stop.command_buffer() {
        Some(idx) => idx,
        None => return command_buffers.to_vec(),
    };
    let stop_cmd = stop.command().unwrap_or(0);

    let mut rebuilt = Vec::with_capacity(stop_cb + 1);
    for (idx, &cb) in command_buffers.iter().enumerate() {
        if idx < stop_cb {
            rebuilt.push(cb);
            continue;
        }
        if idx > stop_cb {
            break;
        }

        let record = match state.command_buffers.get(cb) {
            Some(r) => r.clone(),
            None => break,
        };

        if stop.secondary_command_buffer().is_some() {
            // 5-long index: the stop lands inside a secondary buffer
            // executed by the `CmdExecuteCommands` at `stop_cmd`. Truncate
            // the secondary to its own prefix, then truncate the primary
            // up to and including the `CmdExecuteCommands` record, but
            // only after swapping in the rebuilt secondary.
            let secondary_handle = find_secondary(&record, stop_cmd);
            if let Some(secondary_handle) = secondary_handle {
                if let Some(secondary_record) = state.command_buffers.get(secondary_handle) {
                    let sub = stop.secondary_subcommand().unwrap_or(0);
                    let truncated_secondary = truncate(secondary_record, sub, alloc_handle());
                    let new_secondary_handle = truncated_secondary.handle.expect("just set");
                    state.command_buffers.insert(new_secondary_handle, truncated_secondary);

                    let mut primary = truncate(&record, stop_cmd, alloc_handle());
                    rewrite_secondary_ref(&mut primary, secondary_handle, new_secondary_handle);
                    let new_primary_handle = primary.handle.expect("just set");
                    state.command_buffers.insert(new_primary_handle, primary);
                    rebuilt.push(new_primary_handle);
                }
            }
        } else {
            let truncated = truncate(&record, stop_cmd, alloc_handle());
            let new_handle = truncated.handle.expect("just set");
            state.command_buffers.insert(new_handle, truncated);
            rebuilt.push(new_handle);
        }
    }
    rebuilt
}

fn find_secondary(record: &CommandBufferRecord, cmd_idx: usize) -> Option<Handle> {
    use crate::state::command_buffer::DeferredBehaviour;
    let recorded = record.records.get(cmd_idx)?;
    recorded.behaviours.iter().find_map(|b| match b {
        DeferredBehaviour::SecondaryCommandBuffer(h) => Some(*h),
        _ => None,
    })
}

fn rewrite_secondary_ref(record: &mut CommandBufferRecord, old: Handle, new: Handle) {
    use crate::state::command_buffer::DeferredBehaviour;
    for recorded in &mut record.records {
        for behaviour in &mut recorded.behaviours {
            if let DeferredBehaviour::SecondaryCommandBuffer(h) = behaviour {
                if *h == old {
                    *h = new;
                }
            }
        }
    }
}
