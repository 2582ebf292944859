//! The Vulkan multi-queue terminator (spec.md §4.7, scenario Sc1):
//! subcommand-aware, so it can stop replay in the middle of a `QueueSubmit`
//! rather than only between whole commands. When the pending stop point is
//! a [`StopPoint::Subcommand`] targeting a `QueueSubmit`, it rewrites that
//! submit's command-buffer list via
//! [`command_buffer_rebuilder`](crate::vulkan::command_buffer_rebuilder)
//! before mutating it.

use std::collections::HashSet;

use crate::command::{BoxedCmd, Cmd, CmdId};
use crate::error::Error;
use crate::state::table::Handle;
use crate::state::State;
use crate::vulkan::command_buffer_rebuilder;
use crate::vulkan::commands::QueueSubmit;
use crate::writer::Writer;

use super::{StopPoint, Terminator};

pub struct VulkanTerminator {
    state: State,
    pending: HashSet<StopPoint>,
    done: bool,
    next_synthetic_handle: u64,
}

impl VulkanTerminator {
    pub fn new(state: State) -> Self {
        VulkanTerminator {
            state,
            pending: HashSet::new(),
            done: false,
            // Synthetic handles for rebuilt command buffers live in a
            // disjoint high range so they can never collide with a real
            // capture's handles (spec.md reserves no such range explicitly;
            // this is a documented implementation choice, DESIGN.md).
            next_synthetic_handle: 1 << 62,
        }
    }

    fn satisfy_command(&mut self, id: CmdId) {
        self.pending.retain(|point| match point {
            StopPoint::Command(pending_id) => *pending_id != id,
            StopPoint::Subcommand(pending_id, _) => *pending_id != id,
        });
        if self.pending.is_empty() {
            self.done = true;
        }
    }
}

impl Writer for VulkanTerminator {
    fn state(&self) -> &State {
        &self.state
    }

    fn mutate_and_write(&mut self, id: CmdId, mut cmd: BoxedCmd) -> Result<(), Error> {
        let is_eos = cmd.as_any().downcast_ref::<crate::command::EndOfStream>().is_some();

        let subcommand_stop = self.pending.iter().find_map(|point| match point {
            StopPoint::Subcommand(pending_id, index) if *pending_id == id => Some(index.clone()),
            _ => None,
        });

        if let Some(stop) = subcommand_stop {
            if let Some(submit) = cmd.as_any().downcast_ref::<QueueSubmit>() {
                let mut rebuilt = submit.clone();
                let mut next_handle = self.next_synthetic_handle;
                let allocator = || {
                    let h = Handle(next_handle);
                    next_handle += 1;
                    h
                };
                rebuilt.command_buffers =
                    command_buffer_rebuilder::rebuild_for_stop(&mut self.state, &submit.command_buffers, &stop, allocator);
                self.next_synthetic_handle = next_handle;
                cmd = Box::new(rebuilt);
            }
        }

        let result = cmd.mutate(&mut self.state, None);
        if let Err(e) = result {
            log::warn!("VulkanTerminator: command {} aborted: {}", id, e);
        }

        if is_eos {
            self.done = true;
        } else if !self.pending.is_empty() {
            self.satisfy_command(id);
        }
        Ok(())
    }
}

impl Terminator for VulkanTerminator {
    fn add_pending(&mut self, point: StopPoint) {
        self.done = false;
        self.pending.insert(point);
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn pending(&self) -> &HashSet<StopPoint> {
        &self.pending
    }
}
