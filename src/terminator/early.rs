//! The simple early terminator (spec.md §4.7, scenario Sc1): stops once
//! every pending [`StopPoint::Command`] has been mutated. Does not
//! understand subcommand indices; a [`StopPoint::Subcommand`] added to it
//! is treated as pending on its enclosing command (see
//! [`vulkan::VulkanTerminator`](super::vulkan::VulkanTerminator) for a
//! terminator that can stop mid-submission).

use std::collections::HashSet;

use crate::command::{BoxedCmd, CmdId, Cmd};
use crate::error::Error;
use crate::state::State;
use crate::writer::Writer;

use super::{StopPoint, Terminator};

pub struct EarlyTerminator {
    state: State,
    pending: HashSet<StopPoint>,
    done: bool,
}

impl EarlyTerminator {
    pub fn new(state: State) -> Self {
        EarlyTerminator {
            state,
            pending: HashSet::new(),
            done: false,
        }
    }

    fn satisfy(&mut self, id: CmdId) {
        self.pending.retain(|point| match point {
            StopPoint::Command(pending_id) => *pending_id != id,
            StopPoint::Subcommand(pending_id, _) => *pending_id != id,
        });
        if self.pending.is_empty() {
            self.done = true;
        }
    }
}

impl Writer for EarlyTerminator {
    fn state(&self) -> &State {
        &self.state
    }

    fn mutate_and_write(&mut self, id: CmdId, cmd: BoxedCmd) -> Result<(), Error> {
        let is_eos = cmd.as_any().downcast_ref::<crate::command::EndOfStream>().is_some();
        let result = cmd.mutate(&mut self.state, None);
        if let Err(e) = result {
            log::warn!("EarlyTerminator: command {} aborted: {}", id, e);
        }
        if is_eos {
            // Always let end-of-stream through so any transform above us
            // gets its flush driven by a real stream element.
            self.done = true;
        } else if !self.pending.is_empty() {
            self.satisfy(id);
        }
        Ok(())
    }
}

impl Terminator for EarlyTerminator {
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
