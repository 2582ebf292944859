//! The `Writer` contract (spec.md §4.3, component C3): the sink every
//! transform and the terminator write commands into.

use crate::command::{BoxedCmd, CmdId};
use crate::error::Error;
use crate::state::State;

/// Something that can accept a mutated command and report the state it
/// produced. Every stage of a [`chain`](crate::transform::chain) is a
/// `Writer` to the stage above it: a [`Transform`](crate::transform::Transform)
/// wraps the next writer in a [`TransformWriter`]-shaped adapter (see
/// `transform::chain::drive`), and the bottom of the chain is the
/// [`Terminator`](crate::terminator::Terminator).
pub trait Writer {
    /// The state as of the last successful `mutate_and_write` call.
    fn state(&self) -> &State;

    /// Mutate `state()` with `cmd` and forward it further down the chain.
    /// `id` is the command's original position in the stream; transforms
    /// that synthesize new commands give them [`CmdId::NO_ID`].
    fn mutate_and_write(&mut self, id: CmdId, cmd: BoxedCmd) -> Result<(), Error>;
}

/// The bottom-most `Writer`: owns `State` outright and applies `mutate`
/// with no further forwarding. A [`Terminator`](crate::terminator::Terminator)
/// wraps one of these (or is one) to also decide pending-command policy.
pub struct MutatingWriter<'s> {
    state: &'s mut State,
}

impl<'s> MutatingWriter<'s> {
    pub fn new(state: &'s mut State) -> Self {
        MutatingWriter {
            state,
        }
    }
}

impl<'s> Writer for MutatingWriter<'s> {
    fn state(&self) -> &State {
        self.state
    }

    fn mutate_and_write(&mut self, _id: CmdId, cmd: BoxedCmd) -> Result<(), Error> {
        cmd.mutate(self.state, None)
    }
}
