//! An API-aware terminator (spec.md §4.7): wraps
//! [`EarlyTerminator`](super::early::EarlyTerminator) but refuses a
//! subcommand-shaped stop point against a command whose API it has no
//! subcommand-rewrite strategy registered for, rather than silently
//! degrading to command-granularity (spec.md's `TerminatorMissingAPI`
//! error).

use std::collections::HashSet;

use crate::command::{ApiId, BoxedCmd, Cmd, CmdId};
use crate::error::Error;
use crate::state::State;
use crate::writer::Writer;

use super::early::EarlyTerminator;
use super::{StopPoint, Terminator};

pub struct ApiAwareTerminator {
    inner: EarlyTerminator,
    subcommand_aware_apis: HashSet<ApiId>,
}

impl ApiAwareTerminator {
    pub fn new(state: State, subcommand_aware_apis: impl IntoIterator<Item = ApiId>) -> Self {
        ApiAwareTerminator {
            inner: EarlyTerminator::new(state),
            subcommand_aware_apis: subcommand_aware_apis.into_iter().collect(),
        }
    }
}

impl Writer for ApiAwareTerminator {
    fn state(&self) -> &State {
        self.inner.state()
    }

    fn mutate_and_write(&mut self, id: CmdId, cmd: BoxedCmd) -> Result<(), Error> {
        let needs_subcommand_awareness = self.inner.pending().iter().any(|point| {
            matches!(point, StopPoint::Subcommand(pending_id, _) if *pending_id == id)
        });
        if needs_subcommand_awareness {
            match cmd.api() {
                Some(api) if self.subcommand_aware_apis.contains(&api) => {}
                Some(api) => return Err(Error::TerminatorMissingApi(api.0)),
                None => return Err(Error::TerminatorMissingApi("<none>")),
            }
        }
        self.inner.mutate_and_write(id, cmd)
    }
}

impl Terminator for ApiAwareTerminator {
    fn add_pending(&mut self, point: StopPoint) {
        self.inner.add_pending(point);
    }

    fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    fn pending(&self) -> &HashSet<StopPoint> {
        self.inner.pending()
    }
}
