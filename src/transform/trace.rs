//! Trace transform (spec.md §4.6, component C7): logs every command that
//! passes through it via the `log` crate, gated by [`Config`] toggles.

use crate::command::{BoxedCmd, CmdId};
use crate::config::Config;
use crate::error::Error;
use crate::writer::Writer;

use super::Transform;

/// Forwards every command unchanged, logging it at `trace` level on the
/// way through. Purely diagnostic: never rewrites or drops anything.
pub struct Trace {
    config: Config,
}

impl Trace {
    pub fn new(config: Config) -> Self {
        Trace {
            config,
        }
    }
}

impl Transform for Trace {
    fn transform(&mut self, id: CmdId, cmd: BoxedCmd, out: &mut dyn Writer) -> Result<(), Error> {
        if self.config.dump_validation_trace {
            log::trace!("{}: {} {:?}", id, cmd.name(), cmd.extras());
        } else {
            log::trace!("{}: {}", id, cmd.name());
        }
        if self.config.log_transforms_to_capture {
            log::debug!("transform trace: forwarding {} ({})", id, cmd.name());
        }
        out.mutate_and_write(id, cmd)
    }

    fn name(&self) -> &'static str {
        "trace"
    }
}
