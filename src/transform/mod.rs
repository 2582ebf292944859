//! Transforms over a command stream (spec.md §4.4-§4.7, components C4, C5,
//! C7).

pub mod chain;
pub mod file_log;
pub mod injector;
pub mod trace;

use crate::command::{BoxedCmd, CmdId};
use crate::error::Error;
use crate::writer::Writer;

/// One stage of a [`chain::Chain`]. A transform may pass a command through
/// unchanged, rewrite it, drop it, or emit additional commands of its own
/// before and/or after it, by calling `out.mutate_and_write` any number of
/// times (spec.md §4.4: "a transform owns how many commands it contributes
/// to the stream below it, including zero").
///
/// `flush` runs once, after the last command has been transformed, to let a
/// transform emit anything it held back (the [`dce`](crate::graph::dce)
/// transform batches its whole input before it knows what is live).
pub trait Transform {
    fn transform(&mut self, id: CmdId, cmd: BoxedCmd, out: &mut dyn Writer) -> Result<(), Error>;

    fn flush(&mut self, _out: &mut dyn Writer) -> Result<(), Error> {
        Ok(())
    }

    /// Runs once before the first command reaches this transform.
    fn pre_loop(&mut self, _out: &mut dyn Writer) -> Result<(), Error> {
        Ok(())
    }

    /// Short, stable name for logging and panic messages.
    fn name(&self) -> &'static str;
}
