//! The terminator (spec.md §4.7, component C6): the bottom of a transform
//! chain. Beyond being a [`Writer`], a terminator knows when to stop
//! driving the command stream early -- once every command the caller
//! actually asked for has been mutated, there is no reason to replay the
//! rest of the capture.

pub mod api_aware;
pub mod early;
pub mod vulkan;

use std::collections::HashSet;

use crate::command::{CmdId, SubcommandIndex};
use crate::writer::Writer;

/// A stop condition: either a whole command, or -- for APIs with
/// command-buffer recording, where one `CmdId` (the submit) can contain
/// many independently addressable subcommands -- one specific subcommand
/// within it (spec.md §4.7, scenario Sc1).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum StopPoint {
    Command(CmdId),
    Subcommand(CmdId, SubcommandIndex),
}

/// A `Writer` that also tracks a set of pending [`StopPoint`]s and reports
/// when they have all been reached, so the driver loop can stop early
/// (spec.md §4.7: "never mutate past the last command the caller needs").
pub trait Terminator: Writer {
    fn add_pending(&mut self, point: StopPoint);

    /// True once every point added via `add_pending` has been observed.
    /// A terminator with an empty pending set is never done on its own --
    /// the driver falls back to end-of-stream.
    fn is_done(&self) -> bool;

    fn pending(&self) -> &HashSet<StopPoint>;
}
