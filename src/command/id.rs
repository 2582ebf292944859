//! Command identity: the dense per-capture [`CmdId`] and the nested
//! [`SubcommandIndex`] used to locate a point inside a recorded
//! command-buffer.

use std::fmt::{Display, Formatter};

/// Sentinel marking a synthesized command (from an [`Injector`](crate::transform::injector::Injector)
/// or a command-buffer rebuild). Not a valid index into the original capture.
pub const NO_ID: u64 = (1u64 << 63) - 1;

/// A 64-bit command identity. IDs preserve the original recording order for
/// non-synthesized commands; [`NO_ID`] marks everything synthesized.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CmdId(pub u64);

impl CmdId {
    /// The synthesized-command sentinel.
    pub const NO_ID: CmdId = CmdId(NO_ID);

    /// Build an id from a raw recording-order index.
    pub fn new(index: u64) -> Self {
        debug_assert_ne!(index, NO_ID, "recording order collided with the NoID sentinel");
        CmdId(index)
    }

    /// Whether this id refers to a real, recorded command.
    pub fn is_real(self) -> bool {
        self.0 != NO_ID
    }

    /// Whether this id marks a synthesized command.
    pub fn is_synthesized(self) -> bool {
        !self.is_real()
    }
}

impl Default for CmdId {
    /// Defaults to the synthesized sentinel, matching the framework's
    /// convention that a command built without an explicit id is assumed
    /// injected.
    fn default() -> Self {
        CmdId::NO_ID
    }
}

impl Display for CmdId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_synthesized() {
            write!(f, "NoID")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<u64> for CmdId {
    fn from(value: u64) -> Self {
        CmdId::new(value)
    }
}

/// A possibly multi-level index locating a point inside nested
/// command-buffer recordings, e.g. for Vulkan:
/// `[submit, commandBuffer, command, secondaryCb, subCommand]`.
///
/// SPEC_FULL.md fixes the two lengths the Vulkan plug-in ever produces:
/// 3 (`[submit, cb, cmd]`, stopping directly inside a primary buffer) and 5
/// (`[submit, cb, cmd, scb, sub]`, stopping inside a secondary buffer
/// executed via `CmdExecuteCommands`). A 4-long index would be ambiguous
/// (is the 4th level a secondary buffer index or a subcommand index?) and
/// no known API plug-in emits one; see spec.md's open questions.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct SubcommandIndex(pub Vec<usize>);

impl SubcommandIndex {
    /// A top-level index, not inside any command-buffer recording.
    pub fn root() -> Self {
        SubcommandIndex(Vec::new())
    }

    /// True when this index addresses something inside a recorded
    /// command-buffer (length > 1: submit index plus at least one level).
    pub fn is_nested(&self) -> bool {
        self.0.len() > 1
    }

    /// The submit index, if this index is nested.
    pub fn submit(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// The command-buffer index within the submit, if present.
    pub fn command_buffer(&self) -> Option<usize> {
        self.0.get(1).copied()
    }

    /// The recorded-command index within the command buffer, if present.
    pub fn command(&self) -> Option<usize> {
        self.0.get(2).copied()
    }

    /// The secondary command-buffer index, present only on 5-long indices.
    pub fn secondary_command_buffer(&self) -> Option<usize> {
        self.0.get(3).copied()
    }

    /// The subcommand index inside the secondary buffer, present only on
    /// 5-long indices.
    pub fn secondary_subcommand(&self) -> Option<usize> {
        self.0.get(4).copied()
    }
}

impl From<Vec<usize>> for SubcommandIndex {
    fn from(value: Vec<usize>) -> Self {
        SubcommandIndex(value)
    }
}
