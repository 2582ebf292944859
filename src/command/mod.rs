//! Typed commands with read/write memory observations and mutation over a
//! [`State`](crate::state::State) (spec.md §4.1, component C1).
//!
//! Mirrors the split the teacher crate draws between a command buffer's
//! recording surface (`command_buffer::traits::IncompleteCmdBuffer`) and its
//! submitted form: here, every recorded API call is a [`Cmd`] trait object,
//! dispatched on its concrete variant exactly once, either to update state
//! during a forward pass or to additionally emit replay opcodes.

pub mod extras;
pub mod id;
pub mod observation;

pub use id::{CmdId, SubcommandIndex, NO_ID};

use std::any::Any;
use std::fmt::Debug;

use crate::error::Error;
use crate::state::State;

/// Identifies the owning API of a command. `None` marks framework-internal
/// commands (`noop`, end-of-stream) that carry no API-specific behaviour.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ApiId(pub &'static str);

impl ApiId {
    pub const VULKAN: ApiId = ApiId("vulkan");
}

/// Source-thread identifier, used to detect multi-queue/multi-thread APIs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ThreadId(pub u64);

/// Sink for replay opcodes. A real implementation lives in the replay VM
/// (out of scope, spec.md §1 Non-goals); the core only needs the contract
/// so that `mutate` can optionally emit through it.
pub trait ReplayBuilder: Debug {
    /// Append one replay opcode's encoded bytes.
    fn emit(&mut self, opcode: &[u8]);
}

/// A recorded or synthesized API call.
///
/// `mutate` MUST be idempotent with respect to the `Observations` attached
/// as extras: reads are applied to the state's memory pool before the
/// command examines any pointer, writes after (spec.md §4.1).
pub trait Cmd: Debug {
    /// Apply this command's effect to `state`. When `builder` is `Some`,
    /// also emit the equivalent replay opcode(s).
    fn mutate(&self, state: &mut State, builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error>;

    /// The API that owns this command, or `None` for framework-internal
    /// commands.
    fn api(&self) -> Option<ApiId>;

    /// The thread that recorded this command.
    fn thread(&self) -> ThreadId;

    /// Typed side-channel items (most importantly, `Observations`).
    fn extras(&self) -> &extras::Extras;

    /// Mutable access to the side-channel items.
    fn extras_mut(&mut self) -> &mut extras::Extras;

    /// Return a new synthesized command equivalent to `self` with its
    /// payload replaced by `data`. Used by the shader-edit path: editing a
    /// shader module's SPIR-V does not change *which* command created it,
    /// only the bytes it wrote.
    fn replace(&self, data: Vec<u8>) -> Box<dyn Cmd>;

    /// Short, stable name for logging (e.g. `"vkCreateImage"`).
    fn name(&self) -> &'static str;

    /// Downcast support for the behaviour provider (C10), which classifies
    /// reads/writes/modifies per concrete command type rather than through
    /// `mutate` (DESIGN.md, "Behaviour provider vs. mutate").
    fn as_any(&self) -> &dyn Any;
}

/// A boxed, type-erased command, as stored in a command list.
pub type BoxedCmd = Box<dyn Cmd>;

/// A no-op framework command. Used as a placeholder payload and as the
/// trailing end-of-stream marker some terminators must always forward.
#[derive(Debug, Clone, Default)]
pub struct Noop {
    extras: extras::Extras,
}

impl Noop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cmd for Noop {
    fn mutate(&self, _state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        Ok(())
    }

    fn api(&self) -> Option<ApiId> {
        None
    }

    fn thread(&self) -> ThreadId {
        ThreadId::default()
    }

    fn extras(&self) -> &extras::Extras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut extras::Extras {
        &mut self.extras
    }

    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "noop"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The end-of-stream marker. Some terminators (see
/// [`EarlyTerminator`](crate::terminator::early::EarlyTerminator)) always
/// forward this command so that transforms downstream get their `flush`
/// driven by a real stream element rather than only the driver's explicit
/// flush call.
#[derive(Debug, Clone, Default)]
pub struct EndOfStream {
    extras: extras::Extras,
}

impl EndOfStream {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cmd for EndOfStream {
    fn mutate(&self, _state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        Ok(())
    }

    fn api(&self) -> Option<ApiId> {
        None
    }

    fn thread(&self) -> ThreadId {
        ThreadId::default()
    }

    fn extras(&self) -> &extras::Extras {
        &self.extras
    }

    fn extras_mut(&mut self) -> &mut extras::Extras {
        &mut self.extras
    }

    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "eos"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
