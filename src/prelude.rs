//! Common imports for crates consuming this one, mirroring the flat
//! re-export surface the teacher crate offers through its own `prelude`.

pub use crate::command::{ApiId, BoxedCmd, Cmd, CmdId, EndOfStream, Noop, ReplayBuilder, SubcommandIndex, ThreadId};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::Error;
pub use crate::graph::{Addr, AddressMap, AtomBehaviour, BehaviourProvider, Dce, DependencyGraph, ObjectKind, StateKey};
pub use crate::state::table::Handle;
pub use crate::state::State;
pub use crate::terminator::{StopPoint, Terminator};
pub use crate::transform::chain::Chain;
pub use crate::transform::Transform;
pub use crate::writer::{MutatingWriter, Writer};
