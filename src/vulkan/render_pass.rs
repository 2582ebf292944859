//! Render-pass load/store-op dependency rules (spec.md §4.10, scenario
//! Sc4): an attachment with `loadOp = Load` depends on whatever is already
//! bound there; `loadOp = Clear`/`DontCare` overwrites it outright. An
//! attachment with `storeOp = Store` produces a new value worth keeping;
//! `storeOp = DontCare` produces nothing the dependency graph needs to
//! track.

use crate::state::command_buffer::{BindingRef, DeferredBehaviour};
use crate::state::{LoadOp, StoreOp};

/// The deferred behaviour `CmdBeginRenderPass` should queue for one
/// attachment, given its declared load op.
pub fn begin_behaviour(load_op: LoadOp, binding: BindingRef) -> Option<DeferredBehaviour> {
    match load_op {
        LoadOp::Load => Some(DeferredBehaviour::ReadBindings(vec![binding])),
        LoadOp::Clear | LoadOp::DontCare => None,
    }
}

/// The deferred behaviour `CmdEndRenderPass` should queue for one
/// attachment, given its declared store op.
pub fn end_behaviour(store_op: StoreOp, binding: BindingRef) -> Option<DeferredBehaviour> {
    match store_op {
        StoreOp::Store => Some(DeferredBehaviour::WriteBindings(vec![binding])),
        StoreOp::DontCare => None,
    }
}
