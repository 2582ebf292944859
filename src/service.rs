//! The replay service surface (spec.md §6). A thin trait describing the
//! RPCs a transport (gRPC, a local IPC socket, whatever a given deployment
//! wires up) would expose; no transport is implemented here (Non-goal:
//! on-device wire protocol), only the shape the core offers it.

use crate::command::CmdId;
use crate::config::Config;
use crate::error::Error;
use crate::graph::Addr;
use crate::state::table::Handle;

/// One previously issued replay request, identified the way the caller
/// will ask about its progress or results later.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RequestId(pub u64);

/// What a `Get` request resolves to: the live value at some address, as of
/// wherever replay was asked to stop.
#[derive(Debug, Clone)]
pub struct ResourceData {
    pub handle: Handle,
    pub bytes: Vec<u8>,
}

/// The RPC surface a replay session exposes. Every method is synchronous
/// here (spec.md §5: "the core has no suspension points" -- a transport
/// wrapping this in an async runtime is the caller's concern, not the
/// core's).
pub trait ReplayService {
    /// Replay up to and including `stop_at`, applying `config` for the
    /// duration, and return the resource found at `address`.
    fn get(&mut self, stop_at: CmdId, address: Addr, config: &Config) -> Result<ResourceData, Error>;

    /// Replay the whole capture, cancellable via `cancel`
    /// (`std::sync::Arc<std::sync::atomic::AtomicBool>`, polled between
    /// commands -- no async runtime, matching the core's synchronous
    /// design).
    fn replay(&mut self, cancel: std::sync::Arc<std::sync::atomic::AtomicBool>, config: &Config) -> Result<(), Error>;

    /// Cancel a previously started request, if it is still running.
    fn cancel(&mut self, request: RequestId) -> Result<(), Error>;
}
