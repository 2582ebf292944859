//! Exposes the crate's error type.

use thiserror::Error;

use crate::command::CmdId;

/// Error type returned by the transform pipeline, dependency graph and
/// terminator. See SPEC_FULL.md §7 for the propagation policy attached to
/// each variant.
#[derive(Error, Debug)]
pub enum Error {
    /// A command's `mutate` call failed. The corresponding behaviour is
    /// marked `aborted` and DCE treats it as writing nothing.
    #[error("mutation of command {0:?} failed: {1}")]
    Mutation(CmdId, anyhow::Error),
    /// An unrecoverable panic propagated out of `mutate` or a transform.
    #[error("Panic at atom {0:?}:{1}")]
    Panic(CmdId, String),
    /// A format decoder could not recognise the on-disk encoding.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    /// A capture references an API with no registered terminator.
    #[error("no terminator registered for API {0}")]
    TerminatorMissingApi(&'static str),
    /// A framebuffer/image query could not be satisfied.
    #[error("requested data is not available")]
    DataUnavailable,
    /// An RPC-facing failure, never recovered inside the core.
    #[error("service error ({kind}): {detail}")]
    Service {
        /// Coarse failure category, echoed back to the client.
        kind: &'static str,
        /// Human-readable detail.
        detail: String,
    },
    /// A requested handle does not exist in the state tree.
    #[error("unknown handle in state tree")]
    UnknownHandle,
    /// A handle was destroyed twice.
    #[error("double destroy of handle")]
    DoubleDestroy,
    /// Address interning or liveness propagation hit an inconsistent graph.
    #[error("dependency graph is inconsistent: {0}")]
    InconsistentGraph(&'static str),
    /// Node not found in the address graph. Should not happen.
    #[error("implementation error: address node not found")]
    NodeNotFound,
    /// Uncategorized error, used sparingly for conditions with no better home.
    #[error("{0}")]
    Uncategorized(&'static str),
}

impl From<std::sync::PoisonError<()>> for Error {
    fn from(_: std::sync::PoisonError<()>) -> Self {
        Error::Uncategorized("poisoned mutex")
    }
}
