//! Exposes the deimos error type

use std::sync::PoisonError;

use thiserror::Error;

use crate::graph::pass::PassId;

/// Error type that deimos can return.
///
/// Only conditions the owning frame driver can react to are surfaced through
/// this type. Invariant violations such as access token misuse, double frees
/// or stale handles are programming errors and panic instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A pass setup callback reported that its required inputs were not
    /// supplied this frame. The frame must not be executed.
    #[error("Setup failed for pass `{0}`.")]
    PassSetupFailed(PassId),
    /// A pass execute callback failed. Execution stops immediately and no
    /// partial frame may be submitted.
    #[error("Execution failed for pass `{0}`.")]
    PassExecuteFailed(PassId),
    /// The declared resource accesses cannot be linearized. Two passes each
    /// write a resource the other reads, which is impossible to resolve in an
    /// unambiguous way.
    #[error("Render graph contains cycle.")]
    GraphHasCycle,
    /// Node not found in graph. Generally this should not happen.
    #[error("Implementation error. Node not found. Please open an issue.")]
    NodeNotFound,
    /// Requested a CPU write on a buffer that is not CPU-mappable.
    #[error("Requested mappable buffer, but buffer does not have a memory map")]
    UnmappableBuffer,
    /// Buffer write does not fit the buffer.
    #[error("Buffer write is not a valid range in the buffer.")]
    BufferWriteOutOfRange,
    /// Poisoned mutex
    #[error("Poisoned mutex")]
    PoisonError,
    /// Uncategorized error.
    #[error("Uncategorized error: `{0}`")]
    Uncategorized(&'static str),
}

impl<T> From<PoisonError<T>> for Error {
    fn from(_: PoisonError<T>) -> Self {
        Error::PoisonError
    }
}
