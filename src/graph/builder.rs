//! The declaration interface handed to pass setup callbacks.

use crate::registry::handle::ResourceHandle;
use crate::resource::state::ResourceState;

/// Whether a declaration is a read or a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AccessMode {
    Read,
    Write,
}

/// One recorded `(handle, mode, required state)` declaration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Declaration {
    pub handle: ResourceHandle,
    pub mode: AccessMode,
    pub state: ResourceState,
}

/// Records a pass's resource declarations during graph compilation.
///
/// The builder is append-only; the graph derives the dependency order and the
/// required state transitions from the recorded list, which is what lets a
/// pass touching a dozen resources stay a flat list of declarations instead
/// of hand-maintained synchronization code.
#[derive(Debug, Default)]
pub struct PassBuilder {
    pub(crate) declarations: Vec<Declaration>,
}

impl PassBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Declare that the pass reads `handle`, in the default shader-readable
    /// state.
    pub fn read(&mut self, handle: ResourceHandle) -> &mut Self {
        self.read_as(handle, ResourceState::ShaderResource)
    }

    /// Declare that the pass reads `handle` in an explicit state, e.g.
    /// [`ResourceState::CopySource`] for a copy source.
    pub fn read_as(&mut self, handle: ResourceHandle, state: ResourceState) -> &mut Self {
        debug_assert!(
            state.is_readable(),
            "read declared with non-readable state {state:?}"
        );
        self.declarations.push(Declaration {
            handle,
            mode: AccessMode::Read,
            state,
        });
        self
    }

    /// Declare that the pass writes `handle`, in the default render-target
    /// state.
    pub fn write(&mut self, handle: ResourceHandle) -> &mut Self {
        self.write_as(handle, ResourceState::RenderTarget)
    }

    /// Declare that the pass writes `handle` in an explicit state, e.g.
    /// [`ResourceState::DepthWrite`] for a depth target or
    /// [`ResourceState::CopyDest`] for a copy destination.
    pub fn write_as(&mut self, handle: ResourceHandle, state: ResourceState) -> &mut Self {
        self.declarations.push(Declaration {
            handle,
            mode: AccessMode::Write,
            state,
        });
        self
    }
}
