use std::collections::HashSet;

use crate::registry::handle::ResourceHandle;

/// Per-pass, per-frame capability restricting which resources may be accessed.
///
/// Tokens are minted by the render graph executor from a pass's declared
/// read/write sets right before the pass executes, and discarded when it
/// returns. No other code path can mint or widen a token, which is what makes
/// the declarations load-bearing rather than documentation: an access the
/// pass never declared has no token that permits it.
#[derive(Debug, Default, Clone)]
pub struct ResourceAccessToken {
    permitted: HashSet<ResourceHandle>,
}

impl ResourceAccessToken {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add `handle` to the set of permitted resources.
    pub(crate) fn permit(&mut self, handle: ResourceHandle) {
        self.permitted.insert(handle);
    }

    /// True if this token permits access to `handle`.
    pub fn permits(&self, handle: ResourceHandle) -> bool {
        self.permitted.contains(&handle)
    }

    /// Iterate over the permitted handles.
    pub fn handles(&self) -> impl Iterator<Item = ResourceHandle> + '_ {
        self.permitted.iter().copied()
    }

    /// Number of permitted handles.
    pub fn len(&self) -> usize {
        self.permitted.len()
    }

    /// True if the token permits nothing.
    pub fn is_empty(&self) -> bool {
        self.permitted.is_empty()
    }
}
