use static_assertions::assert_impl_all;

/// Opaque identifier for a resource slot in a [`ResourceRegistry`](crate::registry::ResourceRegistry).
///
/// A handle pairs a slot index with the generation the slot had when the
/// resource was added. Two handles compare equal iff they name the same slot
/// *and* the same generation, so a handle kept across an erase never matches
/// the slot's next occupant. A handle by itself grants no access, it is inert
/// data until presented together with a [`ResourceAccessToken`](crate::registry::token::ResourceAccessToken).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle {
    index: u32,
    generation: u32,
}

assert_impl_all!(ResourceHandle: Copy, Send, Sync);

impl ResourceHandle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
        }
    }

    /// Get the slot index this handle refers to.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Get the generation of the slot this handle was created for.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}
