//! Resource ownership and access control.
//!
//! The [`ResourceRegistry`] owns every [`Resource`] in the system and hands out
//! generational [`ResourceHandle`]s for them. The registry itself does no
//! locking; all shared access goes through a [`ResourceStore`], which wraps the
//! registry in a mutex and exposes a lock-scope closure. Three capability
//! objects are built on top of the store:
//!
//! - [`ResourceAdder`](crate::registry::manager::ResourceAdder) can only add resources,
//! - [`ResourceEraser`](crate::registry::manager::ResourceEraser) can only erase them,
//! - [`ResourceManager`](crate::registry::manager::ResourceManager) is the read/write path used
//!   during rendering, gated by per-pass [`ResourceAccessToken`](crate::registry::token::ResourceAccessToken)s.
//!
//! Code that assembles scenes holds an adder/eraser and cannot bypass the
//! per-frame access token discipline; pass code holds a manager and cannot
//! create or destroy resources mid-frame.

use std::sync::{Arc, Mutex};

use crate::registry::handle::ResourceHandle;
use crate::resource::Resource;

pub mod handle;
pub mod manager;
pub mod token;

struct Slot {
    generation: u32,
    resource: Option<Resource>,
}

/// Container owning all registered resources, indexed by generational handles.
///
/// Erasing a resource bumps the slot's generation, so stale handles for a
/// recycled slot fail every validity check instead of silently aliasing the
/// new occupant.
#[derive(Default)]
pub struct ResourceRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a resource and return a handle for it.
    /// Amortized O(1): erased slots are recycled before the slot list grows.
    pub fn add(&mut self, resource: Resource) -> ResourceHandle {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.resource = Some(resource);
                ResourceHandle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    resource: Some(resource),
                });
                ResourceHandle::new(index, 0)
            }
        }
    }

    /// Release ownership of the resource behind `handle` and invalidate the
    /// handle. The erased resource is returned so the caller can release any
    /// descriptor slots it owns. Erasing through an already invalid handle is
    /// a programming error.
    pub fn erase(&mut self, handle: ResourceHandle) -> Resource {
        assert!(
            self.is_valid(handle),
            "erase through invalid resource handle {handle:?}"
        );
        let slot = &mut self.slots[handle.index() as usize];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index());
        // is_valid above guarantees the slot is occupied.
        slot.resource.take().unwrap()
    }

    /// True if `handle` currently refers to a live resource.
    pub fn is_valid(&self, handle: ResourceHandle) -> bool {
        self.slots
            .get(handle.index() as usize)
            .map(|slot| slot.generation == handle.generation() && slot.resource.is_some())
            .unwrap_or(false)
    }

    /// Alias for [`Self::is_valid`] under the name scene code tends to use.
    pub fn contains(&self, handle: ResourceHandle) -> bool {
        self.is_valid(handle)
    }

    /// Number of live resources.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// True if no resources are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn get(&self, handle: ResourceHandle) -> Option<&Resource> {
        if !self.is_valid(handle) {
            return None;
        }
        self.slots[handle.index() as usize].resource.as_ref()
    }

    pub(crate) fn get_mut(&mut self, handle: ResourceHandle) -> Option<&mut Resource> {
        if !self.is_valid(handle) {
            return None;
        }
        self.slots[handle.index() as usize].resource.as_mut()
    }
}

/// Shared, lock-guarded access point to a [`ResourceRegistry`].
///
/// Cloning a store is cheap and yields another reference to the same
/// registry. All mutation and lookup runs inside [`Self::with_unique_lock`];
/// the lock is released when the closure returns, including on early return
/// or panic.
#[derive(Clone, Default)]
pub struct ResourceStore {
    inner: Arc<Mutex<ResourceRegistry>>,
}

impl ResourceStore {
    /// Create a store over an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to the registry.
    pub fn with_unique_lock<F: FnOnce(&mut ResourceRegistry) -> R, R>(&self, f: F) -> R {
        let mut registry = self.inner.lock().unwrap();
        f(&mut registry)
    }
}
