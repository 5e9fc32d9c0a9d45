//! The token-gated read/write path and the add/erase capabilities.

use crate::registry::handle::ResourceHandle;
use crate::registry::token::ResourceAccessToken;
use crate::registry::{ResourceRegistry, ResourceStore};
use crate::resource::state::ResourceState;
use crate::resource::Resource;

/// The read/write access path used while the graph executes.
///
/// All accesses run inside [`Self::with_lock`], which serializes pass
/// execution against scene code adding or erasing resources on other threads.
/// Within the scope, every lookup requires an access token; presenting a
/// token that does not permit the handle is a programming error and panics.
#[derive(Clone)]
pub struct ResourceManager {
    store: ResourceStore,
}

impl ResourceManager {
    /// Create a manager over a shared store.
    pub fn new(store: &ResourceStore) -> Self {
        Self {
            store: store.clone(),
        }
    }

    /// Run `f` with a locked [`ResourceAccess`] view. The lock is released
    /// when `f` returns, including on early return or panic.
    pub fn with_lock<F: FnOnce(ResourceAccess<'_>) -> R, R>(&self, f: F) -> R {
        self.store.with_unique_lock(|registry| {
            f(ResourceAccess {
                registry,
            })
        })
    }
}

/// Locked view over the registry, only obtainable through
/// [`ResourceManager::with_lock`].
pub struct ResourceAccess<'a> {
    registry: &'a mut ResourceRegistry,
}

impl ResourceAccess<'_> {
    /// Get a resource for reading. Panics unless `token` explicitly permits
    /// `handle` and the handle is still valid.
    pub fn read_resource(&self, handle: ResourceHandle, token: &ResourceAccessToken) -> &Resource {
        assert!(
            token.permits(handle),
            "read access to {handle:?} was not declared by this pass"
        );
        self.registry
            .get(handle)
            .expect("read through stale resource handle")
    }

    /// Get a resource for writing. Panics unless `token` explicitly permits
    /// `handle` and the handle is still valid.
    pub fn write_resource(
        &mut self,
        handle: ResourceHandle,
        token: &ResourceAccessToken,
    ) -> &mut Resource {
        assert!(
            token.permits(handle),
            "write access to {handle:?} was not declared by this pass"
        );
        self.registry
            .get_mut(handle)
            .expect("write through stale resource handle")
    }

    /// Defensive check, does not require a token.
    pub fn contains(&self, handle: ResourceHandle) -> bool {
        self.registry.contains(handle)
    }

    // State queries used by the graph executor when materializing
    // transitions. Not part of the token-gated surface: the executor tracks
    // states for handles it is about to hand to a pass anyway.
    pub(crate) fn state_of(&self, handle: ResourceHandle) -> Option<ResourceState> {
        self.registry.get(handle).map(|resource| resource.state())
    }

    pub(crate) fn set_state(&mut self, handle: ResourceHandle, state: ResourceState) {
        if let Some(resource) = self.registry.get_mut(handle) {
            resource.set_state(state);
        }
    }
}

/// Add-only capability over a [`ResourceStore`].
///
/// Scene-assembly code holds one of these instead of a full manager, so it
/// cannot bypass the per-frame access token discipline used during rendering.
#[derive(Clone)]
pub struct ResourceAdder {
    store: ResourceStore,
}

impl ResourceAdder {
    /// Create an adder over a shared store.
    pub fn new(store: &ResourceStore) -> Self {
        Self {
            store: store.clone(),
        }
    }

    /// Take ownership of `resource` and return a handle valid until erased.
    pub fn add_resource(&self, resource: Resource) -> ResourceHandle {
        self.store.with_unique_lock(|registry| {
            let handle = registry.add(resource);
            #[cfg(feature = "log-objects")]
            trace!("Added {:?} as {handle:?}", registry.get(handle).unwrap().kind());
            handle
        })
    }
}

/// Erase-only capability over a [`ResourceStore`].
#[derive(Clone)]
pub struct ResourceEraser {
    store: ResourceStore,
}

impl ResourceEraser {
    /// Create an eraser over a shared store.
    pub fn new(store: &ResourceStore) -> Self {
        Self {
            store: store.clone(),
        }
    }

    /// Release the resource behind `handle` and invalidate the handle. The
    /// erased resource is returned so its descriptor slots can be freed.
    /// Erasing through an invalid handle panics.
    pub fn erase_resource(&self, handle: ResourceHandle) -> Resource {
        self.store.with_unique_lock(|registry| {
            #[cfg(feature = "log-objects")]
            trace!("Erasing {handle:?}");
            registry.erase(handle)
        })
    }
}
