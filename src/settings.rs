//! Deployment-time capacities of the engine core.
//!
//! Heap sizes and the frame-in-flight count are static configuration made by
//! the owning subsystem; nothing in the core grows dynamically. Exceeding a
//! capacity at runtime is treated as a fatal configuration error.

/// Capacities used by [`initialize`](crate::init::initialize).
#[derive(Debug, Clone)]
pub struct CoreSettings {
    /// Number of command set slots recycled round-robin. Matches the swap
    /// chain's back buffer count.
    pub frames_in_flight: usize,
    /// Capacity of the shader-visible CBV/SRV/UAV descriptor heap.
    pub srv_heap_size: u32,
    /// Capacity of the render-target view heap.
    pub rtv_heap_size: u32,
    /// Capacity of the depth-stencil view heap.
    pub dsv_heap_size: u32,
    /// Capacity of the sampler heap.
    pub sampler_heap_size: u32,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            frames_in_flight: 2,
            srv_heap_size: 256,
            rtv_heap_size: 64,
            dsv_heap_size: 16,
            sampler_heap_size: 16,
        }
    }
}

/// Builds a [`CoreSettings`] struct.
#[derive(Debug, Default)]
pub struct CoreSettingsBuilder {
    inner: CoreSettings,
}

impl CoreSettingsBuilder {
    /// Create a builder holding the default capacities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of frame-in-flight slots.
    pub fn frames_in_flight(mut self, count: usize) -> Self {
        self.inner.frames_in_flight = count;
        self
    }

    /// Set the shader-visible CBV/SRV/UAV heap capacity.
    pub fn srv_heap_size(mut self, size: u32) -> Self {
        self.inner.srv_heap_size = size;
        self
    }

    /// Set the render-target view heap capacity.
    pub fn rtv_heap_size(mut self, size: u32) -> Self {
        self.inner.rtv_heap_size = size;
        self
    }

    /// Set the depth-stencil view heap capacity.
    pub fn dsv_heap_size(mut self, size: u32) -> Self {
        self.inner.dsv_heap_size = size;
        self
    }

    /// Set the sampler heap capacity.
    pub fn sampler_heap_size(mut self, size: u32) -> Self {
        self.inner.sampler_heap_size = size;
        self
    }

    /// Obtain the settings.
    pub fn build(self) -> CoreSettings {
        self.inner
    }
}
