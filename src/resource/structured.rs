use crate::descriptor::DescriptorSlot;
use crate::resource::state::ResourceState;

/// A GPU buffer of `element_count` elements of `element_size` bytes each,
/// readable from shaders through an SRV slot and optionally writable through
/// a UAV slot.
#[derive(Debug)]
pub struct StructuredBuffer {
    element_size: u32,
    element_count: u32,
    srv: Option<DescriptorSlot>,
    uav: Option<DescriptorSlot>,
    state: ResourceState,
}

impl StructuredBuffer {
    /// Create a structured buffer description.
    pub fn new(element_size: u32, element_count: u32) -> Self {
        Self {
            element_size,
            element_count,
            srv: None,
            uav: None,
            state: ResourceState::Common,
        }
    }

    /// Attach the shader-resource view slot.
    pub fn with_srv(mut self, srv: DescriptorSlot) -> Self {
        self.srv = Some(srv);
        self
    }

    /// Attach an unordered-access view slot, enabling shader writes.
    pub fn with_uav(mut self, uav: DescriptorSlot) -> Self {
        self.uav = Some(uav);
        self
    }

    /// Get the size of each element.
    pub fn element_size(&self) -> u32 {
        self.element_size
    }

    /// Get the number of elements.
    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    /// Get the total size in bytes.
    pub fn size(&self) -> u64 {
        self.element_size as u64 * self.element_count as u64
    }

    /// Get the shader-resource view slot, if any.
    pub fn srv(&self) -> Option<&DescriptorSlot> {
        self.srv.as_ref()
    }

    /// Get the unordered-access view slot, if any.
    pub fn uav(&self) -> Option<&DescriptorSlot> {
        self.uav.as_ref()
    }

    /// Whether shader writes are possible.
    pub fn is_uav_enabled(&self) -> bool {
        self.uav.is_some()
    }

    /// Get the current GPU state.
    pub fn state(&self) -> ResourceState {
        self.state
    }

    /// Update the tracked GPU state.
    pub fn set_state(&mut self, state: ResourceState) {
        self.state = state;
    }
}
