use crate::descriptor::CpuDescriptor;
use crate::resource::state::ResourceState;
use crate::resource::texture::TextureFormat;

/// One presentable back buffer of a [`SwapChain`].
#[derive(Debug)]
struct BackBuffer {
    rtv: CpuDescriptor,
    state: ResourceState,
}

/// The presentable surface, tracked as a registry resource so passes can
/// declare writes against it like any other render target.
///
/// Each back buffer carries its own render-target view and its own state;
/// [`SwapChain::state`]/[`SwapChain::set_state`] operate on the back buffer
/// currently being recorded to. [`SwapChain::present`] rotates to the next
/// back buffer round-robin; the actual queue present call is the backend's.
#[derive(Debug)]
pub struct SwapChain {
    width: u32,
    height: u32,
    format: TextureFormat,
    back_buffers: Vec<BackBuffer>,
    frame_index: usize,
}

impl SwapChain {
    /// Create a swap chain with one render-target view per back buffer.
    /// `back_buffer_views` also decides the back buffer count, which in turn
    /// is the frame-in-flight count of the command set manager.
    pub fn new(
        width: u32,
        height: u32,
        format: TextureFormat,
        back_buffer_views: Vec<CpuDescriptor>,
    ) -> Self {
        assert!(
            !back_buffer_views.is_empty(),
            "swap chain needs at least one back buffer"
        );
        Self {
            width,
            height,
            format,
            back_buffers: back_buffer_views
                .into_iter()
                .map(|rtv| BackBuffer {
                    rtv,
                    state: ResourceState::Common,
                })
                .collect(),
            frame_index: 0,
        }
    }

    /// Get the surface width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the surface height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the surface format.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Get the number of back buffers.
    pub fn back_buffer_count(&self) -> usize {
        self.back_buffers.len()
    }

    /// Get the index of the back buffer currently being recorded to.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Get the render-target view of the current back buffer.
    pub fn current_back_buffer_view(&self) -> CpuDescriptor {
        self.back_buffers[self.frame_index].rtv
    }

    /// Get the state of the current back buffer.
    pub fn state(&self) -> ResourceState {
        self.back_buffers[self.frame_index].state
    }

    /// Update the tracked state of the current back buffer.
    pub fn set_state(&mut self, state: ResourceState) {
        self.back_buffers[self.frame_index].state = state;
    }

    /// Rotate to the next back buffer. Returns the new frame index. The
    /// caller is expected to have transitioned the outgoing back buffer to
    /// [`ResourceState::Present`] through the graph before submitting.
    pub fn present(&mut self) -> usize {
        self.frame_index = (self.frame_index + 1) % self.back_buffers.len();
        self.frame_index
    }
}
