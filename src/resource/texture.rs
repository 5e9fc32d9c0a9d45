use crate::descriptor::{CpuDescriptor, DescriptorSlot};
use crate::resource::state::ResourceState;

/// Pixel format of a [`Texture2D`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    #[default]
    Rgba8Unorm,
    Bgra8Unorm,
    Rgba16Float,
    R32Float,
    D32Float,
    D24UnormS8Uint,
}

impl TextureFormat {
    /// Whether this format describes a depth (or depth/stencil) texture.
    pub fn is_depth(&self) -> bool {
        matches!(self, TextureFormat::D32Float | TextureFormat::D24UnormS8Uint)
    }
}

/// A two-dimensional GPU texture with the view slots it was given at
/// creation. Which views exist decides what the texture can be bound as:
/// an SRV for sampling, an RTV for color output, a DSV for depth output,
/// a UAV for shader writes.
#[derive(Debug)]
pub struct Texture2D {
    width: u32,
    height: u32,
    format: TextureFormat,
    srv: Option<DescriptorSlot>,
    uav: Option<DescriptorSlot>,
    rtv: Option<CpuDescriptor>,
    dsv: Option<CpuDescriptor>,
    state: ResourceState,
}

impl Texture2D {
    /// Create a texture description with no views attached.
    pub fn new(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            format,
            srv: None,
            uav: None,
            rtv: None,
            dsv: None,
            state: ResourceState::Common,
        }
    }

    /// Attach a shader-resource view slot.
    pub fn with_srv(mut self, srv: DescriptorSlot) -> Self {
        self.srv = Some(srv);
        self
    }

    /// Attach an unordered-access view slot.
    pub fn with_uav(mut self, uav: DescriptorSlot) -> Self {
        self.uav = Some(uav);
        self
    }

    /// Attach a render-target view. Render target heaps are CPU only.
    pub fn with_rtv(mut self, rtv: CpuDescriptor) -> Self {
        self.rtv = Some(rtv);
        self
    }

    /// Attach a depth-stencil view. Only meaningful for depth formats.
    pub fn with_dsv(mut self, dsv: CpuDescriptor) -> Self {
        assert!(
            self.format.is_depth(),
            "depth-stencil view on non-depth format {:?}",
            self.format
        );
        self.dsv = Some(dsv);
        self
    }

    /// Get the texture width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the texture height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the texture format.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Get the shader-resource view slot, if any.
    pub fn srv(&self) -> Option<&DescriptorSlot> {
        self.srv.as_ref()
    }

    /// Get the unordered-access view slot, if any.
    pub fn uav(&self) -> Option<&DescriptorSlot> {
        self.uav.as_ref()
    }

    /// Get the render-target view, if any.
    pub fn rtv(&self) -> Option<CpuDescriptor> {
        self.rtv
    }

    /// Get the depth-stencil view, if any.
    pub fn dsv(&self) -> Option<CpuDescriptor> {
        self.dsv
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
