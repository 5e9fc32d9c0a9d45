pub use crate::command::manager::CommandSetManager;
pub use crate::command::{Command, CommandRecorder, CommandSet};
pub use crate::descriptor::allocator::DescriptorHeapAllocator;
pub use crate::descriptor::{CpuDescriptor, DescriptorHeap, DescriptorHeapKind, DescriptorSlot, GpuDescriptor};
pub use crate::error::Error;
pub use crate::graph::builder::PassBuilder;
pub use crate::graph::pass::{PassId, PassIdRegistry, RenderPass, RenderPassContext};
pub use crate::graph::render_graph::RenderGraph;
pub use crate::init::{initialize, RenderCore};
pub use crate::registry::handle::ResourceHandle;
pub use crate::registry::manager::{ResourceAccess, ResourceAdder, ResourceEraser, ResourceManager};
pub use crate::registry::token::ResourceAccessToken;
pub use crate::registry::{ResourceRegistry, ResourceStore};
pub use crate::resource::buffer::{Buffer, BufferHeap};
pub use crate::resource::state::ResourceState;
pub use crate::resource::structured::StructuredBuffer;
pub use crate::resource::swapchain::SwapChain;
pub use crate::resource::texture::{Texture2D, TextureFormat};
pub use crate::resource::{Resource, ResourceKind};
pub use crate::settings::{CoreSettings, CoreSettingsBuilder};
