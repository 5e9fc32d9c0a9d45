//! The GPU resource variants tracked by the registry.
//!
//! The set of resource kinds is fixed and known, so [`Resource`] is a closed
//! sum type with capability queries and exhaustive `match` instead of an open
//! class hierarchy with downcasts. Passes never own resources; they hold
//! [`ResourceHandle`](crate::registry::handle::ResourceHandle)s and go through the
//! [`ResourceManager`](crate::registry::manager::ResourceManager).

use crate::resource::buffer::Buffer;
use crate::resource::state::ResourceState;
use crate::resource::structured::StructuredBuffer;
use crate::resource::swapchain::SwapChain;
use crate::resource::texture::Texture2D;

pub mod buffer;
pub mod state;
pub mod structured;
pub mod swapchain;
pub mod texture;

/// Discriminant of a [`Resource`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Buffer,
    StructuredBuffer,
    Texture2D,
    SwapChain,
}

/// A GPU-visible object owned by the resource registry.
#[derive(Debug)]
pub enum Resource {
    Buffer(Buffer),
    StructuredBuffer(StructuredBuffer),
    Texture2D(Texture2D),
    SwapChain(SwapChain),
}

impl Resource {
    /// Get the variant discriminant.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Buffer(_) => ResourceKind::Buffer,
            Resource::StructuredBuffer(_) => ResourceKind::StructuredBuffer,
            Resource::Texture2D(_) => ResourceKind::Texture2D,
            Resource::SwapChain(_) => ResourceKind::SwapChain,
        }
    }

    /// Get the current GPU state. For a swap chain this is the state of the
    /// current back buffer.
    pub fn state(&self) -> ResourceState {
        match self {
            Resource::Buffer(buffer) => buffer.state(),
            Resource::StructuredBuffer(buffer) => buffer.state(),
            Resource::Texture2D(texture) => texture.state(),
            Resource::SwapChain(swapchain) => swapchain.state(),
        }
    }

    /// Update the tracked GPU state after a transition was recorded.
    pub fn set_state(&mut self, state: ResourceState) {
        match self {
            Resource::Buffer(buffer) => buffer.set_state(state),
            Resource::StructuredBuffer(buffer) => buffer.set_state(state),
            Resource::Texture2D(texture) => texture.set_state(state),
            Resource::SwapChain(swapchain) => swapchain.set_state(state),
        }
    }

    /// Get the variant as a buffer, if it is one.
    pub fn as_buffer(&self) -> Option<&Buffer> {
        match self {
            Resource::Buffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Get the variant as a mutable buffer, if it is one.
    pub fn as_buffer_mut(&mut self) -> Option<&mut Buffer> {
        match self {
            Resource::Buffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Get the variant as a structured buffer, if it is one.
    pub fn as_structured_buffer(&self) -> Option<&StructuredBuffer> {
        match self {
            Resource::StructuredBuffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Get the variant as a mutable structured buffer, if it is one.
    pub fn as_structured_buffer_mut(&mut self) -> Option<&mut StructuredBuffer> {
        match self {
            Resource::StructuredBuffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Get the variant as a texture, if it is one.
    pub fn as_texture(&self) -> Option<&Texture2D> {
        match self {
            Resource::Texture2D(texture) => Some(texture),
            _ => None,
        }
    }

    /// Get the variant as a mutable texture, if it is one.
    pub fn as_texture_mut(&mut self) -> Option<&mut Texture2D> {
        match self {
            Resource::Texture2D(texture) => Some(texture),
            _ => None,
        }
    }

    /// Get the variant as a swap chain, if it is one.
    pub fn as_swapchain(&self) -> Option<&SwapChain> {
        match self {
            Resource::SwapChain(swapchain) => Some(swapchain),
            _ => None,
        }
    }

    /// Get the variant as a mutable swap chain, if it is one.
    pub fn as_swapchain_mut(&mut self) -> Option<&mut SwapChain> {
        match self {
            Resource::SwapChain(swapchain) => Some(swapchain),
            _ => None,
        }
    }
}
