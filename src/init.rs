//! Convenience entry point that assembles the engine core.

use anyhow::Result;

use crate::command::manager::CommandSetManager;
use crate::descriptor::allocator::DescriptorHeapAllocator;
use crate::descriptor::{DescriptorHeap, DescriptorHeapKind};
use crate::registry::manager::{ResourceAdder, ResourceEraser, ResourceManager};
use crate::registry::ResourceStore;
use crate::settings::CoreSettings;

/// Everything the owning application needs to drive frames: the shared
/// registry with its three capability views, one descriptor heap allocator
/// per heap kind, and the command set manager.
pub struct RenderCore {
    /// The shared resource store. Mostly useful for building additional
    /// capability views.
    pub store: ResourceStore,
    /// Token-gated read/write path used during graph execution.
    pub resources: ResourceManager,
    /// Add-only capability for scene-assembly code.
    pub adder: ResourceAdder,
    /// Erase-only capability for scene-assembly code.
    pub eraser: ResourceEraser,
    /// Shader-visible CBV/SRV/UAV slot allocator.
    pub srv_allocator: DescriptorHeapAllocator,
    /// Render-target view slot allocator.
    pub rtv_allocator: DescriptorHeapAllocator,
    /// Depth-stencil view slot allocator.
    pub dsv_allocator: DescriptorHeapAllocator,
    /// Sampler slot allocator.
    pub sampler_allocator: DescriptorHeapAllocator,
    /// One command set per frame-in-flight slot.
    pub command_sets: CommandSetManager,
}

/// Build a [`RenderCore`] from the given capacities.
pub fn initialize(settings: &CoreSettings) -> Result<RenderCore> {
    let store = ResourceStore::new();
    let resources = ResourceManager::new(&store);
    let adder = ResourceAdder::new(&store);
    let eraser = ResourceEraser::new(&store);

    let srv_allocator = DescriptorHeapAllocator::new(DescriptorHeap::new(
        DescriptorHeapKind::CbvSrvUav,
        settings.srv_heap_size,
        true,
    ));
    let rtv_allocator = DescriptorHeapAllocator::new(DescriptorHeap::new(
        DescriptorHeapKind::RenderTarget,
        settings.rtv_heap_size,
        false,
    ));
    let dsv_allocator = DescriptorHeapAllocator::new(DescriptorHeap::new(
        DescriptorHeapKind::DepthStencil,
        settings.dsv_heap_size,
        false,
    ));
    let sampler_allocator = DescriptorHeapAllocator::new(DescriptorHeap::new(
        DescriptorHeapKind::Sampler,
        settings.sampler_heap_size,
        true,
    ));

    let command_sets = CommandSetManager::new(settings.frames_in_flight);

    info!(
        "Initialized render core: {} frames in flight, {} SRV / {} RTV / {} DSV / {} sampler descriptors",
        settings.frames_in_flight,
        settings.srv_heap_size,
        settings.rtv_heap_size,
        settings.dsv_heap_size,
        settings.sampler_heap_size
    );

    Ok(RenderCore {
        store,
        resources,
        adder,
        eraser,
        srv_allocator,
        rtv_allocator,
        dsv_allocator,
        sampler_allocator,
        command_sets,
    })
}
