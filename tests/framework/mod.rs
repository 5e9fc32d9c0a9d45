#![allow(dead_code)]

use deimos::prelude::*;

/// Creates a render core with test-friendly capacities, ready for automated
/// tests.
pub fn make_core() -> RenderCore {
    let _ = pretty_env_logger::try_init();
    let settings = CoreSettingsBuilder::new()
        .frames_in_flight(2)
        .srv_heap_size(64)
        .rtv_heap_size(16)
        .dsv_heap_size(8)
        .build();
    initialize(&settings).expect("Can initialize render core.")
}

/// Register a CPU-mappable buffer of `size` bytes and return its handle.
pub fn add_upload_buffer(core: &RenderCore, size: u64) -> ResourceHandle {
    core.adder
        .add_resource(Resource::Buffer(Buffer::new(size, BufferHeap::Upload)))
}

/// Register a render-target texture with an RTV slot from the core's heap.
pub fn add_render_target(core: &mut RenderCore, width: u32, height: u32) -> ResourceHandle {
    let rtv = core.rtv_allocator.allocate_cpu();
    core.adder.add_resource(Resource::Texture2D(
        Texture2D::new(width, height, TextureFormat::Rgba8Unorm).with_rtv(rtv),
    ))
}

/// Collect only the state transitions out of a recorded command stream.
pub fn transitions(commands: &[Command]) -> Vec<(ResourceHandle, ResourceState, ResourceState)> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::Transition {
                resource,
                before,
                after,
            } => Some((*resource, *before, *after)),
            _ => None,
        })
        .collect()
}
