use deimos::prelude::*;

#[test]
fn upload_buffer_round_trips_data() {
    let mut buffer = Buffer::new(16, BufferHeap::Upload);
    buffer.update_data(&[1, 2, 3, 4], 4).unwrap();
    let contents = buffer.contents().unwrap();
    assert_eq!(&contents[4..8], &[1, 2, 3, 4]);
}

#[test]
fn buffer_write_out_of_range_fails() {
    let mut buffer = Buffer::new(4, BufferHeap::Upload);
    let err = buffer.update_data(&[0; 8], 0).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::BufferWriteOutOfRange)
    ));
    let err = buffer.update_data(&[0; 2], 3).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::BufferWriteOutOfRange)
    ));
}

#[test]
fn device_local_buffer_is_not_mappable() {
    let mut buffer = Buffer::new(4, BufferHeap::DeviceLocal);
    let err = buffer.update_data(&[0; 4], 0).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::UnmappableBuffer)
    ));
    assert!(buffer.contents().is_err());
}

#[test]
fn resource_kind_matches_variant() {
    let buffer = Resource::Buffer(Buffer::new(4, BufferHeap::Upload));
    let structured = Resource::StructuredBuffer(StructuredBuffer::new(16, 128));
    let texture = Resource::Texture2D(Texture2D::new(64, 64, TextureFormat::Rgba8Unorm));

    assert_eq!(buffer.kind(), ResourceKind::Buffer);
    assert_eq!(structured.kind(), ResourceKind::StructuredBuffer);
    assert_eq!(texture.kind(), ResourceKind::Texture2D);

    assert!(buffer.as_buffer().is_some());
    assert!(buffer.as_texture().is_none());
    assert!(structured.as_structured_buffer().is_some());
    assert!(texture.as_texture().is_some());
}

#[test]
fn structured_buffer_reports_geometry() {
    let buffer = StructuredBuffer::new(32, 100);
    assert_eq!(buffer.element_size(), 32);
    assert_eq!(buffer.element_count(), 100);
    assert_eq!(buffer.size(), 3200);
    assert!(!buffer.is_uav_enabled());
}

#[test]
fn resource_state_tracking() {
    let mut texture = Resource::Texture2D(Texture2D::new(64, 64, TextureFormat::Rgba8Unorm));
    assert_eq!(texture.state(), ResourceState::Common);
    texture.set_state(ResourceState::RenderTarget);
    assert_eq!(texture.state(), ResourceState::RenderTarget);
}

#[test]
#[should_panic(expected = "non-depth format")]
fn depth_view_on_color_format_panics() {
    let mut allocator = DescriptorHeapAllocator::new(DescriptorHeap::new(
        DescriptorHeapKind::DepthStencil,
        4,
        false,
    ));
    let dsv = allocator.allocate_cpu();
    let _texture = Texture2D::new(64, 64, TextureFormat::Rgba8Unorm).with_dsv(dsv);
}

#[test]
fn swapchain_rotates_back_buffers() {
    let mut allocator = DescriptorHeapAllocator::new(DescriptorHeap::new(
        DescriptorHeapKind::RenderTarget,
        4,
        false,
    ));
    let views: Vec<_> = (0..3).map(|_| allocator.allocate_cpu()).collect();
    let mut swapchain = SwapChain::new(1280, 720, TextureFormat::Bgra8Unorm, views.clone());

    assert_eq!(swapchain.back_buffer_count(), 3);
    assert_eq!(swapchain.frame_index(), 0);
    assert_eq!(swapchain.current_back_buffer_view(), views[0]);

    // State is tracked per back buffer.
    swapchain.set_state(ResourceState::Present);
    assert_eq!(swapchain.present(), 1);
    assert_eq!(swapchain.current_back_buffer_view(), views[1]);
    assert_eq!(swapchain.state(), ResourceState::Common);

    swapchain.present();
    assert_eq!(swapchain.present(), 0);
    assert_eq!(swapchain.state(), ResourceState::Present);
}
