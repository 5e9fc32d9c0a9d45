use deimos::prelude::*;

mod framework;

#[test]
fn handle_valid_until_erased() {
    let core = framework::make_core();
    let handle = framework::add_upload_buffer(&core, 16);
    assert!(core.store.with_unique_lock(|registry| registry.is_valid(handle)));
    assert!(core.store.with_unique_lock(|registry| registry.contains(handle)));

    let resource = core.eraser.erase_resource(handle);
    assert_eq!(resource.kind(), ResourceKind::Buffer);
    assert!(!core.store.with_unique_lock(|registry| registry.is_valid(handle)));
}

#[test]
fn recycled_slot_does_not_alias_old_handle() {
    let core = framework::make_core();
    let first = framework::add_upload_buffer(&core, 16);
    core.eraser.erase_resource(first);

    // The erased slot is recycled, but under a new generation.
    let second = framework::add_upload_buffer(&core, 16);
    assert_eq!(first.index(), second.index());
    assert_ne!(first.generation(), second.generation());
    assert_ne!(first, second);

    assert!(!core.store.with_unique_lock(|registry| registry.is_valid(first)));
    assert!(core.store.with_unique_lock(|registry| registry.is_valid(second)));
}

#[test]
#[should_panic(expected = "invalid resource handle")]
fn double_erase_panics() {
    let core = framework::make_core();
    let handle = framework::add_upload_buffer(&core, 16);
    core.eraser.erase_resource(handle);
    core.eraser.erase_resource(handle);
}

#[test]
fn registry_len_tracks_live_resources() {
    let core = framework::make_core();
    assert!(core.store.with_unique_lock(|registry| registry.is_empty()));

    let a = framework::add_upload_buffer(&core, 4);
    let b = framework::add_upload_buffer(&core, 4);
    assert_eq!(core.store.with_unique_lock(|registry| registry.len()), 2);

    core.eraser.erase_resource(a);
    assert_eq!(core.store.with_unique_lock(|registry| registry.len()), 1);
    core.eraser.erase_resource(b);
    assert!(core.store.with_unique_lock(|registry| registry.is_empty()));
}

#[test]
fn erased_resource_returns_ownership() {
    let core = framework::make_core();
    let handle = core.adder.add_resource(Resource::Buffer(
        Buffer::new(8, BufferHeap::Upload),
    ));
    let resource = core.eraser.erase_resource(handle);
    let buffer = resource.as_buffer().unwrap();
    assert_eq!(buffer.size(), 8);
    assert_eq!(buffer.heap(), BufferHeap::Upload);
}
