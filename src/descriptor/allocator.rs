//! A fixed-capacity free-list allocator over a descriptor heap.

use crate::descriptor::{CpuDescriptor, DescriptorHeap, DescriptorSlot, GpuDescriptor};

/// Hands out descriptor slots from a [`DescriptorHeap`].
///
/// The free list starts out holding every index of the heap. Allocation pops
/// an index, freeing recomputes the index from the handle's offset against
/// the heap base and pushes it back. A slot index is never live twice;
/// exhaustion, double free and freeing a handle that belongs to a different
/// heap are programming errors and panic. Capacity is a configuration
/// decision of the owning subsystem, the allocator never grows.
///
/// Three allocation shapes exist depending on heap visibility: CPU only
/// ([`Self::allocate_cpu`]), GPU with its CPU index advancing in lockstep
/// ([`Self::allocate_gpu`]), and the CPU+GPU pair ([`Self::allocate`]).
#[derive(Debug)]
pub struct DescriptorHeapAllocator {
    heap: DescriptorHeap,
    free: Vec<u32>,
    live: Vec<bool>,
}

impl DescriptorHeapAllocator {
    /// Create an allocator owning `heap`, with all slots free.
    pub fn new(heap: DescriptorHeap) -> Self {
        let capacity = heap.capacity();
        Self {
            heap,
            // Popping from the back hands out index 0 first.
            free: (0..capacity).rev().collect(),
            live: vec![false; capacity as usize],
        }
    }

    /// Get the underlying heap.
    pub fn heap(&self) -> &DescriptorHeap {
        &self.heap
    }

    /// Number of slots still available.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    fn pop_index(&mut self) -> u32 {
        let index = self
            .free
            .pop()
            .expect("descriptor heap exhausted; heap capacity is a configuration decision");
        debug_assert!(!self.live[index as usize]);
        self.live[index as usize] = true;
        index
    }

    fn push_index(&mut self, index: u32) {
        assert!(
            self.live[index as usize],
            "double free of descriptor slot {index}"
        );
        self.live[index as usize] = false;
        self.free.push(index);
    }

    fn index_of_cpu(&self, handle: CpuDescriptor) -> u32 {
        let base = self.heap.base_cpu().ptr;
        let increment = self.heap.handle_increment();
        assert!(
            handle.ptr >= base && (handle.ptr - base) % increment == 0,
            "CPU descriptor handle does not belong to this heap"
        );
        let index = (handle.ptr - base) / increment;
        assert!(
            index < self.heap.capacity() as usize,
            "CPU descriptor handle does not belong to this heap"
        );
        index as u32
    }

    fn index_of_gpu(&self, handle: GpuDescriptor) -> u32 {
        let base = self
            .heap
            .base_gpu()
            .expect("GPU descriptor handle on a non shader visible heap")
            .ptr;
        let increment = self.heap.handle_increment() as u64;
        assert!(
            handle.ptr >= base && (handle.ptr - base) % increment == 0,
            "GPU descriptor handle does not belong to this heap"
        );
        let index = (handle.ptr - base) / increment;
        assert!(
            index < self.heap.capacity() as u64,
            "GPU descriptor handle does not belong to this heap"
        );
        index as u32
    }

    /// Allocate a CPU-only slot. Panics if the heap is exhausted.
    pub fn allocate_cpu(&mut self) -> CpuDescriptor {
        let index = self.pop_index();
        self.heap.cpu_at(index)
    }

    /// Allocate a GPU slot. The CPU side of the same index is consumed in
    /// lockstep and not handed out separately. Panics on non-shader-visible
    /// heaps or if the heap is exhausted.
    pub fn allocate_gpu(&mut self) -> GpuDescriptor {
        assert!(
            self.heap.is_shader_visible(),
            "GPU descriptor allocation on a non shader visible heap"
        );
        let index = self.pop_index();
        self.heap.gpu_at(index)
    }

    /// Allocate a CPU+GPU pair referring to the same slot index. Panics on
    /// non-shader-visible heaps or if the heap is exhausted.
    pub fn allocate(&mut self) -> DescriptorSlot {
        assert!(
            self.heap.is_shader_visible(),
            "GPU descriptor allocation on a non shader visible heap"
        );
        let index = self.pop_index();
        DescriptorSlot {
            cpu: self.heap.cpu_at(index),
            gpu: self.heap.gpu_at(index),
        }
    }

    /// Free a CPU-only slot. Double free or a foreign handle panics.
    pub fn free_cpu(&mut self, handle: CpuDescriptor) {
        let index = self.index_of_cpu(handle);
        self.push_index(index);
    }

    /// Free a GPU slot allocated with [`Self::allocate_gpu`].
    pub fn free_gpu(&mut self, handle: GpuDescriptor) {
        let index = self.index_of_gpu(handle);
        self.push_index(index);
    }

    /// Free a CPU+GPU pair. Panics if the two handles disagree on the slot
    /// index, which means they were not allocated together.
    pub fn free(&mut self, slot: DescriptorSlot) {
        let cpu_index = self.index_of_cpu(slot.cpu);
        let gpu_index = self.index_of_gpu(slot.gpu);
        assert!(
            cpu_index == gpu_index,
            "CPU and GPU descriptor handles refer to different slots"
        );
        self.push_index(cpu_index);
    }
}
