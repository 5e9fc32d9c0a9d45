//! Descriptor heaps and the fixed-capacity slot allocator.
//!
//! A [`DescriptorHeap`] is a pre-sized array of view slots of one kind. The
//! [`DescriptorHeapAllocator`](crate::descriptor::allocator::DescriptorHeapAllocator)
//! hands out slot handles from a free list and recomputes slot indices from
//! handle offsets on free, exactly the arithmetic real descriptor heaps use.
//! Heap capacity is a deployment-time decision of the owning subsystem and is
//! never grown at runtime.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use static_assertions::assert_impl_all;

pub mod allocator;

/// Kind of views a descriptor heap stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorHeapKind {
    /// Constant-buffer, shader-resource and unordered-access views.
    CbvSrvUav,
    /// Sampler states.
    Sampler,
    /// Render-target views. Never shader visible.
    RenderTarget,
    /// Depth-stencil views. Never shader visible.
    DepthStencil,
}

impl DescriptorHeapKind {
    /// Byte stride between two consecutive slots of this kind.
    pub fn handle_increment(&self) -> usize {
        match self {
            DescriptorHeapKind::CbvSrvUav => 64,
            DescriptorHeapKind::Sampler => 16,
            DescriptorHeapKind::RenderTarget => 32,
            DescriptorHeapKind::DepthStencil => 32,
        }
    }

    /// Whether heaps of this kind may be made shader visible.
    pub fn supports_shader_visible(&self) -> bool {
        matches!(self, DescriptorHeapKind::CbvSrvUav | DescriptorHeapKind::Sampler)
    }
}

/// CPU-side descriptor handle. An address into a descriptor heap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CpuDescriptor {
    pub ptr: usize,
}

/// GPU-side descriptor handle, only available from shader-visible heaps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuDescriptor {
    pub ptr: u64,
}

assert_impl_all!(CpuDescriptor: Copy, Send, Sync);
assert_impl_all!(GpuDescriptor: Copy, Send, Sync);

/// A CPU/GPU view-handle pair drawn from a shader-visible heap. The two
/// handles always refer to the same slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorSlot {
    pub cpu: CpuDescriptor,
    pub gpu: GpuDescriptor,
}

// Each heap gets a unique, non-overlapping base address so that freeing a
// handle against the wrong heap is detectable by the offset arithmetic.
static NEXT_CPU_BASE: AtomicUsize = AtomicUsize::new(0x1000);
static NEXT_GPU_BASE: AtomicU64 = AtomicU64::new(0x1_0000_0000);

/// A pre-sized descriptor heap.
#[derive(Debug)]
pub struct DescriptorHeap {
    kind: DescriptorHeapKind,
    capacity: u32,
    shader_visible: bool,
    base_cpu: CpuDescriptor,
    base_gpu: Option<GpuDescriptor>,
}

impl DescriptorHeap {
    /// Create a heap of `capacity` slots. Requesting a shader-visible heap of
    /// a kind that does not support it panics.
    pub fn new(kind: DescriptorHeapKind, capacity: u32, shader_visible: bool) -> Self {
        assert!(capacity > 0, "descriptor heap capacity must be non-zero");
        assert!(
            !shader_visible || kind.supports_shader_visible(),
            "{kind:?} heaps cannot be shader visible"
        );
        let span = capacity as usize * kind.handle_increment();
        let base_cpu = CpuDescriptor {
            ptr: NEXT_CPU_BASE.fetch_add(span, Ordering::Relaxed),
        };
        let base_gpu = shader_visible.then(|| GpuDescriptor {
            ptr: NEXT_GPU_BASE.fetch_add(span as u64, Ordering::Relaxed),
        });
        Self {
            kind,
            capacity,
            shader_visible,
            base_cpu,
            base_gpu,
        }
    }

    /// Get the heap kind.
    pub fn kind(&self) -> DescriptorHeapKind {
        self.kind
    }

    /// Get the slot capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Whether the heap is shader visible.
    pub fn is_shader_visible(&self) -> bool {
        self.shader_visible
    }

    /// Byte stride between two consecutive slots.
    pub fn handle_increment(&self) -> usize {
        self.kind.handle_increment()
    }

    /// CPU handle of slot 0.
    pub fn base_cpu(&self) -> CpuDescriptor {
        self.base_cpu
    }

    /// GPU handle of slot 0, if the heap is shader visible.
    pub fn base_gpu(&self) -> Option<GpuDescriptor> {
        self.base_gpu
    }

    /// CPU handle of slot `index`.
    pub fn cpu_at(&self, index: u32) -> CpuDescriptor {
        assert!(index < self.capacity, "descriptor index out of range");
        CpuDescriptor {
            ptr: self.base_cpu.ptr + index as usize * self.handle_increment(),
        }
    }

    /// GPU handle of slot `index`. Panics on non-shader-visible heaps.
    pub fn gpu_at(&self, index: u32) -> GpuDescriptor {
        assert!(index < self.capacity, "descriptor index out of range");
        let base = self
            .base_gpu
            .expect("GPU handles only exist on shader visible heaps");
        GpuDescriptor {
            ptr: base.ptr + index as u64 * self.handle_increment() as u64,
        }
    }
}
