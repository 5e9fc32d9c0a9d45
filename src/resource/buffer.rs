use anyhow::Result;

use crate::descriptor::DescriptorSlot;
use crate::error::Error;
use crate::resource::state::ResourceState;

/// Memory heap a buffer allocation lives in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BufferHeap {
    /// CPU-writable upload memory, persistently mapped.
    Upload,
    /// GPU-local memory, only reachable through copy commands.
    #[default]
    DeviceLocal,
}

/// A linear GPU buffer.
///
/// Upload-heap buffers expose their persistent CPU mapping through
/// [`Self::update_data`] and [`Self::contents`]; device-local buffers do not
/// and reject CPU writes.
#[derive(Debug)]
pub struct Buffer {
    size: u64,
    heap: BufferHeap,
    view: Option<DescriptorSlot>,
    state: ResourceState,
    data: Vec<u8>,
}

impl Buffer {
    /// Create a buffer of `size` bytes on the given heap.
    pub fn new(size: u64, heap: BufferHeap) -> Self {
        Self {
            size,
            heap,
            view: None,
            state: ResourceState::Common,
            data: vec![0; size as usize],
        }
    }

    /// Attach a constant-buffer view slot allocated from a descriptor heap.
    /// The buffer owns the slot until it is erased from the registry.
    pub fn with_view(mut self, view: DescriptorSlot) -> Self {
        self.view = Some(view);
        self
    }

    /// Get the buffer size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the heap this buffer was allocated on.
    pub fn heap(&self) -> BufferHeap {
        self.heap
    }

    /// Get the attached view slot, if any.
    pub fn view(&self) -> Option<&DescriptorSlot> {
        self.view.as_ref()
    }

    /// Get the current GPU state.
    pub fn state(&self) -> ResourceState {
        self.state
    }

    /// Update the tracked GPU state.
    pub fn set_state(&mut self, state: ResourceState) {
        self.state = state;
    }

    /// Write `data` into the buffer at byte `offset` through the CPU mapping.
    /// # Errors
    /// * Fails with [`Error::UnmappableBuffer`] on a device-local buffer.
    /// * Fails with [`Error::BufferWriteOutOfRange`] if the write does not fit.
    pub fn update_data(&mut self, data: &[u8], offset: u64) -> Result<()> {
        if self.heap != BufferHeap::Upload {
            return Err(Error::UnmappableBuffer.into());
        }
        let end = offset
            .checked_add(data.len() as u64)
            .ok_or(Error::BufferWriteOutOfRange)?;
        if end > self.size {
            return Err(Error::BufferWriteOutOfRange.into());
        }
        self.data[offset as usize..end as usize].copy_from_slice(data);
        Ok(())
    }

    /// Read the buffer through the CPU mapping.
    /// # Errors
    /// * Fails with [`Error::UnmappableBuffer`] on a device-local buffer.
    pub fn contents(&self) -> Result<&[u8]> {
        if self.heap != BufferHeap::Upload {
            return Err(Error::UnmappableBuffer.into());
        }
        Ok(&self.data)
    }
}
