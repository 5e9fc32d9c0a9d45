//! Command recording.
//!
//! A [`CommandSet`] couples one command list with the allocator owning its
//! recorded memory. Recorded commands are plain [`Command`] values; the crate
//! never talks to a driver itself, the filled and closed list is the artifact
//! the owning application hands to its GPU backend. One command set exists
//! per frame-in-flight slot, managed by the
//! [`CommandSetManager`](crate::command::manager::CommandSetManager).

use crate::descriptor::{CpuDescriptor, GpuDescriptor};
use crate::graph::pass::PassId;
use crate::registry::handle::ResourceHandle;
use crate::resource::state::ResourceState;

pub mod manager;

/// One recorded GPU instruction.
///
/// This is the boundary vocabulary between the graph engine and the backend:
/// enough to express state transitions, output binding and the draw/dispatch/
/// copy work passes record. Backends translate each value into their native
/// command encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Transition a resource between GPU-visible states.
    Transition {
        resource: ResourceHandle,
        before: ResourceState,
        after: ResourceState,
    },
    /// Bind color targets and an optional depth target for subsequent draws.
    SetRenderTargets {
        color: Vec<CpuDescriptor>,
        depth: Option<CpuDescriptor>,
    },
    /// Set the viewport for subsequent draws.
    SetViewport {
        width: u32,
        height: u32,
    },
    /// Bind a shader-visible descriptor table.
    SetDescriptorTable {
        slot: u32,
        base: GpuDescriptor,
    },
    /// Non-indexed draw.
    Draw {
        vertex_count: u32,
        instance_count: u32,
    },
    /// Indexed draw.
    DrawIndexed {
        index_count: u32,
        instance_count: u32,
    },
    /// Compute dispatch.
    Dispatch {
        x: u32,
        y: u32,
        z: u32,
    },
    /// Copy `size` bytes between two buffer resources.
    CopyBuffer {
        src: ResourceHandle,
        dst: ResourceHandle,
        size: u64,
    },
    /// Begin of a debug-marker region for a pass.
    BeginMarker {
        pass: PassId,
    },
    /// End of the innermost debug-marker region.
    EndMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordState {
    Initial,
    Recording,
    Closed,
}

/// Owns the memory commands are recorded into. Resetting releases everything
/// recorded the last time the owning slot was used, which is only safe once
/// the GPU has retired that submission; upholding that through fences is the
/// caller's responsibility.
#[derive(Debug, Default)]
pub struct CommandAllocator {
    commands: Vec<Command>,
}

impl CommandAllocator {
    fn reset(&mut self) {
        self.commands.clear();
    }
}

/// A (command list, command allocator) pair for one frame-in-flight slot.
///
/// The list must be fully reset before recording and fully closed before
/// submission; violating that ordering panics.
#[derive(Debug)]
pub struct CommandSet {
    allocator: CommandAllocator,
    state: RecordState,
}

impl CommandSet {
    pub(crate) fn new() -> Self {
        Self {
            allocator: CommandAllocator::default(),
            state: RecordState::Initial,
        }
    }

    /// Release the allocator's memory from this slot's previous use and open
    /// the list for recording. Panics if the list is already recording.
    pub fn reset_command(&mut self) {
        assert!(
            self.state != RecordState::Recording,
            "reset of a command set that is still recording"
        );
        self.allocator.reset();
        self.state = RecordState::Recording;
    }

    /// Finalize recording so the list is submittable. Panics unless the list
    /// is recording.
    pub fn close_command(&mut self) {
        assert!(
            self.state == RecordState::Recording,
            "close of a command set that is not recording"
        );
        self.state = RecordState::Closed;
    }

    /// Get the active recording interface. Panics unless the set was reset
    /// and not yet closed.
    pub fn command_list(&mut self) -> CommandRecorder<'_> {
        assert!(
            self.state == RecordState::Recording,
            "recording into a command set that was not reset"
        );
        CommandRecorder {
            commands: &mut self.allocator.commands,
        }
    }

    /// Whether the list was closed and can be submitted.
    pub fn is_closed(&self) -> bool {
        self.state == RecordState::Closed
    }

    /// The recorded command stream. This is what the caller submits to its
    /// GPU queue after [`Self::close_command`].
    pub fn commands(&self) -> &[Command] {
        &self.allocator.commands
    }
}

/// Recording interface handed to passes during graph execution.
pub struct CommandRecorder<'a> {
    commands: &'a mut Vec<Command>,
}

impl CommandRecorder<'_> {
    /// Record a resource state transition.
    pub fn transition(&mut self, resource: ResourceHandle, before: ResourceState, after: ResourceState) {
        self.commands.push(Command::Transition {
            resource,
            before,
            after,
        });
    }

    /// Bind color targets and an optional depth target.
    pub fn set_render_targets(&mut self, color: Vec<CpuDescriptor>, depth: Option<CpuDescriptor>) {
        self.commands.push(Command::SetRenderTargets {
            color,
            depth,
        });
    }

    /// Set the viewport.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.commands.push(Command::SetViewport {
            width,
            height,
        });
    }

    /// Bind a shader-visible descriptor table.
    pub fn set_descriptor_table(&mut self, slot: u32, base: GpuDescriptor) {
        self.commands.push(Command::SetDescriptorTable {
            slot,
            base,
        });
    }

    /// Record a non-indexed draw.
    pub fn draw(&mut self, vertex_count: u32, instance_count: u32) {
        self.commands.push(Command::Draw {
            vertex_count,
            instance_count,
        });
    }

    /// Record an indexed draw.
    pub fn draw_indexed(&mut self, index_count: u32, instance_count: u32) {
        self.commands.push(Command::DrawIndexed {
            index_count,
            instance_count,
        });
    }

    /// Record a compute dispatch.
    pub fn dispatch(&mut self, x: u32, y: u32, z: u32) {
        self.commands.push(Command::Dispatch {
            x,
            y,
            z,
        });
    }

    /// Record a buffer copy.
    pub fn copy_buffer(&mut self, src: ResourceHandle, dst: ResourceHandle, size: u64) {
        self.commands.push(Command::CopyBuffer {
            src,
            dst,
            size,
        });
    }

    #[cfg(feature = "debug-markers")]
    pub(crate) fn begin_marker(&mut self, pass: PassId) {
        self.commands.push(Command::BeginMarker {
            pass,
        });
    }

    #[cfg(feature = "debug-markers")]
    pub(crate) fn end_marker(&mut self) {
        self.commands.push(Command::EndMarker);
    }
}
