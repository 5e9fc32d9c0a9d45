//! Frame graph execution engine for real-time renderers
//!
//! Deimos lets independent rendering stages ("passes") declare which GPU
//! resources they read and write, orders them into a hazard-safe execution
//! sequence, inserts the required resource state transitions, and replays the
//! same graph every frame with different data. The concrete GPU backend
//! (device, queues, swap chain creation, pipeline objects) lives outside this
//! crate: command lists record an inspectable instruction stream that the
//! owning application submits to its backend of choice.
//!
//! # Example
//!
//! A frame consists of registering passes, compiling the graph and executing
//! it against a command recording context.
//!
//! ```
//! use deimos::prelude::*;
//! # use anyhow::Result;
//! # fn main() -> Result<()> {
//! let settings = CoreSettingsBuilder::new()
//!     .frames_in_flight(2)
//!     .srv_heap_size(256)
//!     .build();
//! let mut core = initialize(&settings)?;
//!
//! // Register resources once, outside the per-frame loop.
//! let target = core.adder.add_resource(Resource::Texture2D(Texture2D::new(
//!     1280,
//!     720,
//!     TextureFormat::Rgba8Unorm,
//! )));
//!
//! let mut ids = PassIdRegistry::new();
//! let geometry = ids.id("geometry");
//! let tonemap = ids.id("tonemap");
//!
//! let mut graph = RenderGraph::new();
//! graph.add_pass(
//!     geometry,
//!     move |builder| {
//!         builder.write(target);
//!         Ok(())
//!     },
//!     move |_pass, _ctx| Ok(()),
//! );
//! graph.add_pass(
//!     tonemap,
//!     move |builder| {
//!         builder.read(target);
//!         Ok(())
//!     },
//!     move |_pass, _ctx| Ok(()),
//! );
//!
//! graph.compile()?;
//!
//! core.command_sets.begin_frame(0);
//! core.command_sets.reset_command();
//! let mut ctx = RenderPassContext::new(core.command_sets.active_set_mut(), &core.resources);
//! graph.execute(&mut ctx)?;
//! core.command_sets.close_command();
//!
//! // The closed command list is what the caller hands to its GPU backend.
//! let _commands = core.command_sets.active_set().commands();
//! graph.clear();
//! # Ok(())
//! # }
//! ```
//!
//! For further documentation, check out the following modules
//! - [`graph`] for pass registration, graph compilation and execution.
//! - [`registry`] for resource ownership, handles and access tokens.
//! - [`resource`] for the GPU resource variants tracked by the registry.
//! - [`descriptor`] for descriptor heaps and the slot allocator.
//! - [`command`] for command sets and the per-frame command set manager.
//! - [`init`] for assembling all of the above from a [`CoreSettings`](crate::settings::CoreSettings).

#[macro_use]
extern crate derivative;
#[macro_use]
extern crate log;

pub mod prelude;
pub use crate::prelude::*;

pub mod command;
pub mod descriptor;
pub mod error;
pub mod graph;
pub mod init;
pub mod registry;
pub mod resource;
pub mod settings;
