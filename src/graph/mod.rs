//! The render graph module holds the frame graph implementation.
//!
//! Rendering stages register themselves as passes each frame: a *setup*
//! callback that declares the resources the pass reads and writes, and an
//! *execute* callback that records GPU commands. From the declarations alone
//! the graph derives a safe execution order, rejects unresolvable hazards,
//! and issues resource state transitions right before the pass that needs
//! them. Doing hazard analysis once per [`compile`](render_graph::RenderGraph::compile),
//! from declarations rather than manual bookkeeping inside each pass, is what
//! lets a lighting pass writing four render targets and sampling eleven
//! textures stay a flat list of declarations.
//!
//! # Example
//!
//! Two passes with a producer/consumer dependency. Registration order happens
//! to match the dependency here, but the order is derived from the
//! declarations, not from registration:
//!
//! ```
//! use deimos::prelude::*;
//! # use anyhow::Result;
//! # fn main() -> Result<()> {
//! # let settings = CoreSettingsBuilder::new().build();
//! # let mut core = initialize(&settings)?;
//! # let offscreen = core.adder.add_resource(Resource::Texture2D(Texture2D::new(
//! #     640, 480, TextureFormat::Rgba8Unorm,
//! # )));
//! let mut ids = PassIdRegistry::new();
//! let offscreen_pass = ids.id("offscreen");
//! let sample_pass = ids.id("sample");
//!
//! let mut graph = RenderGraph::new();
//! graph.add_pass(
//!     offscreen_pass,
//!     move |builder| {
//!         builder.write(offscreen);
//!         Ok(())
//!     },
//!     move |pass, ctx| {
//!         // Draw a fullscreen triangle into the offscreen target.
//!         ctx.resources().with_lock(|access| {
//!             let _target = access.read_resource(offscreen, pass.read_token());
//!         });
//!         ctx.command_list().draw(3, 1);
//!         Ok(())
//!     },
//! );
//! graph.add_pass(
//!     sample_pass,
//!     move |builder| {
//!         builder.read(offscreen);
//!         Ok(())
//!     },
//!     move |_pass, ctx| {
//!         ctx.command_list().draw(6, 1);
//!         Ok(())
//!     },
//! );
//! graph.compile()?;
//! # core.command_sets.begin_frame(0);
//! # core.command_sets.reset_command();
//! # let mut ctx = RenderPassContext::new(core.command_sets.active_set_mut(), &core.resources);
//! # graph.execute(&mut ctx)?;
//! # core.command_sets.close_command();
//! # graph.clear();
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod pass;
pub mod render_graph;
