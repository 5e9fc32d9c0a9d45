//! The render graph: pass registration, compilation and execution.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::Result;
use multimap::MultiMap;
use petgraph::dot::Dot;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Direction;

use crate::error::Error;
use crate::graph::builder::{AccessMode, Declaration, PassBuilder};
use crate::graph::pass::{PassId, RenderPass, RenderPassContext};
use crate::registry::handle::ResourceHandle;
use crate::registry::token::ResourceAccessToken;
use crate::resource::state::ResourceState;

/// Setup callback of a pass. Declares the pass's reads and writes through the
/// builder; returns an error if a required input was not supplied this frame.
pub type SetupFn<'cb> = Box<dyn FnMut(&mut PassBuilder) -> Result<()> + 'cb>;
/// Execute callback of a pass. Records commands through the context, fetching
/// resources with the tokens carried by the [`RenderPass`] view.
pub type ExecuteFn<'cb> = Box<dyn FnMut(&RenderPass, &mut RenderPassContext) -> Result<()> + 'cb>;

#[derive(Derivative)]
#[derivative(Debug)]
struct RegisteredPass<'cb> {
    id: PassId,
    #[derivative(Debug = "ignore")]
    setup: SetupFn<'cb>,
    #[derivative(Debug = "ignore")]
    execute: ExecuteFn<'cb>,
    // Filled in by compile().
    declarations: Vec<Declaration>,
    required: Vec<(ResourceHandle, ResourceState)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphState {
    Empty,
    Built,
    Compiled,
    Executed,
}

/// The frame graph. Rebuilt from pass registrations every frame:
/// `Empty → add_pass×N → compile → execute → clear → Empty`.
///
/// Passes themselves are long-lived objects owned by the application; what is
/// registered here each frame is only the pair of callbacks. Re-registering
/// the same pass id next frame is the normal case. Registration is
/// append-only within one compile/clear cycle.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct RenderGraph<'cb> {
    #[derivative(Debug = "ignore")]
    passes: Vec<RegisteredPass<'cb>>,
    // Indices into `passes`, in execution order.
    order: Vec<usize>,
    graph: Graph<PassId, ResourceHandle>,
    state: GraphState,
}

impl Default for RenderGraph<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'cb> RenderGraph<'cb> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            passes: vec![],
            order: vec![],
            graph: Graph::new(),
            state: GraphState::Empty,
        }
    }

    fn state(&self) -> GraphState {
        self.state
    }

    /// Register a pass for this frame. Does not run anything yet. Panics when
    /// called on an already compiled graph; [`Self::clear`] first.
    pub fn add_pass<S, E>(&mut self, id: PassId, setup: S, execute: E)
    where
        S: FnMut(&mut PassBuilder) -> Result<()> + 'cb,
        E: FnMut(&RenderPass, &mut RenderPassContext) -> Result<()> + 'cb,
    {
        assert!(
            matches!(self.state(), GraphState::Empty | GraphState::Built),
            "pass registered on a compiled graph; call clear() first"
        );
        self.passes.push(RegisteredPass {
            id,
            setup: Box::new(setup),
            execute: Box::new(execute),
            declarations: vec![],
            required: vec![],
        });
        self.state = GraphState::Built;
    }

    /// Number of passes registered this cycle.
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// The compiled execution order. Empty before [`Self::compile`].
    pub fn execution_order(&self) -> impl Iterator<Item = PassId> + '_ {
        self.order.iter().map(|&index| self.passes[index].id)
    }

    /// Compile the registered passes into a hazard-safe execution plan.
    ///
    /// Runs every setup callback to collect declarations, derives the
    /// dependency relation (every writer of a handle precedes every reader of
    /// it; writers of the same handle are ordered among themselves by
    /// registration order), and produces a stable topological order with
    /// registration order as the tie-break. Also precomputes the resource
    /// state each pass requires, so execution can issue transitions right
    /// before the consuming pass.
    ///
    /// # Errors
    /// * [`Error::PassSetupFailed`] if any setup callback fails; no partial
    ///   plan is produced.
    /// * [`Error::GraphHasCycle`] if the declared accesses cannot be
    ///   linearized.
    pub fn compile(&mut self) -> Result<()> {
        assert!(
            matches!(self.state(), GraphState::Empty | GraphState::Built),
            "compile on an executed graph; call clear() first"
        );
        self.order.clear();
        self.graph.clear();

        for pass in &mut self.passes {
            let mut builder = PassBuilder::new();
            if let Err(err) = (pass.setup)(&mut builder) {
                error!("Failed to set up {}: {err:#}", pass.id);
                return Err(Error::PassSetupFailed(pass.id).into());
            }
            pass.required = required_states(&builder.declarations);
            pass.declarations = builder.declarations;
        }

        // Hazard relation, derived purely from the declarations. Duplicate
        // declarations of the same handle by one pass collapse to one entry.
        let mut writers: MultiMap<ResourceHandle, usize> = MultiMap::new();
        let mut readers: MultiMap<ResourceHandle, usize> = MultiMap::new();
        for (index, pass) in self.passes.iter().enumerate() {
            let mut seen: HashSet<(ResourceHandle, AccessMode)> = HashSet::new();
            for declaration in &pass.declarations {
                if !seen.insert((declaration.handle, declaration.mode)) {
                    continue;
                }
                match declaration.mode {
                    AccessMode::Read => readers.insert(declaration.handle, index),
                    AccessMode::Write => writers.insert(declaration.handle, index),
                }
            }
        }

        let nodes: Vec<NodeIndex> = self
            .passes
            .iter()
            .map(|pass| self.graph.add_node(pass.id))
            .collect();
        for (handle, writer_list) in writers.iter_all() {
            // A resource's content is produced by its writers and consumed by
            // its readers within the frame, so every writer precedes every
            // reader regardless of registration order. A pass reading back
            // its own write is not an edge.
            if let Some(reader_list) = readers.get_vec(handle) {
                for &writer in writer_list {
                    for &reader in reader_list {
                        if reader != writer {
                            self.graph.update_edge(nodes[writer], nodes[reader], *handle);
                        }
                    }
                }
            }
            // Writers of the same handle execute in registration order.
            for pair in writer_list.windows(2) {
                self.graph.update_edge(nodes[pair[0]], nodes[pair[1]], *handle);
            }
        }

        // Stable topological sort (Kahn), ties broken by registration order.
        // The tie-break is part of the contract: passes registered in their
        // natural pipeline order execute in that order unless a declared
        // hazard forces otherwise.
        let mut indegree: Vec<usize> = nodes
            .iter()
            .map(|&node| self.graph.edges_directed(node, Direction::Incoming).count())
            .collect();
        let mut ready: BTreeSet<usize> = indegree
            .iter()
            .enumerate()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(index, _)| index)
            .collect();
        while let Some(index) = ready.pop_first() {
            self.order.push(index);
            let mut successors = self
                .graph
                .neighbors_directed(nodes[index], Direction::Outgoing)
                .detach();
            while let Some(successor) = successors.next_node(&self.graph) {
                let successor = successor.index();
                indegree[successor] -= 1;
                if indegree[successor] == 0 {
                    ready.insert(successor);
                }
            }
        }
        if self.order.len() != self.passes.len() {
            error!("Cycle detected in render graph; two passes each write a resource the other reads");
            self.order.clear();
            return Err(Error::GraphHasCycle.into());
        }

        self.state = GraphState::Compiled;
        Ok(())
    }

    /// Execute the compiled plan against a command recording context.
    ///
    /// Walks the passes in compiled order. For each pass, a fresh pair of
    /// access tokens is minted from exactly its declared sets, pending state
    /// transitions are recorded into the command list, and the execute
    /// callback runs. Transitions compare against the live resource state, so
    /// a barrier a previous pass already recorded for its own output is not
    /// issued twice.
    ///
    /// # Errors
    /// * [`Error::PassExecuteFailed`] if a pass callback fails. Execution
    ///   stops immediately; no partial frame may be submitted.
    pub fn execute(&mut self, ctx: &mut RenderPassContext) -> Result<()> {
        assert!(
            self.state() == GraphState::Compiled,
            "execute called without a compiled graph"
        );
        for &index in &self.order {
            let pass = &mut self.passes[index];

            let mut read_token = ResourceAccessToken::new();
            let mut write_token = ResourceAccessToken::new();
            for declaration in &pass.declarations {
                read_token.permit(declaration.handle);
                if declaration.mode == AccessMode::Write {
                    write_token.permit(declaration.handle);
                }
            }

            let transitions: Vec<(ResourceHandle, ResourceState, ResourceState)> =
                ctx.resources.with_lock(|mut access| {
                    pass.required
                        .iter()
                        .filter_map(|&(handle, after)| {
                            let before = access.state_of(handle).unwrap_or_else(|| {
                                panic!("declared resource handle {handle:?} is stale")
                            });
                            if before == after {
                                return None;
                            }
                            access.set_state(handle, after);
                            Some((handle, before, after))
                        })
                        .collect()
                });
            {
                let mut cmd = ctx.command_list();
                for (resource, before, after) in transitions {
                    cmd.transition(resource, before, after);
                }
                #[cfg(feature = "debug-markers")]
                cmd.begin_marker(pass.id);
            }

            let view = RenderPass {
                id: pass.id,
                read_token,
                write_token,
            };
            if let Err(err) = (pass.execute)(&view, ctx) {
                error!("Failed to execute {}: {err:#}", pass.id);
                return Err(Error::PassExecuteFailed(pass.id).into());
            }

            #[cfg(feature = "debug-markers")]
            ctx.command_list().end_marker();
        }
        self.state = GraphState::Executed;
        Ok(())
    }

    /// Discard this cycle's registrations, declarations and plan. Pass-owned
    /// state is untouched; the application re-registers its passes next
    /// frame.
    pub fn clear(&mut self) {
        self.passes.clear();
        self.order.clear();
        self.graph.clear();
        self.state = GraphState::Empty;
    }

    /// Get the string representation of the compiled dependency graph in
    /// `dot` format, for debug visualization.
    pub fn dot(&self) -> String {
        format!("{:?}", Dot::new(&self.graph))
    }
}

// Per-pass required states, deduplicated per handle in declaration order.
// A write declaration overrides an earlier read of the same handle; among
// declarations of the same mode the first one wins.
fn required_states(declarations: &[Declaration]) -> Vec<(ResourceHandle, ResourceState)> {
    let mut order: Vec<ResourceHandle> = Vec::new();
    let mut chosen: HashMap<ResourceHandle, (AccessMode, ResourceState)> = HashMap::new();
    for declaration in declarations {
        match chosen.get(&declaration.handle) {
            None => {
                order.push(declaration.handle);
                chosen.insert(declaration.handle, (declaration.mode, declaration.state));
            }
            Some((mode, _)) => {
                if declaration.mode == AccessMode::Write && *mode == AccessMode::Read {
                    chosen.insert(declaration.handle, (declaration.mode, declaration.state));
                }
            }
        }
    }
    order
        .into_iter()
        .map(|handle| (handle, chosen[&handle].1))
        .collect()
}
