//! Pass identity and the objects a pass interacts with during execution.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::command::{CommandRecorder, CommandSet};
use crate::registry::manager::ResourceManager;
use crate::registry::token::ResourceAccessToken;

/// Process-unique identifier of a pass type.
///
/// Ids are assigned by a [`PassIdRegistry`] the owning application creates at
/// startup, so identity does not depend on static initialization order or
/// RTTI. The same name always yields the same id within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(u64);

impl Display for PassId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "pass#{}", self.0)
    }
}

/// Assigns [`PassId`]s from a monotone counter, keyed by pass name.
#[derive(Debug, Default)]
pub struct PassIdRegistry {
    by_name: HashMap<String, PassId>,
    names: Vec<String>,
}

impl PassIdRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the id for `name`, assigning a fresh one on first use.
    pub fn id(&mut self, name: impl Into<String>) -> PassId {
        let name = name.into();
        if let Some(id) = self.by_name.get(&name) {
            return *id;
        }
        let id = PassId(self.names.len() as u64);
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        id
    }

    /// Look up the name an id was assigned for.
    pub fn name(&self, id: PassId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }
}

/// The per-execution view of a pass, handed to its execute callback.
///
/// Carries the access tokens minted from the pass's declared read/write sets
/// for exactly this execution; they are discarded when the callback returns.
#[derive(Debug)]
pub struct RenderPass {
    pub(crate) id: PassId,
    pub(crate) read_token: ResourceAccessToken,
    pub(crate) write_token: ResourceAccessToken,
}

impl RenderPass {
    /// Get the pass id.
    pub fn id(&self) -> PassId {
        self.id
    }

    /// Token permitting reads of every handle this pass declared, reads and
    /// writes both: a writer may read back what it wrote.
    pub fn read_token(&self) -> &ResourceAccessToken {
        &self.read_token
    }

    /// Token permitting writes of exactly the declared write set.
    pub fn write_token(&self) -> &ResourceAccessToken {
        &self.write_token
    }
}

/// Execution context handed to pass callbacks.
///
/// Wraps the active recording command set together with the resource manager,
/// so the dependency on the guarded registry is visible in the pass contract
/// instead of reached through ambient global state.
pub struct RenderPassContext<'a> {
    pub(crate) command_set: &'a mut CommandSet,
    pub(crate) resources: &'a ResourceManager,
}

impl<'a> RenderPassContext<'a> {
    /// Create a context over the frame's active command set.
    pub fn new(command_set: &'a mut CommandSet, resources: &'a ResourceManager) -> Self {
        Self {
            command_set,
            resources,
        }
    }

    /// Get the active recording interface.
    pub fn command_list(&mut self) -> CommandRecorder<'_> {
        self.command_set.command_list()
    }

    /// Get the token-gated resource access path.
    pub fn resources(&self) -> &ResourceManager {
        self.resources
    }
}
