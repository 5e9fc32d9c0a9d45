/// GPU-visible state of a resource.
///
/// The graph records a transition command whenever a resource's required
/// state for the next consuming pass differs from the state it is currently
/// in. The set of states is closed; backends map them onto their native
/// barrier vocabulary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceState {
    /// Neutral state resources start their life in.
    #[default]
    Common,
    /// Bound as a color render target.
    RenderTarget,
    /// Bound as a depth target with writes enabled.
    DepthWrite,
    /// Readable from shaders (SRV).
    ShaderResource,
    /// Read/write from shaders (UAV).
    UnorderedAccess,
    /// Source of a copy operation.
    CopySource,
    /// Destination of a copy operation.
    CopyDest,
    /// Ready for swap chain presentation.
    Present,
}

impl ResourceState {
    /// Whether a resource in this state may be observed by shader reads
    /// without an intervening transition.
    pub fn is_readable(&self) -> bool {
        matches!(
            self,
            ResourceState::ShaderResource | ResourceState::CopySource | ResourceState::Present
        )
    }
}
