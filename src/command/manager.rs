use crate::command::CommandSet;

/// Owns one [`CommandSet`] per frame-in-flight slot, recycled round-robin.
///
/// The manager pre-creates every set at startup; the frame scheduler supplies
/// the active slot index each frame through [`Self::begin_frame`]. The record
/// slot and the slot the GPU is still executing must never be the same index
/// at the same time; the caller upholds that with its fences before calling
/// `begin_frame` on a recycled index.
#[derive(Debug)]
pub struct CommandSetManager {
    sets: Vec<CommandSet>,
    record_index: Option<usize>,
}

impl CommandSetManager {
    /// Pre-create one command set per frame-in-flight slot.
    pub fn new(frames_in_flight: usize) -> Self {
        assert!(frames_in_flight > 0, "need at least one frame in flight");
        Self {
            sets: (0..frames_in_flight).map(|_| CommandSet::new()).collect(),
            record_index: None,
        }
    }

    /// Number of frame-in-flight slots.
    pub fn frames_in_flight(&self) -> usize {
        self.sets.len()
    }

    /// Select the record slot for this frame. Panics if `index` is out of
    /// range.
    pub fn begin_frame(&mut self, index: usize) {
        assert!(
            index < self.sets.len(),
            "frame index {index} out of range for {} frames in flight",
            self.sets.len()
        );
        self.record_index = Some(index);
    }

    fn record_index(&self) -> usize {
        self.record_index
            .expect("no record slot selected; call begin_frame first")
    }

    /// Reset the active slot's allocator and open its list for recording.
    pub fn reset_command(&mut self) {
        let index = self.record_index();
        self.sets[index].reset_command();
    }

    /// Close the active slot's list so it can be submitted.
    pub fn close_command(&mut self) {
        let index = self.record_index();
        self.sets[index].close_command();
    }

    /// Get the active command set.
    pub fn active_set(&self) -> &CommandSet {
        &self.sets[self.record_index()]
    }

    /// Get the active command set mutably, e.g. to build a
    /// [`RenderPassContext`](crate::graph::pass::RenderPassContext) around it.
    pub fn active_set_mut(&mut self) -> &mut CommandSet {
        let index = self.record_index();
        &mut self.sets[index]
    }

    /// Get the command set for an arbitrary slot, e.g. for submission
    /// inspection.
    pub fn set(&self, index: usize) -> &CommandSet {
        &self.sets[index]
    }
}
