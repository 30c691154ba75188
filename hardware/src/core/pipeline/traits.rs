//! Pipeline Latch Interface.
//!
//! Defines the behavior shared by the five pipeline latches: returning to the
//! neutral bubble state and applying the per-cycle stall/bubble decision made
//! by the hazard unit.

use crate::core::pipeline::signals::LatchControl;

/// Represents a pipeline latch (inter-stage buffer).
pub trait PipelineLatch: Sized {
    /// Overwrites the latch with the neutral bubble (`nop`, normal status).
    fn flush(&mut self);

    /// Checks if the latch holds a bubble rather than a real instruction.
    fn is_empty(&self) -> bool;

    /// Clocks the latch.
    ///
    /// # Arguments
    ///
    /// * `control` - Hazard-unit decision for this latch
    /// * `next` - Values computed by the stage behind the latch
    fn advance(&mut self, control: LatchControl, next: Self) {
        match control {
            LatchControl::Normal => *self = next,
            LatchControl::Stall => {}
            LatchControl::Bubble => self.flush(),
        }
    }
}
