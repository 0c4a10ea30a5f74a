//! The narrow contract the autofill driver needs from whatever draws the tour.

use crate::tour::{DisplayOptions, StepTarget, TourStep};

/// Visual side of a guided tour.
///
/// Purely cosmetic: the driver owns the step index and calls these hooks as
/// it moves. Implementations must not assume any call order beyond
/// `configure` → `start` → (`step_changed` / `next_step`)* → `exit`.
pub trait TourHighlighter {
    /// Receive the full step list and presentation hints before the tour starts.
    fn configure(&mut self, steps: &[TourStep], options: &DisplayOptions);

    fn start(&mut self);

    /// Move the highlight on to the following step.
    fn next_step(&mut self);

    /// Tear down the tour overlay. `force` skips any confirmation.
    fn exit(&mut self, force: bool);

    /// Called each time the driver enters a step, after the target check.
    fn step_changed(&mut self, index: usize, step: &TourStep);

    /// Whether the step target is currently present on screen.
    fn has_target(&self, target: StepTarget) -> bool;
}
