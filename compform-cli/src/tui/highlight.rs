//! Tour highlighter that marks the active control on screen

use std::collections::HashSet;

use compform_core::{DisplayOptions, StepTarget, TourHighlighter, TourStep};
use tracing::debug;

/// Tracks what the tour is pointing at and which targets the last frame drew.
#[derive(Debug, Default)]
pub struct ScreenHighlighter {
    active: Option<StepTarget>,
    step: Option<usize>,
    total: usize,
    running: bool,
    /// Targets fully drawn in the most recent frame
    visible: HashSet<StepTarget>,
}

impl ScreenHighlighter {
    pub fn active(&self) -> Option<StepTarget> {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 1-based step number and step count, while a tour runs
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.step.map(|step| (step + 1, self.total))
    }

    pub fn set_visible(&mut self, targets: HashSet<StepTarget>) {
        self.visible = targets;
    }
}

impl TourHighlighter for ScreenHighlighter {
    fn configure(&mut self, steps: &[TourStep], options: &DisplayOptions) {
        self.total = steps.len();
        debug!(steps = steps.len(), ?options, "highlighter configured");
    }

    fn start(&mut self) {
        self.running = true;
        self.active = None;
        self.step = None;
    }

    fn next_step(&mut self) {
        // The highlight itself moves in step_changed once the next target is checked
        debug!(from = ?self.step, "highlighter advancing");
    }

    fn exit(&mut self, force: bool) {
        debug!(force, "highlighter exit");
        self.running = false;
        self.active = None;
        self.step = None;
    }

    fn step_changed(&mut self, index: usize, step: &TourStep) {
        self.step = Some(index);
        self.active = Some(step.target());
    }

    fn has_target(&self, target: StepTarget) -> bool {
        self.visible.contains(&target)
    }
}
