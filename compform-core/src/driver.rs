//! Guided autofill driver.
//!
//! A linear state machine over a fixed step list. The driver never sleeps:
//! each call to [`AutofillDriver::advance`] does one unit of work and returns
//! how long the caller should wait before calling it again. The TUI turns that
//! into an event-loop deadline, the headless runner into a tokio sleep.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::TourError;
use crate::form::FormState;
use crate::highlight::TourHighlighter;
use crate::tour::{char_prefix, default_script, DisplayOptions, StepTarget, TourStep, TourTimings};

/// How a tour run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourOutcome {
    /// The submit step fired
    Completed,
    /// Stopped by the user
    Cancelled,
    /// A step's target was missing when the step began
    Aborted { step: usize, target: StepTarget },
}

/// Where the driver is in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPhase {
    Idle,
    /// Started, first step not yet entered
    Entering { step: usize },
    /// Next write is the prefix of length `typed`
    Typing { step: usize, typed: usize },
    /// Action done, next advance moves on
    Settling { step: usize },
    /// Submit step waiting out its delay
    Submitting { step: usize },
    Finished(TourOutcome),
}

/// Result of one [`AutofillDriver::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Call `advance` again after this long
    Wait(Duration),
    /// The caller must submit the form now; the tour is already closed
    Submit,
    Finished(TourOutcome),
    /// No tour has been started
    Idle,
}

#[derive(Debug, Clone)]
pub struct AutofillDriver {
    steps: Vec<TourStep>,
    timings: TourTimings,
    options: DisplayOptions,
    phase: TourPhase,
}

impl AutofillDriver {
    pub fn new(steps: Vec<TourStep>, timings: TourTimings) -> Self {
        Self {
            steps,
            timings,
            options: DisplayOptions::default(),
            phase: TourPhase::Idle,
        }
    }

    /// Driver for the built-in greeting-service script.
    pub fn with_default_script(timings: TourTimings) -> Self {
        Self::new(default_script(), timings)
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    pub fn timings(&self) -> TourTimings {
        self.timings
    }

    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.phase, TourPhase::Idle | TourPhase::Finished(_))
    }

    /// Index of the step in flight, if any.
    pub fn current_step(&self) -> Option<usize> {
        match self.phase {
            TourPhase::Entering { step }
            | TourPhase::Typing { step, .. }
            | TourPhase::Settling { step }
            | TourPhase::Submitting { step } => Some(step),
            TourPhase::Idle | TourPhase::Finished(_) => None,
        }
    }

    pub fn outcome(&self) -> Option<TourOutcome> {
        match self.phase {
            TourPhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Begin a run from the first step.
    ///
    /// Rejected while another run is in flight; allowed again once a run has
    /// finished, whatever its outcome.
    pub fn start<H: TourHighlighter + ?Sized>(&mut self, highlighter: &mut H) -> Result<(), TourError> {
        if let Some(step) = self.current_step() {
            warn!(step, "ignoring tour start while a tour is running");
            return Err(TourError::AlreadyRunning { step });
        }

        highlighter.configure(&self.steps, &self.options);
        highlighter.start();
        self.phase = TourPhase::Entering { step: 0 };
        info!(steps = self.steps.len(), "guided autofill started");
        Ok(())
    }

    /// Stop a running tour early.
    pub fn cancel<H: TourHighlighter + ?Sized>(&mut self, highlighter: &mut H) -> Result<(), TourError> {
        let Some(step) = self.current_step() else {
            return Err(TourError::NotRunning);
        };
        highlighter.exit(true);
        self.phase = TourPhase::Finished(TourOutcome::Cancelled);
        info!(step, "guided autofill cancelled");
        Ok(())
    }

    /// Perform the next unit of tour work.
    pub fn advance<H: TourHighlighter + ?Sized>(&mut self, form: &mut FormState, highlighter: &mut H) -> Tick {
        match self.phase {
            TourPhase::Idle => Tick::Idle,
            TourPhase::Finished(outcome) => Tick::Finished(outcome),
            TourPhase::Entering { step } => self.enter(step, form, highlighter),
            TourPhase::Typing { step, typed } => self.type_next(step, typed, form),
            TourPhase::Settling { step } => {
                if step + 1 < self.steps.len() {
                    highlighter.next_step();
                    self.enter(step + 1, form, highlighter)
                } else {
                    self.finish(TourOutcome::Completed, highlighter)
                }
            }
            TourPhase::Submitting { step } => {
                // Terminal step: close the tour before handing off to submission
                highlighter.exit(true);
                self.phase = TourPhase::Finished(TourOutcome::Completed);
                info!(step, "guided autofill submitting");
                Tick::Submit
            }
        }
    }

    fn enter<H: TourHighlighter + ?Sized>(&mut self, index: usize, form: &mut FormState, highlighter: &mut H) -> Tick {
        let Some(step) = self.steps.get(index) else {
            return self.finish(TourOutcome::Completed, highlighter);
        };

        let target = step.target();
        if !highlighter.has_target(target) {
            warn!(step = index, target = %target, "tour target missing, aborting tour");
            return self.finish(TourOutcome::Aborted { step: index, target }, highlighter);
        }

        highlighter.step_changed(index, step);
        debug!(step = index, target = %target, "tour step entered");

        match step {
            TourStep::Type { .. } => self.type_next(index, 0, form),
            TourStep::Select(preset) => {
                form.set_preset(*preset);
                self.phase = TourPhase::Settling { step: index };
                Tick::Wait(self.timings.settle_delay())
            }
            TourStep::Submit => {
                self.phase = TourPhase::Submitting { step: index };
                Tick::Wait(self.timings.submit_delay())
            }
        }
    }

    fn type_next(&mut self, index: usize, typed: usize, form: &mut FormState) -> Tick {
        let Some(TourStep::Type { field, text }) = self.steps.get(index) else {
            self.phase = TourPhase::Settling { step: index };
            return Tick::Wait(self.timings.settle_delay());
        };

        form.set_field(*field, char_prefix(text, typed));

        if typed >= text.chars().count() {
            // Last keystroke still gets its pause before the settle delay
            self.phase = TourPhase::Settling { step: index };
            Tick::Wait(self.timings.char_delay() + self.timings.settle_delay())
        } else {
            self.phase = TourPhase::Typing {
                step: index,
                typed: typed + 1,
            };
            Tick::Wait(self.timings.char_delay())
        }
    }

    fn finish<H: TourHighlighter + ?Sized>(&mut self, outcome: TourOutcome, highlighter: &mut H) -> Tick {
        highlighter.exit(true);
        self.phase = TourPhase::Finished(outcome);
        info!(?outcome, "guided autofill finished");
        Tick::Finished(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Preset;
    use crate::form::Field;

    #[derive(Default)]
    struct Recorder {
        entered: Vec<usize>,
        next_calls: usize,
        exits: Vec<bool>,
        missing: Option<StepTarget>,
    }

    impl TourHighlighter for Recorder {
        fn configure(&mut self, _steps: &[TourStep], _options: &DisplayOptions) {}
        fn start(&mut self) {}
        fn next_step(&mut self) {
            self.next_calls += 1;
        }
        fn exit(&mut self, force: bool) {
            self.exits.push(force);
        }
        fn step_changed(&mut self, index: usize, _step: &TourStep) {
            self.entered.push(index);
        }
        fn has_target(&self, target: StepTarget) -> bool {
            self.missing != Some(target)
        }
    }

    fn short_script() -> Vec<TourStep> {
        vec![
            TourStep::type_into(Field::Branch, "ab"),
            TourStep::select(Preset::GO),
            TourStep::submit(),
        ]
    }

    #[test]
    fn test_idle_until_started() {
        let mut driver = AutofillDriver::new(short_script(), TourTimings::default());
        let mut form = FormState::new();
        let mut hl = Recorder::default();

        assert_eq!(driver.advance(&mut form, &mut hl), Tick::Idle);
        assert_eq!(form, FormState::new());
        assert!(!driver.is_running());
    }

    #[test]
    fn test_tick_sequence_and_delays() {
        let timings = TourTimings::default();
        let mut driver = AutofillDriver::new(short_script(), timings);
        let mut form = FormState::new();
        let mut hl = Recorder::default();
        driver.start(&mut hl).unwrap();

        let char_delay = timings.char_delay();
        let settle = timings.settle_delay();

        // "", "a", "ab"
        assert_eq!(driver.advance(&mut form, &mut hl), Tick::Wait(char_delay));
        assert_eq!(form.field(Field::Branch), "");
        assert_eq!(driver.advance(&mut form, &mut hl), Tick::Wait(char_delay));
        assert_eq!(form.field(Field::Branch), "a");
        assert_eq!(driver.advance(&mut form, &mut hl), Tick::Wait(char_delay + settle));
        assert_eq!(form.field(Field::Branch), "ab");

        // Preset step
        assert_eq!(driver.advance(&mut form, &mut hl), Tick::Wait(settle));
        assert_eq!(form.preset(), Some(Preset::GO));

        // Submit step
        assert_eq!(driver.advance(&mut form, &mut hl), Tick::Wait(timings.submit_delay()));
        assert_eq!(driver.advance(&mut form, &mut hl), Tick::Submit);
        assert_eq!(driver.advance(&mut form, &mut hl), Tick::Finished(TourOutcome::Completed));

        assert_eq!(hl.entered, vec![0, 1, 2]);
        assert_eq!(hl.next_calls, 2);
        assert_eq!(hl.exits, vec![true]);
    }

    #[test]
    fn test_second_start_is_rejected() {
        let mut driver = AutofillDriver::new(short_script(), TourTimings::instant());
        let mut form = FormState::new();
        let mut hl = Recorder::default();

        driver.start(&mut hl).unwrap();
        driver.advance(&mut form, &mut hl);
        let step = driver.current_step().unwrap();

        assert_eq!(driver.start(&mut hl), Err(TourError::AlreadyRunning { step }));
        assert_eq!(driver.current_step(), Some(step));
    }

    #[test]
    fn test_restart_after_finish() {
        let mut driver = AutofillDriver::new(short_script(), TourTimings::instant());
        let mut form = FormState::new();
        let mut hl = Recorder::default();

        driver.start(&mut hl).unwrap();
        driver.cancel(&mut hl).unwrap();
        assert_eq!(driver.outcome(), Some(TourOutcome::Cancelled));

        driver.start(&mut hl).unwrap();
        assert_eq!(driver.phase(), TourPhase::Entering { step: 0 });
    }

    #[test]
    fn test_cancel_when_idle() {
        let mut driver = AutofillDriver::new(short_script(), TourTimings::instant());
        let mut hl = Recorder::default();
        assert_eq!(driver.cancel(&mut hl), Err(TourError::NotRunning));
        assert!(hl.exits.is_empty());
    }

    #[test]
    fn test_missing_target_aborts() {
        let mut driver = AutofillDriver::new(short_script(), TourTimings::instant());
        let mut form = FormState::new();
        let mut hl = Recorder {
            missing: Some(StepTarget::PresetButton(Preset::GO)),
            ..Default::default()
        };
        driver.start(&mut hl).unwrap();

        let mut last = Tick::Idle;
        for _ in 0..20 {
            last = driver.advance(&mut form, &mut hl);
            if matches!(last, Tick::Finished(_)) {
                break;
            }
        }

        let expected = TourOutcome::Aborted {
            step: 1,
            target: StepTarget::PresetButton(Preset::GO),
        };
        assert_eq!(last, Tick::Finished(expected));
        assert_eq!(hl.entered, vec![0]);
        assert_eq!(hl.exits, vec![true]);
        assert_eq!(form.field(Field::Branch), "ab");
        assert!(form.preset().is_none());
    }

    #[test]
    fn test_empty_script_completes() {
        let mut driver = AutofillDriver::new(Vec::new(), TourTimings::instant());
        let mut form = FormState::new();
        let mut hl = Recorder::default();
        driver.start(&mut hl).unwrap();

        assert_eq!(driver.advance(&mut form, &mut hl), Tick::Finished(TourOutcome::Completed));
        assert_eq!(hl.exits, vec![true]);
    }
}
