//! Console playback of the guided autofill, no terminal UI

use std::future::Future;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use compform_core::runner;
use compform_core::{
    AutofillDriver, DisplayOptions, FormState, Presenter, StepTarget, TourHighlighter, TourOutcome,
    TourStep, TourTimings,
};
use tracing::{info, warn};

/// Prints one line per tour step
#[derive(Debug, Default)]
pub struct ConsoleHighlighter {
    total: usize,
}

impl TourHighlighter for ConsoleHighlighter {
    fn configure(&mut self, steps: &[TourStep], _options: &DisplayOptions) {
        self.total = steps.len();
    }

    fn start(&mut self) {
        println!("Starting guided autofill ({} steps)", self.total);
    }

    fn next_step(&mut self) {}

    fn exit(&mut self, _force: bool) {
        if let Err(err) = io::stdout().flush() {
            warn!(%err, "failed to flush stdout");
        }
    }

    fn step_changed(&mut self, index: usize, step: &TourStep) {
        let action = match step {
            TourStep::Type { field, text } => format!("{}: typing \"{text}\"", field.label()),
            TourStep::Select(preset) => format!("Build preset: selecting {preset}"),
            TourStep::Submit => "Create Component".to_string(),
        };
        println!("[{}/{}] {action}", index + 1, self.total);
    }

    // Everything "exists" on a console
    fn has_target(&self, _target: StepTarget) -> bool {
        true
    }
}

/// Prints the submission notice to stdout
#[derive(Debug, Default)]
pub struct StdoutPresenter;

impl Presenter for StdoutPresenter {
    fn present(&mut self, title: &str, body: &str) {
        println!("\n{title}:\n\n{body}");
    }
}

/// Play the built-in tour against a fresh form and print the result
///
/// Ctrl+C cancels the tour.
pub async fn run(timings: TourTimings) -> Result<()> {
    let mut driver = AutofillDriver::with_default_script(timings);
    let mut form = FormState::new();
    let mut highlighter = ConsoleHighlighter::default();
    let mut presenter = StdoutPresenter;

    driver.start(&mut highlighter)?;
    let outcome = play_until(
        &mut driver,
        &mut form,
        &mut highlighter,
        &mut presenter,
        tokio::signal::ctrl_c(),
    )
    .await?;
    info!(?outcome, "headless autofill finished");

    match outcome {
        TourOutcome::Completed => Ok(()),
        TourOutcome::Cancelled => bail!("Guided autofill was cancelled"),
        TourOutcome::Aborted { step, target } => {
            bail!("Guided autofill aborted at step {}: missing target '{target}'", step + 1)
        }
    }
}

/// Play a started tour, cancelling it if `interrupt` resolves first
async fn play_until<H, P, I>(
    driver: &mut AutofillDriver,
    form: &mut FormState,
    highlighter: &mut H,
    presenter: &mut P,
    interrupt: I,
) -> Result<TourOutcome>
where
    H: TourHighlighter,
    P: Presenter,
    I: Future<Output = io::Result<()>>,
{
    let played = tokio::select! {
        result = runner::play(driver, form, highlighter, presenter) => Some(result),
        signal = interrupt => {
            signal.context("Failed to listen for Ctrl+C")?;
            None
        }
    };

    match played {
        Some(result) => Ok(result?),
        None => {
            driver.cancel(highlighter)?;
            Ok(TourOutcome::Cancelled)
        }
    }
}
