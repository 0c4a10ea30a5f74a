//! Play a tour to completion outside an event loop.

use std::time::Duration;

use crate::driver::{AutofillDriver, Tick, TourOutcome};
use crate::error::{Result, TourError};
use crate::form::FormState;
use crate::highlight::TourHighlighter;
use crate::submit::{submit, Presenter};

/// Drive a started tour to the end, handing each requested delay to `wait`.
///
/// Submits through `presenter` when the submit step fires. Fails with
/// [`TourError::NotRunning`] if the driver was never started.
pub fn drive<H, P, W>(
    driver: &mut AutofillDriver,
    form: &mut FormState,
    highlighter: &mut H,
    presenter: &mut P,
    mut wait: W,
) -> Result<TourOutcome>
where
    H: TourHighlighter + ?Sized,
    P: Presenter + ?Sized,
    W: FnMut(Duration),
{
    loop {
        match driver.advance(form, highlighter) {
            Tick::Wait(delay) => wait(delay),
            Tick::Submit => {
                submit(form, presenter)?;
            }
            Tick::Finished(outcome) => return Ok(outcome),
            Tick::Idle => return Err(TourError::NotRunning.into()),
        }
    }
}

/// Async playback on tokio timers.
#[cfg(feature = "rt")]
pub async fn play<H, P>(
    driver: &mut AutofillDriver,
    form: &mut FormState,
    highlighter: &mut H,
    presenter: &mut P,
) -> Result<TourOutcome>
where
    H: TourHighlighter + ?Sized,
    P: Presenter + ?Sized,
{
    loop {
        match driver.advance(form, highlighter) {
            Tick::Wait(delay) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Tick::Submit => {
                submit(form, presenter)?;
            }
            Tick::Finished(outcome) => return Ok(outcome),
            Tick::Idle => return Err(TourError::NotRunning.into()),
        }
    }
}
