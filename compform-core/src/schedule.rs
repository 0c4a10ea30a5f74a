//! Deadline bookkeeping for driving a tour from a polling event loop.

use std::time::{Duration, Instant};

use crate::driver::{AutofillDriver, Tick, TourOutcome};
use crate::error::Result;
use crate::form::FormState;
use crate::highlight::TourHighlighter;
use crate::submit::{submit, Presenter};

/// Holds at most one pending tour continuation.
#[derive(Debug, Default, Clone)]
pub struct TourScheduler {
    deadline: Option<Instant>,
}

impl TourScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next advance `delay` after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// How long an event loop may block before the next continuation is due,
    /// capped at `idle`.
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }

    /// Run every continuation that is due at `now`.
    ///
    /// Zero-length waits are followed immediately, so instant timings finish
    /// the whole tour in one call. Each wait is measured from the deadline
    /// that just passed, so a late poll does not push later steps back.
    /// Returns the outcome once the tour ends.
    pub fn fire<H, P>(
        &mut self,
        now: Instant,
        driver: &mut AutofillDriver,
        form: &mut FormState,
        highlighter: &mut H,
        presenter: &mut P,
    ) -> Result<Option<TourOutcome>>
    where
        H: TourHighlighter + ?Sized,
        P: Presenter + ?Sized,
    {
        while let Some(due_at) = self.deadline.filter(|deadline| now >= *deadline) {
            match driver.advance(form, highlighter) {
                Tick::Wait(delay) => self.arm(due_at, delay),
                Tick::Submit => {
                    self.arm(due_at, Duration::ZERO);
                    submit(form, presenter)?;
                }
                Tick::Finished(outcome) => {
                    self.clear();
                    return Ok(Some(outcome));
                }
                Tick::Idle => self.clear(),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_timeout_caps_at_idle() {
        let now = Instant::now();
        let idle = Duration::from_millis(100);
        let mut scheduler = TourScheduler::new();
        assert_eq!(scheduler.poll_timeout(now, idle), idle);

        scheduler.arm(now, Duration::from_millis(40));
        assert_eq!(scheduler.poll_timeout(now, idle), Duration::from_millis(40));

        scheduler.arm(now, Duration::from_millis(500));
        assert_eq!(scheduler.poll_timeout(now, idle), idle);

        // Overdue deadlines poll without blocking
        let later = now + Duration::from_secs(1);
        assert_eq!(scheduler.poll_timeout(later, idle), Duration::ZERO);
    }

    #[test]
    fn test_due_only_after_deadline() {
        let now = Instant::now();
        let mut scheduler = TourScheduler::new();
        assert!(!scheduler.is_due(now));

        scheduler.arm(now, Duration::from_millis(50));
        assert!(!scheduler.is_due(now));
        assert!(scheduler.is_due(now + Duration::from_millis(50)));

        scheduler.clear();
        assert!(!scheduler.is_armed());
    }
}
