//! Step descriptors and timings for the guided autofill tour.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Preset;
use crate::form::Field;

/// What a tour step points at. Stable keys, never UI handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepTarget {
    Field(Field),
    /// The button of a specific preset in the preset grid
    PresetButton(Preset),
    SubmitButton,
}

impl fmt::Display for StepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepTarget::Field(field) => write!(f, "{field}"),
            StepTarget::PresetButton(preset) => write!(f, "preset:{preset}"),
            StepTarget::SubmitButton => f.write_str("submit"),
        }
    }
}

/// One entry of a tour script. The variant is the step kind; each kind
/// carries its own target key and literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourStep {
    /// Type a literal into a field one character at a time
    Type { field: Field, text: String },
    /// Select a preset directly, no animation
    Select(Preset),
    /// Trigger submission; always the last step
    Submit,
}

impl TourStep {
    pub fn type_into(field: Field, text: impl Into<String>) -> Self {
        TourStep::Type {
            field,
            text: text.into(),
        }
    }

    pub fn select(preset: Preset) -> Self {
        TourStep::Select(preset)
    }

    pub fn submit() -> Self {
        TourStep::Submit
    }

    pub fn target(&self) -> StepTarget {
        match self {
            TourStep::Type { field, .. } => StepTarget::Field(*field),
            TourStep::Select(preset) => StepTarget::PresetButton(*preset),
            TourStep::Submit => StepTarget::SubmitButton,
        }
    }
}

/// The scripted demo: fill a Go greeting service and submit it.
pub fn default_script() -> Vec<TourStep> {
    vec![
        TourStep::type_into(Field::Organization, "hanzjk"),
        TourStep::type_into(Field::Repository, "samples-for-connections-testing"),
        TourStep::type_into(Field::Branch, "main"),
        TourStep::type_into(Field::Directory, "/greeting-service-go"),
        TourStep::type_into(Field::DisplayName, "Greeting Service"),
        TourStep::type_into(Field::Name, "greeting-service"),
        TourStep::type_into(Field::Description, "A Go-based greeting microservice"),
        TourStep::select(Preset::GO),
        TourStep::submit(),
    ]
}

/// Presentation hints handed to the highlighter when the tour is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    pub show_bullets: bool,
    pub show_step_numbers: bool,
    pub show_progress: bool,
    pub overlay_opacity: f32,
    /// Block user edits while the tour plays
    pub disable_interaction: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_bullets: false,
            show_step_numbers: false,
            show_progress: false,
            overlay_opacity: 0.0,
            disable_interaction: true,
        }
    }
}

/// Delays between tour actions, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourTimings {
    /// Pause after each typed prefix
    pub char_delay_ms: u64,
    /// Pause after a step's action before moving on
    pub settle_delay_ms: u64,
    /// Pause on the submit step before submitting
    pub submit_delay_ms: u64,
}

impl Default for TourTimings {
    fn default() -> Self {
        Self {
            char_delay_ms: 50,
            settle_delay_ms: 500,
            submit_delay_ms: 300,
        }
    }
}

impl TourTimings {
    /// All delays zero, for tests and `--instant` playback.
    pub fn instant() -> Self {
        Self {
            char_delay_ms: 0,
            settle_delay_ms: 0,
            submit_delay_ms: 0,
        }
    }

    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

/// First `len` characters of `s`, counted in chars rather than bytes.
pub fn char_prefix(s: &str, len: usize) -> &str {
    match s.char_indices().nth(len) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

/// Every intermediate value of typing `s`: the empty string through `s` itself.
pub fn typing_prefixes(s: &str) -> impl Iterator<Item = &str> + '_ {
    let n = s.chars().count();
    (0..=n).map(move |i| char_prefix(s, i))
}
