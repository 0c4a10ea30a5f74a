pub mod catalog;
pub mod config;
pub mod driver;
pub mod error;
pub mod form;
pub mod highlight;
pub mod runner;
pub mod schedule;
pub mod submit;
pub mod tour;

pub use catalog::{Preset, BUILD_PRESETS, NO_PRESET};
pub use config::CompformConfig;
pub use driver::{AutofillDriver, Tick, TourOutcome, TourPhase};
pub use error::{CompformError, FormError, Result, TourError};
pub use form::{Field, FieldKind, FormState, Snapshot};
pub use highlight::TourHighlighter;
pub use schedule::TourScheduler;
pub use submit::{submit, Presenter};
pub use tour::{default_script, DisplayOptions, StepTarget, TourStep, TourTimings};
