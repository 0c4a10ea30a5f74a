//! Interactive component form
//!
//! - Repository, component and build sections with keyboard navigation
//! - Normal/Edit mode switching (vim-style)
//! - Guided autofill that types a demo component in and submits it
//! - Modal notice showing the submitted component

pub mod app;
pub mod event;
pub mod highlight;
pub mod terminal;
pub mod ui;

pub use terminal::run;
