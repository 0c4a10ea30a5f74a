//! Component draft and the single mutation entry point used by both manual
//! editing and the autofill driver.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::trace;

use crate::catalog::{Preset, BRANCHES, NO_PRESET, ORGANIZATIONS, REPOSITORIES};
use crate::error::FormError;

/// The seven editable fields of a component draft, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Organization,
    Repository,
    Branch,
    Directory,
    DisplayName,
    Name,
    Description,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Closed choice with a placeholder entry and a fixed option list
    Choice {
        placeholder: &'static str,
        options: &'static [&'static str],
    },
    /// Free text with an optional hint shown while empty
    Text { placeholder: Option<&'static str> },
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Organization,
        Field::Repository,
        Field::Branch,
        Field::Directory,
        Field::DisplayName,
        Field::Name,
        Field::Description,
    ];

    /// Stable camelCase key, used for by-name lookup and in submissions.
    pub fn key(self) -> &'static str {
        match self {
            Field::Organization => "organization",
            Field::Repository => "repository",
            Field::Branch => "branch",
            Field::Directory => "directory",
            Field::DisplayName => "displayName",
            Field::Name => "name",
            Field::Description => "description",
        }
    }

    /// Label rendered next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Organization => "Organization",
            Field::Repository => "Repository",
            Field::Branch => "Branch",
            Field::Directory => "Component Directory",
            Field::DisplayName => "Display Name",
            Field::Name => "Name",
            Field::Description => "Description",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Organization => FieldKind::Choice {
                placeholder: "-- Select Organization --",
                options: ORGANIZATIONS,
            },
            Field::Repository => FieldKind::Choice {
                placeholder: "-- Select Repo --",
                options: REPOSITORIES,
            },
            Field::Branch => FieldKind::Choice {
                placeholder: "-- Select Branch --",
                options: BRANCHES,
            },
            Field::Directory | Field::Name => FieldKind::Text { placeholder: None },
            Field::DisplayName => FieldKind::Text {
                placeholder: Some("Enter display name here"),
            },
            Field::Description => FieldKind::Text {
                placeholder: Some("Enter description here"),
            },
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self.kind(), FieldKind::Choice { .. })
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| FormError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// Read-only view of a draft taken at submit time.
///
/// Field order here is the order of keys in the rendered notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub organization: String,
    pub repository: String,
    pub branch: String,
    pub directory: String,
    pub display_name: String,
    pub name: String,
    pub description: String,
    pub build_preset: String,
}

/// Holds the component draft and the selected build preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: [String; 7],
    preset: Option<Preset>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Fresh draft: every field empty except the directory, which starts at "/".
    pub fn new() -> Self {
        let mut values: [String; 7] = Default::default();
        values[Field::Directory.slot()] = "/".to_string();
        Self {
            values,
            preset: None,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        &self.values[field.slot()]
    }

    /// Overwrite a field. No validation, trimming, or coercion.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        trace!(field = %field, value = %value, "set field");
        self.values[field.slot()] = value;
    }

    /// Overwrite a field addressed by its camelCase key.
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field: Field = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn preset(&self) -> Option<Preset> {
        self.preset
    }

    /// Select a preset, replacing any previous selection.
    pub fn set_preset(&mut self, preset: Preset) {
        trace!(preset = %preset, "set preset");
        self.preset = Some(preset);
    }

    pub fn set_preset_by_name(&mut self, name: &str) -> Result<(), FormError> {
        let preset = Preset::from_name(name).ok_or_else(|| FormError::UnknownPreset {
            name: name.to_string(),
        })?;
        self.set_preset(preset);
        Ok(())
    }

    pub fn clear_preset(&mut self) {
        self.preset = None;
    }

    /// Step a closed-choice field through its placeholder and options.
    ///
    /// A value that is not one of the options (e.g. mid-way through autofill
    /// typing) is treated as the placeholder. Text fields are left alone.
    pub fn cycle_choice(&mut self, field: Field, forward: bool) {
        let FieldKind::Choice { options, .. } = field.kind() else {
            return;
        };
        // Slot 0 is the empty placeholder
        let slots = options.len() + 1;
        let current = options
            .iter()
            .position(|opt| *opt == self.field(field))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        let value = if next == 0 { "" } else { options[next - 1] };
        self.set_field(field, value);
    }

    /// Append a typed character to a text field.
    pub fn push_char(&mut self, field: Field, c: char) {
        let mut value = self.field(field).to_string();
        value.push(c);
        self.set_field(field, value);
    }

    /// Remove the last character of a text field.
    pub fn pop_char(&mut self, field: Field) {
        let mut value = self.field(field).to_string();
        if value.pop().is_some() {
            self.set_field(field, value);
        }
    }

    /// Draft merged with the preset, the preset falling back to "None".
    pub fn snapshot_for_submission(&self) -> Snapshot {
        Snapshot {
            organization: self.field(Field::Organization).to_string(),
            repository: self.field(Field::Repository).to_string(),
            branch: self.field(Field::Branch).to_string(),
            directory: self.field(Field::Directory).to_string(),
            display_name: self.field(Field::DisplayName).to_string(),
            name: self.field(Field::Name).to_string(),
            description: self.field(Field::Description).to_string(),
            build_preset: self
                .preset
                .map_or_else(|| NO_PRESET.to_string(), |p| p.name().to_string()),
        }
    }
}
