//! Fixed option lists shown by the form.

/// Build presets, in grid order.
pub const BUILD_PRESETS: &[&str] = &[
    "Python",
    "Java",
    "NodeJS",
    "Go",
    ".NET",
    "Ballerina",
    "PHP",
    "Ruby",
    "Docker",
    "WSO2 MI",
    "Prism Mock",
];

/// Sentinel reported in a submission when no preset is selected.
pub const NO_PRESET: &str = "None";

pub const ORGANIZATIONS: &[&str] = &["hanzjk", "choreo", "sjp"];

pub const REPOSITORIES: &[&str] = &[
    "samples-for-connections-testing",
    "choreo-samples",
    "choreo-marketplace",
];

pub const BRANCHES: &[&str] = &["main", "dev", "dev-prod"];

/// One entry of [`BUILD_PRESETS`]. Only constructible from the list, so a
/// selected preset is always a known one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preset(usize);

impl Preset {
    pub const GO: Preset = Preset(3);

    /// Look up a preset by exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        BUILD_PRESETS.iter().position(|p| *p == name).map(Preset)
    }

    /// Preset at a grid position.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < BUILD_PRESETS.len()).then_some(Preset(index))
    }

    pub fn all() -> impl Iterator<Item = Preset> {
        (0..BUILD_PRESETS.len()).map(Preset)
    }

    pub fn name(self) -> &'static str {
        BUILD_PRESETS[self.0]
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
