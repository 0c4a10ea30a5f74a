//! Core application state and mode management

use std::time::{Duration, Instant};

use compform_core::{
    submit, AutofillDriver, Field, FormState, Preset, Presenter, StepTarget, TourOutcome,
    TourScheduler, TourTimings, BUILD_PRESETS,
};
use tracing::{debug, warn};

use super::highlight::ScreenHighlighter;

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigate between controls, pick choices and presets
    #[default]
    Normal,
    /// Typing into the focused text field
    Edit,
    /// Guided autofill playing; user edits are blocked
    Touring,
    /// Submission notice is open and holds all input
    Notice,
}

impl Mode {
    /// Get display name for status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Edit => "EDIT",
            Mode::Touring => "AUTOFILL",
            Mode::Notice => "NOTICE",
        }
    }

    /// Get color for status bar
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Mode::Normal => Color::Cyan,
            Mode::Edit => Color::Green,
            Mode::Touring => Color::Yellow,
            Mode::Notice => Color::Magenta,
        }
    }
}

/// A focusable control on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    StartTour,
    Field(Field),
    Presets,
    Submit,
}

/// Tab order of the form
pub const CONTROLS: [Control; 10] = [
    Control::StartTour,
    Control::Field(Field::Organization),
    Control::Field(Field::Repository),
    Control::Field(Field::Branch),
    Control::Field(Field::Directory),
    Control::Field(Field::DisplayName),
    Control::Field(Field::Name),
    Control::Field(Field::Description),
    Control::Presets,
    Control::Submit,
];

/// Presets per row in the grid
pub const PRESET_COLUMNS: usize = 4;

/// The notice currently shown in the modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

/// Presenter that parks the notice for the modal popup
#[derive(Debug, Default)]
pub struct NoticeSlot(pub Option<Notice>);

impl Presenter for NoticeSlot {
    fn present(&mut self, title: &str, body: &str) {
        self.0 = Some(Notice {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current input mode
    pub mode: Mode,
    /// The draft being edited
    pub form: FormState,
    /// Index into [`CONTROLS`]
    pub focus: usize,
    /// Cursor within the preset grid
    pub preset_cursor: usize,
    /// Open submission notice
    pub notice: NoticeSlot,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    pub driver: AutofillDriver,
    pub highlighter: ScreenHighlighter,
    pub scheduler: TourScheduler,
}

impl App {
    pub fn new(timings: TourTimings) -> Self {
        Self {
            mode: Mode::Normal,
            form: FormState::new(),
            focus: 1,
            preset_cursor: 0,
            notice: NoticeSlot::default(),
            status_message: None,
            should_quit: false,
            driver: AutofillDriver::with_default_script(timings),
            highlighter: ScreenHighlighter::default(),
            scheduler: TourScheduler::new(),
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn focused(&self) -> Control {
        CONTROLS[self.focus]
    }

    /// Field under focus, if the focused control is a field
    pub fn focused_field(&self) -> Option<Field> {
        match self.focused() {
            Control::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % CONTROLS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + CONTROLS.len() - 1) % CONTROLS.len();
    }

    pub fn focus_control(&mut self, control: Control) {
        if let Some(index) = CONTROLS.iter().position(|c| *c == control) {
            self.focus = index;
        }
    }

    /// Left/right on the focused control
    pub fn move_horizontal(&mut self, forward: bool) {
        match self.focused() {
            Control::Field(field) if field.is_choice() => self.form.cycle_choice(field, forward),
            Control::Presets => {
                let len = BUILD_PRESETS.len();
                self.preset_cursor = if forward {
                    (self.preset_cursor + 1) % len
                } else {
                    (self.preset_cursor + len - 1) % len
                };
            }
            _ => {}
        }
    }

    /// Up/down inside the preset grid; returns false when the move leaves the grid
    pub fn move_preset_row(&mut self, down: bool) -> bool {
        let len = BUILD_PRESETS.len();
        if down && self.preset_cursor + PRESET_COLUMNS < len {
            self.preset_cursor += PRESET_COLUMNS;
            true
        } else if !down && self.preset_cursor >= PRESET_COLUMNS {
            self.preset_cursor -= PRESET_COLUMNS;
            true
        } else {
            false
        }
    }

    pub fn select_preset_at_cursor(&mut self) {
        if let Some(preset) = Preset::from_index(self.preset_cursor) {
            self.form.set_preset(preset);
            self.set_status(format!("Build preset: {preset}"));
        }
    }

    pub fn enter_edit(&mut self) {
        if let Some(field) = self.focused_field() {
            if !field.is_choice() {
                self.mode = Mode::Edit;
                self.set_status(format!("-- EDIT {} --", field.label()));
            }
        }
    }

    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
        self.clear_status();
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.focused_field() {
            self.form.push_char(field, c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field() {
            self.form.pop_char(field);
        }
    }

    /// Begin the guided autofill
    pub fn start_tour(&mut self, now: Instant) {
        match self.driver.start(&mut self.highlighter) {
            Ok(()) => {
                self.mode = Mode::Touring;
                self.scheduler.arm(now, Duration::ZERO);
                self.set_status("Guided autofill running (Esc to stop)");
            }
            Err(err) => {
                warn!(%err, "tour start rejected");
                self.set_status(err.to_string());
            }
        }
    }

    pub fn cancel_tour(&mut self) {
        match self.driver.cancel(&mut self.highlighter) {
            Ok(()) => {
                self.scheduler.clear();
                self.mode = Mode::Normal;
                self.set_status("Guided autofill stopped");
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    /// Run due tour continuations
    pub fn tick(&mut self, now: Instant) -> compform_core::Result<()> {
        let outcome = self.scheduler.fire(
            now,
            &mut self.driver,
            &mut self.form,
            &mut self.highlighter,
            &mut self.notice,
        )?;

        // Keyboard focus follows the tour highlight
        if let Some(target) = self.highlighter.active() {
            let control = match target {
                StepTarget::Field(field) => Control::Field(field),
                StepTarget::PresetButton(preset) => {
                    self.preset_cursor = preset.index();
                    Control::Presets
                }
                StepTarget::SubmitButton => Control::Submit,
            };
            self.focus_control(control);
        }

        if let Some(outcome) = outcome {
            debug!(?outcome, "tour finished in TUI");
            self.mode = if self.notice.0.is_some() {
                Mode::Notice
            } else {
                Mode::Normal
            };
            match outcome {
                TourOutcome::Completed => self.set_status("Guided autofill complete"),
                TourOutcome::Cancelled => self.set_status("Guided autofill stopped"),
                TourOutcome::Aborted { target, .. } => self.set_status(format!(
                    "Guided autofill aborted: '{target}' is not on screen (enlarge the terminal)"
                )),
            }
        }
        Ok(())
    }

    /// Submit the draft and open the notice
    pub fn submit(&mut self) -> compform_core::Result<()> {
        submit(&self.form, &mut self.notice)?;
        self.mode = Mode::Notice;
        Ok(())
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.0 = None;
        self.mode = Mode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_targets() -> HashSet<StepTarget> {
        let mut targets: HashSet<StepTarget> = Field::ALL.into_iter().map(StepTarget::Field).collect();
        targets.extend(Preset::all().map(StepTarget::PresetButton));
        targets.insert(StepTarget::SubmitButton);
        targets
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = App::new(TourTimings::instant());
        assert_eq!(app.focused(), Control::Field(Field::Organization));
        app.focus_prev();
        app.focus_prev();
        assert_eq!(app.focused(), Control::Submit);
        app.focus_next();
        assert_eq!(app.focused(), Control::StartTour);
    }

    #[test]
    fn test_edit_only_on_text_fields() {
        let mut app = App::new(TourTimings::instant());
        app.enter_edit();
        assert_eq!(app.mode, Mode::Normal);

        app.focus_control(Control::Field(Field::Name));
        app.enter_edit();
        assert_eq!(app.mode, Mode::Edit);
        app.type_char('s');
        app.type_char('v');
        app.type_char('c');
        app.backspace();
        assert_eq!(app.form.field(Field::Name), "sv");
    }

    #[test]
    fn test_preset_grid_navigation() {
        let mut app = App::new(TourTimings::instant());
        app.focus_control(Control::Presets);
        app.move_horizontal(false);
        assert_eq!(app.preset_cursor, BUILD_PRESETS.len() - 1);
        assert!(!app.move_preset_row(true));
        assert!(app.move_preset_row(false));
        app.select_preset_at_cursor();
        assert_eq!(app.form.preset().map(Preset::name), Some("PHP"));
    }

    #[test]
    fn test_instant_tour_ends_in_notice() {
        let mut app = App::new(TourTimings::instant());
        app.highlighter.set_visible(all_targets());

        let now = Instant::now();
        app.start_tour(now);
        assert_eq!(app.mode, Mode::Touring);
        app.tick(now).unwrap();

        assert_eq!(app.mode, Mode::Notice);
        let notice = app.notice.0.clone().unwrap();
        assert_eq!(notice.title, "Component Created");
        assert!(notice.body.contains("\"buildPreset\": \"Go\""));

        app.dismiss_notice();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.form.field(Field::Branch), "main");
    }

    #[test]
    fn test_tour_aborts_when_target_offscreen() {
        let mut app = App::new(TourTimings::instant());
        let mut visible = all_targets();
        visible.remove(&StepTarget::SubmitButton);
        app.highlighter.set_visible(visible);

        let now = Instant::now();
        app.start_tour(now);
        app.tick(now).unwrap();

        assert_eq!(app.mode, Mode::Normal);
        assert!(app.notice.0.is_none());
        assert!(app.status_message.as_deref().unwrap().contains("aborted"));
        assert_eq!(app.form.preset(), Some(Preset::GO));
    }

    #[test]
    fn test_double_start_keeps_running_tour() {
        let mut app = App::new(TourTimings::default());
        app.highlighter.set_visible(all_targets());

        let now = Instant::now();
        app.start_tour(now);
        app.tick(now).unwrap();
        app.start_tour(now);

        assert_eq!(app.mode, Mode::Touring);
        assert!(app.status_message.as_deref().unwrap().contains("already running"));

        app.cancel_tour();
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.scheduler.is_armed());
    }
}
