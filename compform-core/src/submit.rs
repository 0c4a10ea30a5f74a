//! Submission: snapshot the draft and show it to the user.

use tracing::info;

use crate::error::{CompformError, Result};
use crate::form::{FormState, Snapshot};

/// Title of the notice shown after a submission.
pub const NOTICE_TITLE: &str = "Component Created";

/// Synchronous "show this to the user" primitive.
///
/// The TUI opens a modal that holds input until dismissed; the CLI prints.
pub trait Presenter {
    fn present(&mut self, title: &str, body: &str);
}

/// Human-readable notice body: the snapshot as pretty JSON.
pub fn notice_body(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).map_err(|e| CompformError::json("submission snapshot", e))
}

/// Full notice text as one string.
pub fn notice_text(snapshot: &Snapshot) -> Result<String> {
    Ok(format!("{NOTICE_TITLE}:\n\n{}", notice_body(snapshot)?))
}

/// Read a snapshot of the draft and hand it to the presenter.
///
/// Never mutates the draft. Returns the snapshot that was presented.
pub fn submit<P: Presenter + ?Sized>(form: &FormState, presenter: &mut P) -> Result<Snapshot> {
    let snapshot = form.snapshot_for_submission();
    let body = notice_body(&snapshot)?;
    info!(
        name = %snapshot.name,
        repository = %snapshot.repository,
        preset = %snapshot.build_preset,
        "component submitted"
    );
    presenter.present(NOTICE_TITLE, &body);
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Field;

    #[derive(Default)]
    struct Captured(Vec<(String, String)>);

    impl Presenter for Captured {
        fn present(&mut self, title: &str, body: &str) {
            self.0.push((title.to_string(), body.to_string()));
        }
    }

    #[test]
    fn test_notice_lists_keys_in_form_order() {
        let mut form = FormState::new();
        form.set_field(Field::DisplayName, "Greeting Service");
        let text = notice_text(&form.snapshot_for_submission()).unwrap();

        assert!(text.starts_with("Component Created:\n\n{"));
        let keys = [
            "\"organization\"",
            "\"repository\"",
            "\"branch\"",
            "\"directory\"",
            "\"displayName\"",
            "\"name\"",
            "\"description\"",
            "\"buildPreset\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("\"displayName\": \"Greeting Service\""));
        assert!(text.contains("\"buildPreset\": \"None\""));
    }

    #[test]
    fn test_submit_presents_once_and_keeps_draft() {
        let mut form = FormState::new();
        form.set_preset_by_name("Docker").unwrap();
        let before = form.clone();
        let mut presenter = Captured::default();

        let snapshot = submit(&form, &mut presenter).unwrap();

        assert_eq!(snapshot.build_preset, "Docker");
        assert_eq!(form, before);
        assert_eq!(presenter.0.len(), 1);
        assert_eq!(presenter.0[0].0, "Component Created");
        assert!(presenter.0[0].1.contains("\"buildPreset\": \"Docker\""));
    }
}
