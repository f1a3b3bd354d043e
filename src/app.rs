//! Application state and key handling for the demo form

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use masinton_form::{
    Form, FormConfig, FormStore, ValidateOptions, ValidationOutcome, Watch,
};

/// Buttons on the action row, in display order
pub const BUTTONS: [&str; 2] = ["Submit", "Reset"];

/// Main application struct
pub struct App {
    /// Form layout and labels
    pub config: FormConfig,
    /// Form state
    pub store: FormStore,
    /// Focused row: field index, or `config.fields.len()` for the button row
    pub active_field: usize,
    /// Selected button when the button row is focused
    pub selected_button: usize,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
    /// JSON of the last accepted submission
    pub last_payload: Option<String>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App from a form configuration
    pub fn new(config: FormConfig) -> Result<Self> {
        let validation = config.to_validation()?;
        let store = FormStore::with_validation(config.to_form(), validation)
            .with_listener(|form: &Form, watch: Watch| {
                tracing::trace!("Snapshot changed: {} fields, edited={}", form.len(), watch.edited);
            });

        Ok(Self {
            config,
            store,
            active_field: 0,
            selected_button: 0,
            status_message: None,
            last_payload: None,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Number of focusable rows (fields plus the button row)
    fn row_count(&self) -> usize {
        self.config.fields.len() + 1
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field == self.config.fields.len()
    }

    /// Name of the focused field, if a field is focused
    pub fn active_field_name(&self) -> Option<&str> {
        self.config
            .fields
            .get(self.active_field)
            .map(|f| f.name.as_str())
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % self.row_count();
    }

    pub fn prev_field(&mut self) {
        if self.active_field == 0 {
            self.active_field = self.row_count() - 1;
        } else {
            self.active_field -= 1;
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_buttons = self.is_buttons_row_active();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit()?;
            }
            KeyCode::Char('r') if key.modifiers.contains(crate::platform::SHORTCUT_MODIFIER) => {
                self.reset();
            }
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Left if on_buttons => {
                if self.selected_button == 0 {
                    self.selected_button = BUTTONS.len() - 1;
                } else {
                    self.selected_button -= 1;
                }
            }
            KeyCode::Right if on_buttons => {
                self.selected_button = (self.selected_button + 1) % BUTTONS.len();
            }
            KeyCode::Enter if on_buttons => match self.selected_button {
                0 => self.submit()?,
                _ => self.reset(),
            },
            KeyCode::Enter => self.submit()?,
            KeyCode::Char(c) if !on_buttons => self.input_char(c)?,
            KeyCode::Backspace if !on_buttons => self.backspace()?,
            _ => {}
        }
        Ok(())
    }

    /// Current text of the focused field
    fn active_text(&self) -> Option<(String, String)> {
        let name = self.active_field_name()?;
        let text = self
            .store
            .value(name)
            .map(|v| v.as_text().into_owned())
            .unwrap_or_default();
        Some((name.to_string(), text))
    }

    fn input_char(&mut self, c: char) -> Result<()> {
        if let Some((name, mut text)) = self.active_text() {
            text.push(c);
            self.store.change(&name, text)?;
        }
        Ok(())
    }

    fn backspace(&mut self) -> Result<()> {
        if let Some((name, mut text)) = self.active_text() {
            if text.pop().is_some() {
                self.store.change(&name, text)?;
            }
        }
        Ok(())
    }

    /// Validate, and on success commit the payload as the new baseline
    pub fn submit(&mut self) -> Result<()> {
        let outcome = self.store.validate(&ValidateOptions::all());
        match outcome {
            ValidationOutcome::Invalid => {
                self.status_message = Some("Please fix the highlighted fields".to_string());
            }
            ValidationOutcome::Valid | ValidationOutcome::Skipped => {
                let payload = self.store.submit();
                let json = serde_json::to_string(&payload)?;
                tracing::info!("Form submitted: {json}");
                self.store.commit_baseline(&payload);
                self.status_message = Some(if outcome.is_skipped() {
                    "Submitted without validation".to_string()
                } else {
                    "Submitted!".to_string()
                });
                self.last_payload = Some(json);
            }
        }
        Ok(())
    }

    /// Drop edits since the last submission
    pub fn reset(&mut self) {
        self.store.reset();
        self.status_message = Some("Form reset".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masinton_form::FieldValue;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn login_app() -> App {
        App::new(FormConfig::default()).unwrap()
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_starts_on_first_field() {
            let app = login_app();
            assert_eq!(app.active_field_name(), Some("username"));
            assert!(!app.is_buttons_row_active());
        }

        #[test]
        fn test_tab_cycles_through_buttons_row() {
            let mut app = login_app();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(app.active_field_name(), Some("password"));
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert!(app.is_buttons_row_active());
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(app.active_field, 0);
        }

        #[test]
        fn test_backtab_wraps_to_buttons_row() {
            let mut app = login_app();
            app.handle_key(key(KeyCode::BackTab)).unwrap();
            assert!(app.is_buttons_row_active());
        }

        #[test]
        fn test_button_selection_wraps() {
            let mut app = login_app();
            app.active_field = 2;
            app.handle_key(key(KeyCode::Left)).unwrap();
            assert_eq!(app.selected_button, 1);
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(app.selected_button, 0);
        }

        #[test]
        fn test_escape_quits() {
            let mut app = login_app();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(app.should_quit());
        }

        #[test]
        fn test_ctrl_c_quits() {
            let mut app = login_app();
            app.handle_key(ctrl('c')).unwrap();
            assert!(app.should_quit());
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn test_typing_changes_active_field() {
            let mut app = login_app();
            type_text(&mut app, "alice");
            assert_eq!(app.store.value("username"), Some(&FieldValue::from("alice")));
            assert!(app.store.is_edited());
        }

        #[test]
        fn test_backspace_removes_last_char() {
            let mut app = login_app();
            type_text(&mut app, "ab");
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.store.value("username"), Some(&FieldValue::from("a")));
        }

        #[test]
        fn test_backspace_back_to_empty_is_unedited() {
            let mut app = login_app();
            type_text(&mut app, "a");
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert!(!app.store.is_edited());
        }

        #[test]
        fn test_typing_on_buttons_row_is_ignored() {
            let mut app = login_app();
            app.active_field = 2;
            type_text(&mut app, "x");
            assert!(!app.store.is_edited());
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn test_submit_empty_form_shows_errors() {
            let mut app = login_app();
            app.handle_key(key(KeyCode::Enter)).unwrap();

            let form = app.store.form();
            assert!(form.get("username").unwrap().error);
            assert!(form.get("password").unwrap().error);
            assert!(app.last_payload.is_none());
            assert_eq!(
                app.status_message.as_deref(),
                Some("Please fix the highlighted fields")
            );
        }

        #[test]
        fn test_submit_valid_form_commits_baseline() {
            let mut app = login_app();
            type_text(&mut app, "alice");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "pw");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(
                app.last_payload.as_deref(),
                Some(r#"{"password":"pw","username":"alice"}"#)
            );
            assert!(!app.store.is_edited());
            assert_eq!(app.store.baseline().get("username").unwrap().value, FieldValue::from("alice"));
        }

        #[test]
        fn test_reset_button_restores_last_submission() {
            let mut app = login_app();
            type_text(&mut app, "alice");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "pw");
            app.submit().unwrap();

            app.active_field = 0;
            type_text(&mut app, "xyz");
            assert!(app.store.is_edited());

            app.active_field = 2;
            app.selected_button = 1;
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(!app.store.is_edited());
            assert_eq!(app.store.value("username"), Some(&FieldValue::from("alice")));
        }

        #[test]
        fn test_form_without_rules_submits_unvalidated() {
            let mut config = FormConfig::default();
            config.rules.clear();
            let mut app = App::new(config).unwrap();
            app.submit().unwrap();
            assert_eq!(
                app.status_message.as_deref(),
                Some("Submitted without validation")
            );
            assert!(app.last_payload.is_some());
        }

        #[test]
        fn test_bad_rule_pattern_fails_construction() {
            let mut config = FormConfig::default();
            config.rules.get_mut("username").unwrap()[0].pattern = "(".to_string();
            assert!(App::new(config).is_err());
        }
    }
}
