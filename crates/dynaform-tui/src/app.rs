//! Application state, update logic, and view rendering.
//!
//! The app is a thin presentation layer over [`dynaform::FormSession`]:
//! every user action maps to one session operation, and the view is
//! re-rendered from session state after each update.

use dynaform::{
    fields_for, FieldDescriptor, FieldKind, FormSession, FormType, SubmissionRecord, EXPIRY_FIELD,
};
use unicode_width::UnicodeWidthStr;

use crate::keys::{KeyMsg, KeyType};
use crate::program::{Flow, Model};
use crate::theme::Theme;

/// Which zone of the screen receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The form: type selector, fields, submit button.
    #[default]
    Form,
    /// The list of submitted records.
    Submissions,
}

/// Width of the progress bar, in cells.
const PROGRESS_BAR_WIDTH: usize = 24;

/// The terminal application.
pub struct App {
    session: FormSession,
    theme: Theme,
    focus: Focus,
    /// Form cursor: 0 is the type selector, then one slot per field, then
    /// the submit button.
    cursor: usize,
    /// Highlighted record in the submissions list.
    selected: usize,
}

impl App {
    /// Creates the app with an initial form type.
    #[must_use]
    pub fn new(form_type: FormType, theme: Theme) -> Self {
        Self {
            session: FormSession::new(form_type),
            theme,
            focus: Focus::Form,
            cursor: 0,
            selected: 0,
        }
    }

    /// The underlying session, for assertions in tests.
    #[must_use]
    pub const fn session(&self) -> &FormSession {
        &self.session
    }

    fn submit_slot(&self) -> usize {
        self.session.fields().len() + 1
    }

    /// The field under the cursor, when the cursor is on a field slot.
    fn focused_field(&self) -> Option<&'static FieldDescriptor> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.session.fields().get(i))
    }

    fn cursor_down(&mut self) {
        if self.cursor < self.submit_slot() {
            self.cursor += 1;
        }
    }

    fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cycle_form_type(&mut self, forward: bool) {
        let all = FormType::all();
        let current = all
            .iter()
            .position(|t| *t == self.session.form_type())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % all.len()
        } else {
            (current + all.len() - 1) % all.len()
        };
        self.session.set_form_type(all[next]);
        self.cursor = 0;
    }

    fn cycle_choice(&mut self, field: &FieldDescriptor, forward: bool) {
        let Some(choices) = field.kind.choices() else {
            return;
        };
        let current = choices
            .iter()
            .position(|c| *c == self.session.value(field.name));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % choices.len(),
            (Some(i), false) => (i + choices.len() - 1) % choices.len(),
        };
        self.session.set_value(field.name, choices[next]);
    }

    fn insert_char(&mut self, c: char) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.kind.is_numeric() && !c.is_ascii_digit() {
            return;
        }
        if field.kind.choices().is_some() {
            return;
        }
        let mut value = self.session.value(field.name).to_string();
        value.push(c);
        self.session.set_value(field.name, &value);
    }

    fn delete_char(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = self.session.value(field.name).to_string();
        value.pop();
        self.session.set_value(field.name, &value);
    }

    fn handle_form_key(&mut self, msg: &KeyMsg) -> Flow {
        match msg.key_type {
            KeyType::CtrlC => {
                tracing::info!("quit requested");
                return Flow::Quit;
            }
            KeyType::Esc => {
                if !self.session.submissions().is_empty() {
                    self.selected = self.selected.min(self.session.submissions().len() - 1);
                    self.focus = Focus::Submissions;
                    tracing::debug!(
                        records = self.session.submissions().len(),
                        "focus moved to submissions"
                    );
                }
            }
            KeyType::Tab | KeyType::Down => self.cursor_down(),
            KeyType::ShiftTab | KeyType::Up => self.cursor_up(),
            KeyType::Left | KeyType::Right => {
                let forward = msg.key_type == KeyType::Right;
                if self.cursor == 0 {
                    self.cycle_form_type(forward);
                } else if let Some(field) = self.focused_field() {
                    self.cycle_choice(field, forward);
                }
            }
            KeyType::Enter => {
                if self.cursor == self.submit_slot() {
                    self.session.submit();
                } else {
                    self.cursor_down();
                }
            }
            KeyType::Space => self.insert_char(' '),
            KeyType::Backspace => self.delete_char(),
            KeyType::Runes => {
                for c in &msg.runes {
                    self.insert_char(*c);
                }
            }
        }
        Flow::Continue
    }

    fn handle_submissions_key(&mut self, msg: &KeyMsg) -> Flow {
        let count = self.session.submissions().len();
        match msg.key_type {
            KeyType::CtrlC => {
                tracing::info!("quit requested");
                return Flow::Quit;
            }
            KeyType::Esc => {
                self.focus = Focus::Form;
                tracing::debug!("focus moved to form");
            }
            KeyType::Up => self.selected = self.selected.saturating_sub(1),
            KeyType::Down => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            KeyType::Runes => match msg.runes.as_slice() {
                ['q'] => {
                    tracing::info!("quit requested");
                    return Flow::Quit;
                }
                ['k'] => self.selected = self.selected.saturating_sub(1),
                ['j'] => {
                    if self.selected + 1 < count {
                        self.selected += 1;
                    }
                }
                ['e'] => {
                    self.session.edit_record(self.selected);
                    self.focus = Focus::Form;
                    self.cursor = 1;
                }
                ['d'] => {
                    self.session.delete_record(self.selected);
                    let remaining = self.session.submissions().len();
                    if remaining == 0 {
                        self.focus = Focus::Form;
                        self.selected = 0;
                    } else {
                        self.selected = self.selected.min(remaining - 1);
                    }
                }
                _ => {}
            },
            _ => {}
        }
        Flow::Continue
    }

    // --- rendering -----------------------------------------------------------

    fn label_column_width(&self) -> usize {
        self.session
            .fields()
            .iter()
            .map(|f| f.label.width())
            .max()
            .unwrap_or(0)
    }

    fn render_type_selector(&self) -> String {
        let focused = self.focus == Focus::Form && self.cursor == 0;
        let marker = if focused { ">" } else { " " };
        let label = if focused {
            self.theme.focus("Form Type:")
        } else {
            self.theme.muted("Form Type:")
        };
        let value = format!("< {} >", self.session.form_type().label());
        format!("{marker} {label} {value}")
    }

    fn render_field(&self, index: usize, field: &FieldDescriptor, width: usize) -> Vec<String> {
        let focused = self.focus == Focus::Form && self.cursor == index + 1;
        let marker = if focused { ">" } else { " " };

        let mut label = format!("{}:", field.label);
        if field.required {
            label.push('*');
        }
        let pad = " ".repeat((width + 2).saturating_sub(label.width()));
        let label = if focused {
            self.theme.focus(&label)
        } else {
            label
        };

        let raw = self.session.value(field.name);
        let shown = match field.kind {
            FieldKind::Password => "\u{2022}".repeat(raw.chars().count()),
            FieldKind::Select(_) => {
                if raw.is_empty() {
                    self.theme.muted("(choose with \u{2190}/\u{2192})")
                } else {
                    format!("< {raw} >")
                }
            }
            FieldKind::Text | FieldKind::Number => raw.to_string(),
        };
        let cursor_mark = if focused && !matches!(field.kind, FieldKind::Select(_)) {
            "_"
        } else {
            ""
        };

        let mut lines = vec![format!("{marker} {label}{pad}{shown}{cursor_mark}")];

        let detail_pad = " ".repeat(width + 4);
        if let Some(error) = self.session.error(field.name) {
            lines.push(format!("{detail_pad}{}", self.theme.error(&format!("! {error}"))));
        } else if field.name == EXPIRY_FIELD {
            lines.push(format!("{detail_pad}{}", self.theme.muted("Format: MM/DD/YYYY")));
        }
        lines
    }

    fn render_progress(&self) -> String {
        let progress = self.session.progress();
        let percent = progress.round() as usize;
        let filled = (progress / 100.0 * PROGRESS_BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(PROGRESS_BAR_WIDTH);
        let bar = format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(PROGRESS_BAR_WIDTH - filled)
        );
        format!("  Progress: {bar} {percent}%")
    }

    fn render_submit(&self) -> String {
        let focused = self.focus == Focus::Form && self.cursor == self.submit_slot();
        let marker = if focused { ">" } else { " " };
        let button = if self.session.has_errors() {
            self.theme.muted("[ Submit ]")
        } else if focused {
            self.theme.focus("[ Submit ]")
        } else {
            "[ Submit ]".to_string()
        };
        format!("{marker} {button}")
    }

    fn render_record(&self, index: usize, record: &SubmissionRecord) -> Vec<String> {
        let selected = self.focus == Focus::Submissions && index == self.selected;
        let marker = if selected { ">" } else { " " };
        let header = format!("#{} {}", index + 1, record.form_type().label());
        let header = if selected {
            self.theme.focus(&header)
        } else {
            header
        };

        let mut lines = vec![format!("{marker} {header}")];
        let catalog_fields = fields_for(record.form_type());
        for field in catalog_fields {
            if let Some(value) = record.value(field.name) {
                lines.push(format!("     {}: {value}", field.label));
            }
        }
        // Values carried over from another field set still show, keyed by
        // their raw name.
        let mut extras: Vec<_> = record
            .values()
            .iter()
            .filter(|(name, _)| !catalog_fields.iter().any(|f| f.name == name.as_str()))
            .collect();
        extras.sort();
        for (name, value) in extras {
            lines.push(format!("     {name}: {value}"));
        }
        lines
    }

    fn hints(&self) -> &'static str {
        match self.focus {
            Focus::Form => {
                if self.session.submissions().is_empty() {
                    "tab/\u{2193} next  \u{2190}/\u{2192} change  enter submit  ctrl+c quit"
                } else {
                    "tab/\u{2193} next  \u{2190}/\u{2192} change  enter submit  esc records  ctrl+c quit"
                }
            }
            Focus::Submissions => "j/k select  e edit  d delete  esc form  q quit",
        }
    }
}

impl Model for App {
    fn update(&mut self, msg: &KeyMsg) -> Flow {
        match self.focus {
            Focus::Form => self.handle_form_key(msg),
            Focus::Submissions => self.handle_submissions_key(msg),
        }
    }

    fn view(&self) -> String {
        let mut lines = Vec::new();

        lines.push(self.theme.title("Dynamic Form Generator"));
        lines.push(String::new());
        lines.push(self.render_type_selector());
        lines.push(String::new());

        let width = self.label_column_width();
        for (index, field) in self.session.fields().iter().enumerate() {
            lines.extend(self.render_field(index, field, width));
        }

        lines.push(String::new());
        lines.push(self.render_progress());
        lines.push(String::new());
        lines.push(self.render_submit());

        if self.session.just_submitted() {
            lines.push(String::new());
            lines.push(self.theme.success("Form submitted successfully!"));
        }

        if !self.session.submissions().is_empty() {
            lines.push(String::new());
            lines.push(
                self.theme
                    .title(&format!("Submitted Data ({})", self.session.submissions().len())),
            );
            for (index, record) in self.session.submissions().iter().enumerate() {
                lines.extend(self.render_record(index, record));
            }
        }

        lines.push(String::new());
        lines.push(self.theme.muted(self.hints()));

        lines.join("\n")
    }
}

/// Headless render of every form type plus a catalog summary, for CI.
///
/// Exercises the full view path without a terminal and reports the catalog
/// shape as JSON on success.
#[must_use]
pub fn self_check_report() -> String {
    let mut entries = Vec::new();
    for form_type in FormType::all() {
        let app = App::new(form_type, Theme::plain());
        let view = app.view();
        let fields = fields_for(form_type);
        entries.push(serde_json::json!({
            "name": form_type.name(),
            "label": form_type.label(),
            "fields": fields.len(),
            "required": fields.iter().filter(|f| f.required).count(),
            "rendered": !view.is_empty(),
        }));
    }
    let report = serde_json::json!({ "form_types": entries });
    serde_json::to_string_pretty(&report).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, key_type: KeyType) {
        app.update(&KeyMsg::from_type(key_type));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            if c == ' ' {
                press(app, KeyType::Space);
            } else {
                app.update(&KeyMsg::from_char(c));
            }
        }
    }

    fn plain_app() -> App {
        App::new(FormType::UserInfo, Theme::plain())
    }

    #[test]
    fn initial_view_lists_fields_and_progress() {
        let app = plain_app();
        let view = app.view();
        assert!(view.contains("Dynamic Form Generator"));
        assert!(view.contains("First Name:*"));
        assert!(view.contains("Age:"));
        assert!(view.contains("Progress:"));
        assert!(view.contains("0%"));
    }

    #[test]
    fn typing_into_fields_moves_progress() {
        let mut app = plain_app();
        press(&mut app, KeyType::Down); // first field
        type_str(&mut app, "Ada");
        assert!(app.view().contains("50%"));

        press(&mut app, KeyType::Down);
        type_str(&mut app, "Lovelace");
        assert!(app.view().contains("100%"));
    }

    #[test]
    fn number_field_rejects_letters() {
        let mut app = plain_app();
        for _ in 0..3 {
            press(&mut app, KeyType::Down); // age
        }
        type_str(&mut app, "3a6");
        assert_eq!(app.session().value("age"), "36");
    }

    #[test]
    fn submit_with_empty_required_shows_errors() {
        let mut app = plain_app();
        while app.cursor < app.submit_slot() {
            press(&mut app, KeyType::Down);
        }
        press(&mut app, KeyType::Enter);

        let view = app.view();
        assert!(view.contains("! This field is required"));
        assert!(!view.contains("Form submitted successfully!"));
        assert!(app.session().submissions().is_empty());
    }

    #[test]
    fn full_submit_shows_banner_and_record() {
        let mut app = plain_app();
        press(&mut app, KeyType::Down);
        type_str(&mut app, "Ada");
        press(&mut app, KeyType::Down);
        type_str(&mut app, "Lovelace");
        while app.cursor < app.submit_slot() {
            press(&mut app, KeyType::Down);
        }
        press(&mut app, KeyType::Enter);

        let view = app.view();
        assert!(view.contains("Form submitted successfully!"));
        assert!(view.contains("Submitted Data (1)"));
        assert!(view.contains("First Name: Ada"));
    }

    #[test]
    fn left_right_cycle_form_type_on_selector() {
        let mut app = plain_app();
        press(&mut app, KeyType::Right);
        assert_eq!(app.session().form_type(), FormType::Address);
        press(&mut app, KeyType::Left);
        assert_eq!(app.session().form_type(), FormType::UserInfo);
        press(&mut app, KeyType::Left);
        assert_eq!(app.session().form_type(), FormType::Payment);
    }

    #[test]
    fn select_field_cycles_choices() {
        let mut app = App::new(FormType::Address, Theme::plain());
        for _ in 0..3 {
            press(&mut app, KeyType::Down); // state
        }
        press(&mut app, KeyType::Right);
        assert_eq!(app.session().value("state"), "California");
        press(&mut app, KeyType::Right);
        assert_eq!(app.session().value("state"), "Texas");
        press(&mut app, KeyType::Left);
        assert_eq!(app.session().value("state"), "California");
    }

    #[test]
    fn password_field_renders_masked() {
        let mut app = App::new(FormType::Payment, Theme::plain());
        for _ in 0..3 {
            press(&mut app, KeyType::Down); // cvv
        }
        type_str(&mut app, "123");
        let view = app.view();
        assert!(view.contains("\u{2022}\u{2022}\u{2022}"));
        assert!(!view.contains("CVV:* 123"));
    }

    #[test]
    fn expiry_field_shows_helper_and_error() {
        let mut app = App::new(FormType::Payment, Theme::plain());
        assert!(app.view().contains("Format: MM/DD/YYYY"));

        press(&mut app, KeyType::Down);
        press(&mut app, KeyType::Down); // expiry
        type_str(&mut app, "13/01/2999");
        assert!(app
            .view()
            .contains("! Please enter a valid date (MM/DD/YYYY)"));
    }

    #[test]
    fn escape_enters_submissions_and_keys_act_on_records() {
        let mut app = plain_app();
        press(&mut app, KeyType::Down);
        type_str(&mut app, "Ada");
        press(&mut app, KeyType::Down);
        type_str(&mut app, "Lovelace");
        while app.cursor < app.submit_slot() {
            press(&mut app, KeyType::Down);
        }
        press(&mut app, KeyType::Enter);

        press(&mut app, KeyType::Esc);
        assert_eq!(app.focus, Focus::Submissions);

        app.update(&KeyMsg::from_char('e'));
        assert_eq!(app.focus, Focus::Form);
        assert!(app.session().submissions().is_empty());
        assert_eq!(app.session().value("first_name"), "Ada");
    }

    #[test]
    fn delete_last_record_returns_focus_to_form() {
        let mut app = plain_app();
        press(&mut app, KeyType::Down);
        type_str(&mut app, "Ada");
        press(&mut app, KeyType::Down);
        type_str(&mut app, "Lovelace");
        while app.cursor < app.submit_slot() {
            press(&mut app, KeyType::Down);
        }
        press(&mut app, KeyType::Enter);

        press(&mut app, KeyType::Esc);
        app.update(&KeyMsg::from_char('d'));
        assert!(app.session().submissions().is_empty());
        assert_eq!(app.focus, Focus::Form);
    }

    #[test]
    fn escape_without_records_stays_in_form() {
        let mut app = plain_app();
        press(&mut app, KeyType::Esc);
        assert_eq!(app.focus, Focus::Form);
    }

    #[test]
    fn ctrl_c_quits_from_both_zones() {
        let mut app = plain_app();
        assert_eq!(app.update(&KeyMsg::from_type(KeyType::CtrlC)), Flow::Quit);

        app.focus = Focus::Submissions;
        assert_eq!(app.update(&KeyMsg::from_type(KeyType::CtrlC)), Flow::Quit);
    }

    #[test]
    fn focus_transitions_emit_trace_events() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let sink = Capture(Arc::new(Mutex::new(Vec::new())));
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut app = plain_app();
            press(&mut app, KeyType::Down);
            type_str(&mut app, "Ada");
            press(&mut app, KeyType::Down);
            type_str(&mut app, "Lovelace");
            while app.cursor < app.submit_slot() {
                press(&mut app, KeyType::Down);
            }
            press(&mut app, KeyType::Enter);
            press(&mut app, KeyType::Esc);
            assert_eq!(app.update(&KeyMsg::from_type(KeyType::CtrlC)), Flow::Quit);
        });

        let logs = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("focus moved to submissions"));
        assert!(logs.contains("quit requested"));
    }

    #[test]
    fn self_check_report_covers_all_form_types() {
        let report = self_check_report();
        for form_type in FormType::all() {
            assert!(report.contains(form_type.name()));
        }
    }
}
