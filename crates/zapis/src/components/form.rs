use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use form::{Field, FormValues, REGIONS, ValidationReport, Validator, score};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph},
};
use std::collections::HashSet;
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler as _;

use super::Component;
use crate::{
    action::{Action, NoticeKind},
    config::Variant,
    theme::{Role, Theme},
    tui::{EventResponse, Frame},
};

/// Focus cycle, top to bottom.
const FIELD_ORDER: [Field; 6] = [
    Field::FirstName,
    Field::LastName,
    Field::Username,
    Field::Email,
    Field::Password,
    Field::Region,
];

const FORM_WIDTH: u16 = 64;

/// The registration form itself: five text editors, a region selector, live
/// validation and the password strength meter.
///
/// Validation runs on every edit, but a field's error only becomes visible
/// once the field was touched or a submission was attempted, so the user is
/// not shouted at while still typing the first character.
pub struct FormComponent {
    tx: Option<UnboundedSender<Action>>,
    theme: Theme,
    variant: Variant,
    validator: Validator,

    first_name: Input,
    last_name: Input,
    username: Input,
    email: Input,
    password: Input,
    region_index: Option<usize>,

    focus: Field,
    touched: HashSet<Field>,
    submit_attempted: bool,
    report: ValidationReport,
    submitting: bool,
}

impl FormComponent {
    pub fn new(variant: Variant) -> Self {
        Self {
            tx: None,
            theme: crate::theme::light(),
            variant,
            validator: Validator::new(variant.required()),
            first_name: Input::default(),
            last_name: Input::default(),
            username: Input::default(),
            email: Input::default(),
            password: Input::default(),
            region_index: None,
            focus: Field::FirstName,
            touched: HashSet::new(),
            submit_attempted: false,
            report: ValidationReport::default(),
            submitting: false,
        }
    }

    /// Snapshot of the current raw values.
    pub fn values(&self) -> FormValues {
        FormValues {
            first_name: self.first_name.value().to_string(),
            last_name: self.last_name.value().to_string(),
            username: self.username.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
            region: self
                .region_index
                .map(|i| REGIONS[i].to_string())
                .unwrap_or_default(),
        }
    }

    pub fn load(&mut self, values: &FormValues) {
        self.first_name = Input::new(values.first_name.clone());
        self.last_name = Input::new(values.last_name.clone());
        self.username = Input::new(values.username.clone());
        self.email = Input::new(values.email.clone());
        self.password = Input::new(values.password.clone());
        self.region_index = REGIONS.iter().position(|r| *r == values.region);
        self.revalidate();
    }

    fn clear(&mut self) {
        self.first_name = Input::default();
        self.last_name = Input::default();
        self.username = Input::default();
        self.email = Input::default();
        self.password = Input::default();
        self.region_index = None;
        self.focus = Field::FirstName;
        self.touched.clear();
        self.submit_attempted = false;
        self.report = ValidationReport::default();
    }

    fn revalidate(&mut self) {
        self.report = self.validator.validate(&self.values());
    }

    fn input_mut(&mut self, field: Field) -> Option<&mut Input> {
        match field {
            Field::FirstName => Some(&mut self.first_name),
            Field::LastName => Some(&mut self.last_name),
            Field::Username => Some(&mut self.username),
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            Field::Region => None,
        }
    }

    fn input(&self, field: Field) -> Option<&Input> {
        match field {
            Field::FirstName => Some(&self.first_name),
            Field::LastName => Some(&self.last_name),
            Field::Username => Some(&self.username),
            Field::Email => Some(&self.email),
            Field::Password => Some(&self.password),
            Field::Region => None,
        }
    }

    fn focus_next(&mut self) {
        let pos = FIELD_ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = FIELD_ORDER[(pos + 1) % FIELD_ORDER.len()];
    }

    fn focus_prev(&mut self) {
        let pos = FIELD_ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = FIELD_ORDER[(pos + FIELD_ORDER.len() - 1) % FIELD_ORDER.len()];
    }

    fn cycle_region(&mut self, step: isize) {
        let len = REGIONS.len() as isize;
        self.region_index = Some(match self.region_index {
            None => {
                if step >= 0 {
                    0
                } else {
                    (len - 1) as usize
                }
            }
            Some(i) => ((i as isize + step).rem_euclid(len)) as usize,
        });
    }

    /// Error text that should currently be visible for a field.
    fn visible_error(&self, field: Field) -> Option<&str> {
        if self.submit_attempted || self.touched.contains(&field) {
            self.report.error(field)
        } else {
            None
        }
    }

    fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Action::Notify(kind, message.into()));
        }
    }

    fn submit(&mut self) -> Result<Option<EventResponse<Action>>> {
        if self.submitting {
            // at most one in-flight submission
            return Ok(None);
        }
        self.submit_attempted = true;
        self.revalidate();
        if !self.report.is_ok() {
            return Ok(Some(EventResponse::Stop(Action::Notify(
                NoticeKind::Error,
                "Please fix the highlighted fields".into(),
            ))));
        }
        Ok(Some(EventResponse::Stop(Action::Submit(self.values()))))
    }

    fn reset(&mut self) -> Result<Option<EventResponse<Action>>> {
        self.clear();
        if self.variant.draft_enabled() {
            if let Some(tx) = &self.tx {
                let _ = tx.send(Action::ClearDraft);
            }
        }
        Ok(Some(EventResponse::Stop(Action::Notify(
            NoticeKind::Info,
            "Form reset".into(),
        ))))
    }
}

impl Component for FormComponent {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.tx = Some(tx);
        Ok(())
    }

    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('t') => {
                    return Ok(Some(EventResponse::Stop(Action::ToggleTheme)));
                }
                KeyCode::Char('s') if self.variant.draft_enabled() => {
                    let values = self.values();
                    if values.is_empty() {
                        return Ok(Some(EventResponse::Stop(Action::Notify(
                            NoticeKind::Info,
                            "Nothing to save yet".into(),
                        ))));
                    }
                    return Ok(Some(EventResponse::Stop(Action::SaveDraft(values))));
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.touched.insert(self.focus);
                self.focus_next();
                self.revalidate();
                Ok(None)
            }
            KeyCode::BackTab => {
                self.touched.insert(self.focus);
                self.focus_prev();
                self.revalidate();
                Ok(None)
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.reset(),
            _ if self.focus == Field::Region => {
                match key.code {
                    KeyCode::Left => self.cycle_region(-1),
                    KeyCode::Right | KeyCode::Char(' ') => self.cycle_region(1),
                    KeyCode::Backspace | KeyCode::Delete => self.region_index = None,
                    _ => return Ok(None),
                }
                self.touched.insert(Field::Region);
                self.revalidate();
                Ok(None)
            }
            _ => {
                let focus = self.focus;
                let ev = crossterm::event::Event::Key(key);
                if let Some(input) = self.input_mut(focus) {
                    if input.handle_event(&ev).is_some() {
                        self.touched.insert(focus);
                        self.revalidate();
                    }
                }
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Submit(_) => {
                self.submitting = true;
            }
            Action::SubmitFinished(result) => {
                self.submitting = false;
                if result.is_ok() && self.variant.clears_on_success() {
                    self.clear();
                }
            }
            Action::RestoreDraft(values) => {
                self.load(&values);
                self.notify(NoticeKind::Info, "Draft restored");
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let theme = self.theme.clone();
        let password_filled = !self.password.value().is_empty();

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(FORM_WIDTH),
            Constraint::Fill(1),
        ])
        .split(area);

        let meter_height = if password_filled { 1 } else { 0 };
        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3), // first name
            Constraint::Length(3), // last name
            Constraint::Length(3), // username
            Constraint::Length(3), // email
            Constraint::Length(3), // password
            Constraint::Length(meter_height),
            Constraint::Length(3), // region
            Constraint::Length(1),
            Constraint::Length(1), // submit row
            Constraint::Fill(1),
        ])
        .split(horizontal[1]);

        for (field, row) in [
            (Field::FirstName, rows[1]),
            (Field::LastName, rows[2]),
            (Field::Username, rows[3]),
            (Field::Email, rows[4]),
            (Field::Password, rows[5]),
        ] {
            self.draw_text_field(frame, row, field, &theme);
        }

        if password_filled {
            self.draw_strength_meter(frame, rows[6], &theme);
        }
        self.draw_region_field(frame, rows[7], &theme);
        self.draw_submit_row(frame, rows[9], &theme);

        Ok(())
    }
}

impl FormComponent {
    fn field_block<'a>(&self, field: Field, theme: &'a Theme) -> Block<'a> {
        let border_style = if self.visible_error(field).is_some() {
            theme.style(Role::Danger)
        } else if self.focus == field {
            theme.style_bold(Role::Primary)
        } else {
            theme.style(Role::Border)
        };

        let mut title = field.label().to_string();
        if self.validator.required().contains(field) {
            title.push_str(" *");
        }

        let mut block = Block::bordered()
            .border_style(border_style)
            .title(Span::styled(title, theme.style(Role::Text)));
        if let Some(message) = self.visible_error(field) {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {message} "),
                theme.style(Role::Danger),
            )));
        }
        block
    }

    fn draw_text_field(&self, frame: &mut Frame<'_>, row: Rect, field: Field, theme: &Theme) {
        let block = self.field_block(field, theme);
        let inner = block.inner(row);
        frame.render_widget(block, row);

        let input = self.input(field).expect("text field has an input");
        let width = inner.width.max(1) as usize;
        let scroll = input.visual_scroll(width.saturating_sub(1));

        let shown = if field == Field::Password {
            "•".repeat(input.value().chars().count())
        } else {
            input.value().to_string()
        };
        let paragraph = Paragraph::new(shown)
            .style(theme.style(Role::Text))
            .scroll((0, scroll as u16));
        frame.render_widget(paragraph, inner);

        if self.focus == field {
            let cursor_x = (input.visual_cursor().max(scroll) - scroll) as u16;
            frame.set_cursor_position((inner.x + cursor_x, inner.y));
        }
    }

    fn draw_region_field(&self, frame: &mut Frame<'_>, row: Rect, theme: &Theme) {
        let block = self.field_block(Field::Region, theme);
        let inner = block.inner(row);
        frame.render_widget(block, row);

        let line = match self.region_index {
            Some(i) => Line::from(vec![
                Span::styled("◂ ", theme.style(Role::SubtleText)),
                Span::styled(REGIONS[i], theme.style(Role::Text)),
                Span::styled(" ▸", theme.style(Role::SubtleText)),
            ]),
            None => Line::from(Span::styled(
                "◂ choose a region ▸",
                theme.style(Role::SubtleText),
            )),
        };
        frame.render_widget(Paragraph::new(line), inner);
    }

    /// The meter is advisory and only drawn while the password is non-empty.
    fn draw_strength_meter(&self, frame: &mut Frame<'_>, row: Rect, theme: &Theme) {
        let strength = score(self.password.value());
        let gauge = Gauge::default()
            .ratio(f64::from(strength.percent) / 100.0)
            .label(format!("{} ({}%)", strength.label, strength.percent))
            .gauge_style(theme.severity_style(strength.severity).bg(theme.roles.surface))
            .use_unicode(true);
        frame.render_widget(gauge, row);
    }

    fn draw_submit_row(&self, frame: &mut Frame<'_>, row: Rect, theme: &Theme) {
        let label = if self.submitting {
            Span::styled("[ Submitting… ]", theme.style(Role::SubtleText))
        } else {
            Span::styled("[ Enter ⏎ Submit ]", theme.style_bold(Role::Primary))
        };
        frame.render_widget(Paragraph::new(Line::from(label)).centered(), row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut FormComponent, s: &str) {
        for c in s.chars() {
            form.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn focus_cycles_through_all_fields_and_wraps() {
        let mut form = FormComponent::new(Variant::Relaxed);
        assert_eq!(form.focus, Field::FirstName);
        for expected in [
            Field::LastName,
            Field::Username,
            Field::Email,
            Field::Password,
            Field::Region,
            Field::FirstName,
        ] {
            form.handle_key_event(key(KeyCode::Tab)).unwrap();
            assert_eq!(form.focus, expected);
        }
        form.handle_key_event(key(KeyCode::BackTab)).unwrap();
        assert_eq!(form.focus, Field::Region);
    }

    #[test]
    fn typing_marks_field_touched_and_validates_live() {
        let mut form = FormComponent::new(Variant::Relaxed);
        // move to username
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut form, "ab");
        assert_eq!(
            form.visible_error(Field::Username),
            Some("Username must be at least 3 characters")
        );
        type_str(&mut form, "c");
        assert_eq!(form.visible_error(Field::Username), None);
    }

    #[test]
    fn untouched_fields_hide_their_errors_until_submit() {
        let mut form = FormComponent::new(Variant::Strict);
        // strict: everything is required and invalid, but nothing touched yet
        form.revalidate();
        assert_eq!(form.visible_error(Field::Email), None);

        let response = form.submit().unwrap();
        assert!(matches!(
            response,
            Some(EventResponse::Stop(Action::Notify(NoticeKind::Error, _)))
        ));
        assert_eq!(form.visible_error(Field::Email), Some("Email is required"));
    }

    #[test]
    fn region_cycles_and_clears() {
        let mut form = FormComponent::new(Variant::Relaxed);
        for _ in 0..5 {
            form.handle_key_event(key(KeyCode::Tab)).unwrap();
        }
        assert_eq!(form.focus, Field::Region);

        form.handle_key_event(key(KeyCode::Right)).unwrap();
        assert_eq!(form.values().region, REGIONS[0]);
        form.handle_key_event(key(KeyCode::Left)).unwrap();
        assert_eq!(form.values().region, REGIONS[13]);
        form.handle_key_event(key(KeyCode::Backspace)).unwrap();
        assert_eq!(form.values().region, "");
    }

    #[test]
    fn valid_form_emits_submit_and_blocks_second_attempt() {
        let mut form = FormComponent::new(Variant::Relaxed);
        form.load(&FormValues {
            username: "valid_user1".into(),
            email: "a@b.com".into(),
            ..Default::default()
        });

        let first = form.handle_key_event(key(KeyCode::Enter)).unwrap();
        let Some(EventResponse::Stop(Action::Submit(values))) = first else {
            panic!("expected submit, got {first:?}");
        };
        assert_eq!(values.username, "valid_user1");

        // the pending flag flips on and a second Enter is swallowed
        form.update(Action::Submit(values.clone())).unwrap();
        assert!(form.submitting);
        let second = form.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(second.is_none());

        // the round trip finishes exactly once, pending flips back off
        form.update(Action::SubmitFinished(Ok(values))).unwrap();
        assert!(!form.submitting);
    }

    #[test]
    fn strict_variant_clears_values_on_success_relaxed_keeps_them() {
        for (variant, expect_empty) in [(Variant::Strict, true), (Variant::Relaxed, false)] {
            let mut form = FormComponent::new(variant);
            let values = FormValues {
                first_name: "Jana".into(),
                last_name: "Nováková".into(),
                username: "jana_n".into(),
                email: "jana@example.com".into(),
                password: "Silne1heslo".into(),
                region: "Vysočina".into(),
            };
            form.load(&values);
            form.update(Action::Submit(values.clone())).unwrap();
            form.update(Action::SubmitFinished(Ok(values))).unwrap();
            assert_eq!(form.values().is_empty(), expect_empty, "{variant:?}");
        }
    }

    #[test]
    fn failed_submission_keeps_the_form_intact_for_retry() {
        let mut form = FormComponent::new(Variant::Strict);
        let values = FormValues {
            first_name: "Jana".into(),
            last_name: "Nováková".into(),
            username: "jana_n".into(),
            email: "jana@example.com".into(),
            password: "Silne1heslo".into(),
            region: "Vysočina".into(),
        };
        form.load(&values);
        form.update(Action::Submit(values.clone())).unwrap();
        form.update(Action::SubmitFinished(Err("boom".into()))).unwrap();
        assert!(!form.submitting);
        assert_eq!(form.values(), values);
    }

    #[test]
    fn escape_resets_and_requests_draft_clear() {
        let mut form = FormComponent::new(Variant::Relaxed);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        form.register_action_handler(tx).unwrap();
        type_str(&mut form, "Jana");

        let response = form.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(
            response,
            Some(EventResponse::Stop(Action::Notify(NoticeKind::Info, _)))
        ));
        assert!(form.values().is_empty());
        assert_eq!(rx.try_recv().unwrap(), Action::ClearDraft);
    }

    #[test]
    fn draft_restore_loads_values() {
        let mut form = FormComponent::new(Variant::Relaxed);
        form.update(Action::RestoreDraft(FormValues {
            username: "jana_n".into(),
            region: "Vysočina".into(),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(form.values().username, "jana_n");
        assert_eq!(form.values().region, "Vysočina");
    }
}
