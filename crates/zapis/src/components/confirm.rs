use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use super::Component;
use crate::{
    action::{Action, PopupResult},
    theme::{Role, Theme},
    tui::{EventResponse, Frame},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Ok,
    Cancel,
}

/// Modal confirmation popup with selectable OK/Cancel buttons.
///
/// Behavior:
/// - Arrow Left/Right or Tab/BackTab: switch selected button
/// - Enter: submit (emits `Action::PopupResult` with Confirmed/Cancelled)
/// - Esc: cancel
///
/// The application owns the popup lifecycle: it forwards the result and
/// closes the popup on `Action::PopupResult`.
pub struct ConfirmPopup {
    theme: Theme,
    title: String,
    question: String,
    ok_label: String,
    cancel_label: String,
    selected: Choice,
    width: u16,
    height: u16,
}

impl ConfirmPopup {
    pub fn new<T: Into<String>, Q: Into<String>>(title: T, question: Q) -> Self {
        Self {
            theme: crate::theme::light(),
            title: title.into(),
            question: question.into(),
            ok_label: "OK".into(),
            cancel_label: "Cancel".into(),
            selected: Choice::Ok,
            width: 60,
            height: 7,
        }
    }

    pub fn ok_label<S: Into<String>>(mut self, label: S) -> Self {
        self.ok_label = label.into();
        self
    }

    pub fn cancel_label<S: Into<String>>(mut self, label: S) -> Self {
        self.cancel_label = label.into();
        self
    }

    fn confirm_action(&self) -> Action {
        match self.selected {
            Choice::Ok => Action::PopupResult(PopupResult::Confirmed),
            Choice::Cancel => Action::PopupResult(PopupResult::Cancelled),
        }
    }

    fn toggle_selection(&mut self) {
        self.selected = match self.selected {
            Choice::Ok => Choice::Cancel,
            Choice::Cancel => Choice::Ok,
        };
    }

    fn centered(&self, area: Rect) -> Rect {
        let [mid] = Layout::horizontal([Constraint::Length(self.width.min(area.width))])
            .flex(Flex::Center)
            .areas(area);
        let [rect] = Layout::vertical([Constraint::Length(self.height.min(area.height))])
            .flex(Flex::Center)
            .areas(mid);
        rect
    }

    fn button(&self, label: &str, active: bool) -> Span<'static> {
        let text = format!("[ {label} ]");
        if active {
            Span::styled(text, self.theme.style_bold(Role::Primary))
        } else {
            Span::styled(text, self.theme.style(Role::SubtleText))
        }
    }
}

impl Component for ConfirmPopup {
    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_selection();
                Ok(None)
            }
            KeyCode::Enter => Ok(Some(EventResponse::Stop(self.confirm_action()))),
            KeyCode::Esc => Ok(Some(EventResponse::Stop(Action::PopupResult(
                PopupResult::Cancelled,
            )))),
            // the app treats an open popup as modal, so unhandled keys
            // simply do nothing
            _ => Ok(None),
        }
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let rect = self.centered(area);
        frame.render_widget(Clear, rect);

        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .border_style(self.theme.style(Role::Primary))
            .title(Span::styled(
                format!(" {} ", self.title),
                self.theme.style_bold(Role::Text),
            ))
            .style(ratatui::style::Style::default().bg(self.theme.roles.surface));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let question = Paragraph::new(self.question.clone())
            .style(self.theme.style(Role::Text))
            .wrap(Wrap { trim: true });
        frame.render_widget(question, rows[0]);

        let buttons = Line::from(vec![
            self.button(&self.ok_label, self.selected == Choice::Ok),
            Span::raw("   "),
            self.button(&self.cancel_label, self.selected == Choice::Cancel),
        ]);
        frame.render_widget(Paragraph::new(buttons).centered(), rows[1]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_confirms_default_selection() {
        let mut popup = ConfirmPopup::new("Draft", "Restore?");
        let response = popup.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(
            response,
            Some(EventResponse::Stop(Action::PopupResult(
                PopupResult::Confirmed
            )))
        ));
    }

    #[test]
    fn toggled_selection_cancels_and_esc_always_cancels() {
        let mut popup = ConfirmPopup::new("Draft", "Restore?");
        popup.handle_key_event(key(KeyCode::Tab)).unwrap();
        let response = popup.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(
            response,
            Some(EventResponse::Stop(Action::PopupResult(
                PopupResult::Cancelled
            )))
        ));

        let mut popup = ConfirmPopup::new("Draft", "Restore?");
        let response = popup.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(
            response,
            Some(EventResponse::Stop(Action::PopupResult(
                PopupResult::Cancelled
            )))
        ));
    }
}
