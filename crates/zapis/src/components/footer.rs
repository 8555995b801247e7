use color_eyre::Result;
use ratatui::{
    layout::Rect,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::Component;
use crate::{
    action::Action,
    config::Variant,
    services::shortcuts::{Shortcut, form_shortcuts},
    theme::{Role, Theme},
    tui::Frame,
};

/// Bottom bar with contextual key hints on the left and the variant plus
/// active theme on the right.
pub struct FooterComponent {
    theme: Theme,
    variant: Variant,
    submitting: bool,
}

impl FooterComponent {
    pub fn new(variant: Variant) -> Self {
        Self {
            theme: crate::theme::light(),
            variant,
            submitting: false,
        }
    }

    fn hint_spans(&self, shortcuts: &[Shortcut]) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, shortcut) in shortcuts.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", self.theme.style(Role::SubtleText)));
            }
            spans.push(Span::styled(
                shortcut.keys,
                self.theme.style_bold(Role::Primary),
            ));
            spans.push(Span::styled(
                format!(" {}", shortcut.label),
                self.theme.style(Role::SubtleText),
            ));
        }
        spans
    }
}

impl Component for FooterComponent {
    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Submit(_) => self.submitting = true,
            Action::SubmitFinished(_) => self.submitting = false,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .border_style(self.theme.style(Role::Border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let left = if self.submitting {
            Line::from(Span::styled(
                "Submitting…",
                self.theme.style_bold(Role::Warning),
            ))
        } else {
            Line::from(self.hint_spans(&form_shortcuts(self.variant)))
        };
        frame.render_widget(Paragraph::new(left), inner);

        let right = Line::from(vec![
            Span::styled(self.variant.label(), self.theme.style(Role::SubtleText)),
            Span::styled(" · ", self.theme.style(Role::SubtleText)),
            Span::styled(self.theme.name.clone(), self.theme.style(Role::SubtleText)),
        ]);
        frame.render_widget(Paragraph::new(right).right_aligned(), inner);

        Ok(())
    }
}
