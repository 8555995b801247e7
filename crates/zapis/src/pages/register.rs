use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Layout, Rect, Size},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use super::Page;
use crate::{
    action::Action,
    components::{Component, form::FormComponent},
    config::Variant,
    theme::{Role, Theme},
    tui::{Event, EventResponse, Frame},
};

/// The single page of the application: a heading and the registration form
/// in a centered column.
pub struct RegisterPage {
    theme: Theme,
    form: FormComponent,
}

impl RegisterPage {
    pub fn new(variant: Variant) -> Self {
        Self {
            theme: crate::theme::light(),
            form: FormComponent::new(variant),
        }
    }
}

impl Page for RegisterPage {
    fn name(&self) -> &str {
        "register"
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.form.register_action_handler(tx)?;
        Ok(())
    }

    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme.clone();
        self.form.register_theme(theme)?;
        Ok(())
    }

    fn init(&mut self, area: Size) -> Result<()> {
        self.form.init(area)?;
        Ok(())
    }

    fn handle_events(&mut self, event: Option<Event>) -> Result<Option<EventResponse<Action>>> {
        self.form.handle_events(event)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        self.form.update(action)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let background =
            Block::default().style(ratatui::style::Style::default().bg(self.theme.roles.background));
        frame.render_widget(background, area);

        let rows = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).split(area);

        let heading = Line::from(Span::styled(
            "Create account",
            self.theme.style_bold(Role::Text),
        ));
        frame.render_widget(Paragraph::new(heading).centered(), rows[0]);

        self.form.draw(frame, rows[1])?;
        Ok(())
    }
}
