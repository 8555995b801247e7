use std::time::{Duration, Instant};

use color_eyre::Result;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use super::Component;
use crate::{
    action::{Action, NoticeKind},
    theme::{Role, Theme},
    tui::Frame,
};

const TOAST_TTL: Duration = Duration::from_secs(4);
const MAX_VISIBLE: usize = 4;

struct Toast {
    kind: NoticeKind,
    message: String,
    created_at: Instant,
    ttl: Duration,
}

/// Transient notification stack, drawn as an overlay in the top right
/// corner. Toasts expire on their TTL; expiry is checked on every tick.
pub struct Toasts {
    theme: Theme,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            theme: crate::theme::light(),
            items: Vec::new(),
        }
    }

    fn push(&mut self, kind: NoticeKind, message: String) {
        self.items.push(Toast {
            kind,
            message,
            created_at: Instant::now(),
            ttl: TOAST_TTL,
        });
    }

    fn purge_expired(&mut self) {
        self.items.retain(|t| t.created_at.elapsed() < t.ttl);
    }

    fn kind_parts(&self, kind: NoticeKind) -> (&'static str, Role) {
        match kind {
            NoticeKind::Info => ("ℹ", Role::Info),
            NoticeKind::Success => ("✔", Role::Success),
            NoticeKind::Error => ("✘", Role::Danger),
        }
    }
}

impl Component for Toasts {
    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.purge_expired(),
            Action::Notify(kind, message) => self.push(kind, message),
            // app-level errors surface like any other error toast
            Action::Error(message) => self.push(NoticeKind::Error, message),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        for (row, toast) in self.items.iter().rev().take(MAX_VISIBLE).enumerate() {
            let (icon, role) = self.kind_parts(toast.kind);
            let text = format!(" {icon} {} ", toast.message);
            let width = (text.chars().count() as u16).min(area.width);
            let rect = Rect {
                x: area.x + area.width.saturating_sub(width + 1),
                y: area.y + 1 + row as u16,
                width,
                height: 1,
            };
            let line = Line::from(Span::styled(
                text,
                self.theme
                    .style_bold(role)
                    .bg(self.theme.roles.surface),
            ));
            frame.render_widget(Clear, rect);
            frame.render_widget(Paragraph::new(line), rect);
        }
        Ok(())
    }
}
