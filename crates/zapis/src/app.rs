use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use form::FormValues;
use prefs::{FORM_DRAFT_KEY, PrefsStore};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::{
    action::{Action, NoticeKind, PopupResult},
    cli::Cli,
    components::{Component, confirm::ConfirmPopup, footer::FooterComponent, toasts::Toasts},
    config::Config,
    pages::{Page, RegisterPage},
    services::submit,
    theme::{self, Role, Theme},
    tui::{Event, EventResponse, Frame, Tui},
};

pub struct App {
    config: Config,
    theme: Theme,
    store: PrefsStore,
    pages: Vec<Box<dyn Page>>,
    active_page: usize,
    footer: FooterComponent,
    toasts: Toasts,
    popup: Option<Box<dyn Component>>,
    pending_draft: Option<FormValues>,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    submitting: bool,
    /// Set once any draw fails; from then on only the apology screen is
    /// rendered. Recovery is a restart.
    fault: Option<String>,
}

impl App {
    pub fn new(args: Cli, config: Config) -> Result<Self> {
        let variant = config.variant();
        let store = PrefsStore::open(&config.config.data_dir)?;

        // absent or unreadable preference means light mode
        let theme = theme::from_preference(store.dark_mode().unwrap_or_else(|err| {
            warn!("could not read theme preference: {err}");
            None
        }));

        // a stored draft is only offered, never applied unprompted
        let mut popup: Option<Box<dyn Component>> = None;
        let mut pending_draft = None;
        if variant.draft_enabled() {
            match store.read::<FormValues>(FORM_DRAFT_KEY) {
                Ok(Some(draft)) if !draft.is_empty() => {
                    pending_draft = Some(draft);
                    popup = Some(Box::new(
                        ConfirmPopup::new(
                            "Draft found",
                            "A draft from a previous session exists. Restore it?",
                        )
                        .ok_label("Restore")
                        .cancel_label("Not now"),
                    ));
                }
                Ok(_) => {}
                Err(err) => warn!("could not read draft: {err}"),
            }
        }

        Ok(Self {
            config,
            theme,
            store,
            pages: vec![Box::new(RegisterPage::new(variant))],
            active_page: 0,
            footer: FooterComponent::new(variant),
            toasts: Toasts::new(),
            popup,
            pending_draft,
            tick_rate: args.tick_rate,
            frame_rate: args.frame_rate,
            should_quit: false,
            should_suspend: false,
            submitting: false,
            fault: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        let size = tui.size()?;
        for page in self.pages.iter_mut() {
            page.register_action_handler(action_tx.clone())?;
            page.register_theme(self.theme.clone())?;
            page.init(size)?;
        }
        self.footer.register_theme(self.theme.clone())?;
        self.toasts.register_theme(self.theme.clone())?;
        if let Some(popup) = &mut self.popup {
            popup.register_theme(self.theme.clone())?;
        }

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    Event::Tick => action_tx.send(Action::Tick)?,
                    Event::Render => action_tx.send(Action::Render)?,
                    Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                    Event::Key(key)
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c') =>
                    {
                        action_tx.send(Action::Quit)?
                    }
                    Event::Key(key)
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('z') =>
                    {
                        action_tx.send(Action::Suspend)?
                    }
                    e => {
                        // an open popup is modal: the page never sees events
                        // while it is up
                        let response = if let Some(popup) = &mut self.popup {
                            popup.handle_events(Some(e))?
                        } else if let Some(page) = self.pages.get_mut(self.active_page) {
                            page.handle_events(Some(e))?
                        } else {
                            None
                        };
                        match response {
                            Some(EventResponse::Continue(action))
                            | Some(EventResponse::Stop(action)) => {
                                action_tx.send(action)?;
                            }
                            None => {}
                        }
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!("{action:?}");
                }
                match &action {
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        tui.draw(|f| self.render(f))?;
                    }
                    Action::Render => {
                        tui.draw(|f| self.render(f))?;
                    }
                    Action::Error(msg) => {
                        error!("{msg}");
                    }
                    Action::ToggleTheme => self.toggle_theme(&action_tx)?,
                    Action::Submit(values) => {
                        if !self.submitting {
                            self.submitting = true;
                            submit::spawn(
                                action_tx.clone(),
                                values.clone(),
                                Duration::from_millis(self.config.config.submit_delay_ms),
                            );
                        }
                    }
                    Action::SubmitFinished(result) => {
                        self.submitting = false;
                        match result {
                            Ok(values) => {
                                log_committed(values);
                                if self.config.variant().draft_enabled() {
                                    action_tx.send(Action::ClearDraft)?;
                                }
                                action_tx.send(Action::Notify(
                                    NoticeKind::Success,
                                    "Registration submitted".into(),
                                ))?;
                            }
                            Err(msg) => {
                                // the form stays intact for a retry
                                action_tx.send(Action::Notify(
                                    NoticeKind::Error,
                                    format!("Submission failed: {msg}"),
                                ))?;
                            }
                        }
                    }
                    Action::SaveDraft(values) => match self.store.write(FORM_DRAFT_KEY, values) {
                        Ok(()) => action_tx
                            .send(Action::Notify(NoticeKind::Success, "Draft saved".into()))?,
                        Err(err) => {
                            warn!("could not save draft: {err}");
                            action_tx.send(Action::Notify(
                                NoticeKind::Error,
                                "Could not save draft".into(),
                            ))?;
                        }
                    },
                    Action::ClearDraft => {
                        if let Err(err) = self.store.remove(FORM_DRAFT_KEY) {
                            warn!("could not clear draft: {err}");
                        }
                    }
                    Action::PopupResult(result) => {
                        self.on_popup_result(*result, &action_tx)?;
                    }
                    _ => {}
                }

                if let Some(popup) = &mut self.popup {
                    if let Some(follow_up) = popup.update(action.clone())? {
                        action_tx.send(follow_up)?;
                    }
                } else if let Some(page) = self.pages.get_mut(self.active_page) {
                    if let Some(follow_up) = page.update(action.clone())? {
                        action_tx.send(follow_up)?;
                    }
                }
                if let Some(follow_up) = self.footer.update(action.clone())? {
                    action_tx.send(follow_up)?;
                }
                if let Some(follow_up) = self.toasts.update(action)? {
                    action_tx.send(follow_up)?;
                }
            }

            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    /// The popup must be gone before the restore is enqueued; a still-open
    /// popup would receive the `RestoreDraft` instead of the page.
    fn on_popup_result(
        &mut self,
        result: PopupResult,
        action_tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.popup = None;
        if result == PopupResult::Confirmed {
            if let Some(draft) = self.pending_draft.take() {
                action_tx.send(Action::RestoreDraft(draft))?;
            }
        }
        Ok(())
    }

    fn toggle_theme(&mut self, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.theme = self.theme.toggled();

        // persistence is best-effort; the visible toggle happens regardless
        if let Err(err) = self.store.set_dark_mode(self.theme.dark) {
            warn!("could not persist theme preference: {err}");
            action_tx.send(Action::Notify(
                NoticeKind::Error,
                "Could not save theme preference".into(),
            ))?;
        }

        for page in self.pages.iter_mut() {
            page.register_theme(self.theme.clone())?;
        }
        self.footer.register_theme(self.theme.clone())?;
        self.toasts.register_theme(self.theme.clone())?;
        if let Some(popup) = &mut self.popup {
            popup.register_theme(self.theme.clone())?;
        }
        Ok(())
    }

    /// Top-level fault boundary: a failed draw anywhere in the tree
    /// replaces the whole UI with a static apology.
    fn render(&mut self, frame: &mut Frame<'_>) {
        if self.fault.is_some() {
            self.render_fault(frame);
            return;
        }
        if let Err(err) = self.try_render(frame) {
            error!("render fault: {err:?}");
            self.fault = Some(err.to_string());
            self.render_fault(frame);
        }
    }

    fn try_render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let vertical_layout =
            Layout::vertical(vec![Constraint::Fill(1), Constraint::Length(3)]).split(frame.area());

        if let Some(page) = self.pages.get_mut(self.active_page) {
            page.draw(frame, vertical_layout[0])?;
        }
        self.footer.draw(frame, vertical_layout[1])?;

        if let Some(popup) = &mut self.popup {
            popup.draw(frame, vertical_layout[0])?;
        }
        self.toasts.draw(frame, frame.area())?;
        Ok(())
    }

    fn render_fault(&self, frame: &mut Frame<'_>) {
        let [row] = Layout::vertical([Constraint::Length(2)])
            .flex(Flex::Center)
            .areas(frame.area());
        let text = vec![
            Line::from("Something went wrong."),
            Line::from("Please restart the application."),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .style(self.theme.style(Role::Danger))
                .centered(),
            row,
        );
    }
}

/// Development aid only: committed values never reach any log in release
/// builds, and the password is reduced to its length either way.
fn log_committed(values: &FormValues) {
    #[cfg(debug_assertions)]
    {
        let mut redacted = values.clone();
        redacted.password = format!("<{} chars>", values.password.chars().count());
        tracing::info!("registration submitted: {redacted:?}");
    }
    #[cfg(not(debug_assertions))]
    let _ = values;
}
