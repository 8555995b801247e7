use form::FormValues;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Outcome of a modal popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopupResult {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    /// Flip dark/light mode and persist the preference.
    ToggleTheme,
    /// Raise a transient toast notification.
    Notify(NoticeKind, String),
    /// A validated form requests delivery of its values.
    Submit(FormValues),
    /// The simulated round trip finished; `Err` carries a display message.
    SubmitFinished(Result<FormValues, String>),
    /// Persist the current values as a draft (explicit user action).
    SaveDraft(FormValues),
    /// Drop the persisted draft (successful submission or reset).
    ClearDraft,
    /// Load a previously persisted draft into the form.
    RestoreDraft(FormValues),
    PopupResult(PopupResult),
}
