//! Best-effort preference storage for the registration shell.
//!
//! Persists small JSON values (theme preference, draft snapshots) under a
//! directory chosen by the application. Semantics are deliberately simple:
//! last writer wins, no locking, no transactional guarantees. A missing key
//! reads as `None`, never as an error.

mod error;
mod store;

pub use error::PrefsError;
pub use store::{DARK_MODE_KEY, FORM_DRAFT_KEY, PrefsStore};

pub type PrefsResult<T> = Result<T, PrefsError>;
