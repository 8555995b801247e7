use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not a directory: {0:?}")]
    NotADirectory(PathBuf),
}
