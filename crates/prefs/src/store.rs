use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{PrefsError, PrefsResult};

/// Theme preference key; the stored value is a bare boolean.
pub const DARK_MODE_KEY: &str = "darkMode";
/// Draft snapshot key; the stored value is a serialized `FormValues`.
pub const FORM_DRAFT_KEY: &str = "formDraft";

/// A flat key-value store, one JSON file per key.
///
/// Writes go through a sibling temp file plus rename so a crash mid-write
/// leaves either the old value or the new one, never a torn file.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    dir: PathBuf,
}

impl PrefsStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> PrefsResult<Self> {
        let dir = dir.into();
        if dir.exists() && !dir.is_dir() {
            return Err(PrefsError::NotADirectory(dir));
        }
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read a key. A missing or unreadable-as-`T` file reads as `None`;
    /// corrupt content is logged and treated as absent, matching the
    /// best-effort contract.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> PrefsResult<Option<T>> {
        let path = self.key_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                debug!("discarding corrupt preference {key:?}: {err}");
                Ok(None)
            }
        }
    }

    /// Write a key, replacing any previous value (last writer wins).
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> PrefsResult<()> {
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> PrefsResult<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Theme preference: `None` means no stored preference (light mode).
    pub fn dark_mode(&self) -> PrefsResult<Option<bool>> {
        self.read(DARK_MODE_KEY)
    }

    pub fn set_dark_mode(&self, dark: bool) -> PrefsResult<()> {
        self.write(DARK_MODE_KEY, &dark)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form::FormValues;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store() -> (TempDir, PrefsStore) {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (_dir, store) = store();
        assert_eq!(store.dark_mode().unwrap(), None);
        assert_eq!(store.read::<FormValues>(FORM_DRAFT_KEY).unwrap(), None);
    }

    #[test]
    fn dark_mode_round_trip() {
        let (_dir, store) = store();
        store.set_dark_mode(true).unwrap();
        assert_eq!(store.dark_mode().unwrap(), Some(true));

        // stored as bare boolean JSON
        let raw = std::fs::read_to_string(store.dir().join("darkMode.json")).unwrap();
        assert_eq!(raw.trim(), "true");
    }

    #[test]
    fn last_writer_wins() {
        let (_dir, store) = store();
        store.set_dark_mode(true).unwrap();
        store.set_dark_mode(false).unwrap();
        assert_eq!(store.dark_mode().unwrap(), Some(false));
    }

    #[test]
    fn draft_round_trip_and_clear() {
        let (_dir, store) = store();
        let draft = FormValues {
            username: "jana_n".into(),
            email: "jana@example.com".into(),
            ..Default::default()
        };
        store.write(FORM_DRAFT_KEY, &draft).unwrap();
        assert_eq!(store.read(FORM_DRAFT_KEY).unwrap(), Some(draft));

        store.remove(FORM_DRAFT_KEY).unwrap();
        assert_eq!(store.read::<FormValues>(FORM_DRAFT_KEY).unwrap(), None);
        // removing twice stays fine
        store.remove(FORM_DRAFT_KEY).unwrap();
    }

    #[test]
    fn corrupt_value_reads_as_absent() {
        let (_dir, store) = store();
        std::fs::write(store.dir().join("darkMode.json"), "{not json").unwrap();
        assert_eq!(store.dark_mode().unwrap(), None);
    }
}
