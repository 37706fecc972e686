//! Cookie store persisted to a JSON jar file

use crate::error::Result;
use crate::store::{CookieSource, MemoryCookieStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// [`MemoryCookieStore`] that saves itself to `path` after every write
#[derive(Debug)]
pub struct FileCookieStore {
    path: PathBuf,
    inner: MemoryCookieStore,
}

impl FileCookieStore {
    /// Load the jar at `path`. A missing or blank file yields an empty jar.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut inner = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => MemoryCookieStore::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("Cookie jar {:?} does not exist yet", path);
                MemoryCookieStore::new()
            }
            Err(err) => return Err(err.into()),
        };
        inner.purge_expired_at(SystemTime::now());
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &MemoryCookieStore {
        &self.inner
    }

    /// Write the jar to disk, creating parent directories as needed.
    pub fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.inner)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl CookieSource for FileCookieStore {
    fn read_all(&self) -> String {
        self.inner.read_all()
    }

    fn write_entry(&mut self, line: &str) {
        self.inner.write_entry(line);
        if let Err(err) = self.flush() {
            log::warn!("Failed to save cookie jar {:?}: {}", self.path, err);
        }
    }
}
