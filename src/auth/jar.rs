use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::auth::cookie::SessionCookie;

/// Where session markers live between runs.
pub trait CookieJar {
    /// Returns the cookie named `name` unless it is missing or expired at `now`.
    fn get(&self, name: &str, now: SystemTime) -> Option<SessionCookie>;
    fn set(&mut self, cookie: SessionCookie);
}

/// In-memory jar for exercising the gate without touching disk.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryJar {
    cookies: BTreeMap<String, SessionCookie>,
}

#[cfg(test)]
impl MemoryJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }
}

#[cfg(test)]
impl CookieJar for MemoryJar {
    fn get(&self, name: &str, now: SystemTime) -> Option<SessionCookie> {
        self.cookies.get(name).filter(|c| !c.is_expired(now)).cloned()
    }

    fn set(&mut self, cookie: SessionCookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
    }
}

/// Jar persisted as a JSON object keyed by cookie name.
#[derive(Debug)]
pub struct FileJar {
    path: PathBuf,
    cookies: BTreeMap<String, SessionCookie>,
}

impl FileJar {
    /// Opens the jar at `path`. A missing or unreadable file gives an empty jar.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cookies = match load(&path) {
            Ok(cookies) => cookies,
            Err(err) => {
                warn!(path = %path.display(), "ignoring session file: {err:#}");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), count = cookies.len(), "session jar opened");
        Self { path, cookies }
    }

    fn save(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.cookies).context("failed to encode session jar")?;
        fs::write(&self.path, bytes)
            .with_context(|| format!("failed to write session file {}", self.path.display()))
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, SessionCookie>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("malformed session file {}", path.display()))
}

impl CookieJar for FileJar {
    fn get(&self, name: &str, now: SystemTime) -> Option<SessionCookie> {
        self.cookies.get(name).filter(|c| !c.is_expired(now)).cloned()
    }

    fn set(&mut self, cookie: SessionCookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
        // The marker stays valid in memory for this run even if the write fails.
        if let Err(err) = self.save() {
            warn!("{err:#}");
        }
    }
}
