//! In-memory cookie store with browser merge semantics.
//!
//! Entries are identified by `(name, domain, path)`. A write replaces the
//! matching entry in place, or appends a new one; a write whose `max-age` is
//! not positive or whose `expires` date has passed deletes it. `max-age`
//! wins over `expires` when both are present.

use crate::store::CookieSource;
use cookie::Cookie;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Cookie record held by a [`MemoryCookieStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: String,
    pub secure: bool,
    /// Unix seconds; `None` for session cookies.
    pub expires_at: Option<u64>,
}

impl StoredCookie {
    fn same_identity(&self, other: &StoredCookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }

    /// Whether the cookie has expired at `now`.
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= unix_seconds(now))
    }
}

/// Result of parsing one written line
struct ParsedWrite {
    cookie: StoredCookie,
    deletes: bool,
}

fn default_document_path() -> String {
    "/".to_string()
}

fn unix_seconds(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Ambient cookie string kept in memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCookieStore {
    /// Path applied to writes without a `path` attribute.
    #[serde(default = "default_document_path")]
    document_path: String,
    #[serde(default)]
    cookies: Vec<StoredCookie>,
}

impl Default for MemoryCookieStore {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
            cookies: Vec::new(),
        }
    }
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `path` for writes that carry no `path` attribute.
    pub fn with_document_path(mut self, path: impl Into<String>) -> Self {
        self.document_path = path.into();
        self
    }

    /// All records in storage order, including expired ones not yet purged.
    pub fn cookies(&self) -> &[StoredCookie] {
        &self.cookies
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Drop records that have expired at `now`.
    pub fn purge_expired_at(&mut self, now: SystemTime) {
        self.cookies.retain(|cookie| !cookie.is_expired_at(now));
    }

    /// Ambient string as seen at `now`.
    pub fn read_all_at(&self, now: SystemTime) -> String {
        self.cookies
            .iter()
            .filter(|cookie| !cookie.is_expired_at(now))
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Apply a cookie line as if written at `now`.
    pub fn write_entry_at(&mut self, line: &str, now: SystemTime) {
        let Some(write) = self.parse_line(line, now) else {
            return;
        };

        let position = self
            .cookies
            .iter()
            .position(|cookie| cookie.same_identity(&write.cookie));

        match (position, write.deletes) {
            (Some(index), true) => {
                self.cookies.remove(index);
            }
            (None, true) => {}
            (Some(index), false) => self.cookies[index] = write.cookie,
            (None, false) => self.cookies.push(write.cookie),
        }
    }

    fn parse_line(&self, line: &str, now: SystemTime) -> Option<ParsedWrite> {
        let parsed = match Cookie::parse(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::debug!("Ignoring malformed cookie line '{}': {}", line, err);
                return None;
            }
        };

        let now_secs = i64::try_from(unix_seconds(now)).unwrap_or(i64::MAX);
        let max_age = parsed.max_age().map(|age| age.whole_seconds());
        let expires = parsed
            .expires()
            .and_then(|expires| expires.datetime())
            .map(|at| at.unix_timestamp());

        let (deletes, expires_at) = match (max_age, expires) {
            (Some(age), _) if age <= 0 => (true, None),
            (Some(age), _) => (false, Some(now_secs.saturating_add(age))),
            (None, Some(at)) if at <= now_secs => (true, None),
            (None, Some(at)) => (false, Some(at)),
            (None, None) => (false, None),
        };

        let domain = parsed
            .domain()
            .map(|domain| domain.trim_start_matches('.').to_ascii_lowercase())
            .filter(|domain| !domain.is_empty());
        let path = parsed
            .path()
            .filter(|path| !path.is_empty())
            .map_or_else(|| self.document_path.clone(), str::to_string);

        Some(ParsedWrite {
            cookie: StoredCookie {
                name: parsed.name().to_string(),
                value: parsed.value().to_string(),
                domain,
                path,
                secure: parsed.secure().unwrap_or(false),
                expires_at: expires_at.and_then(|at| u64::try_from(at).ok()),
            },
            deletes,
        })
    }
}

impl CookieSource for MemoryCookieStore {
    fn read_all(&self) -> String {
        self.read_all_at(SystemTime::now())
    }

    fn write_entry(&mut self, line: &str) {
        self.write_entry_at(line, SystemTime::now())
    }
}
