//! Cookie accessor
//!
//! [`Cookies`] reads, writes, enumerates and deletes entries of an ambient
//! cookie string held by a [`CookieSource`]. Keys and values are
//! percent-encoded on the way in and decoded on the way out; JSON objects are
//! stored as JSON text and handed back parsed.

use crate::config::{ConfigOptions, CookieDefaults, CookieOptions};
use crate::error::{CookieError, Result};
use crate::store::{self, CookieSource};
use crate::utils::{EncodeUtils, ExpiryUtils};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;


/// Attribute names that cannot be used as cookie keys (matched case-insensitively).
pub const RESERVED_KEYS: [&str; 5] = ["expires", "max-age", "path", "domain", "secure"];

/// A cookie value as read from or written to the store
#[derive(Debug, Clone, PartialEq)]
pub enum CookieValue {
    Text(String),
    Json(Value),
}

impl CookieValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CookieValue::Text(text) => Some(text),
            CookieValue::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            CookieValue::Json(value) => Some(value),
            CookieValue::Text(_) => None,
        }
    }

    /// Text stored in the cookie, before percent-encoding.
    fn stored_text(&self) -> String {
        match self {
            CookieValue::Text(text) | CookieValue::Json(Value::String(text)) => text.clone(),
            CookieValue::Json(value) => value.to_string(),
        }
    }
}

impl fmt::Display for CookieValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stored_text())
    }
}

impl From<&str> for CookieValue {
    fn from(text: &str) -> Self {
        CookieValue::Text(text.to_string())
    }
}

impl From<String> for CookieValue {
    fn from(text: String) -> Self {
        CookieValue::Text(text)
    }
}

impl From<&String> for CookieValue {
    fn from(text: &String) -> Self {
        CookieValue::Text(text.clone())
    }
}

impl From<Value> for CookieValue {
    fn from(value: Value) -> Self {
        CookieValue::Json(value)
    }
}

impl From<Map<String, Value>> for CookieValue {
    fn from(map: Map<String, Value>) -> Self {
        CookieValue::Json(Value::Object(map))
    }
}

/// Accessor over an ambient cookie string
#[derive(Debug)]
pub struct Cookies<S: CookieSource> {
    source: S,
    defaults: CookieDefaults,
}

impl<S: CookieSource> Cookies<S> {
    /// Create an accessor with the built-in defaults (one day, path `/`).
    pub fn new(source: S) -> Self {
        Self::with_defaults(source, CookieDefaults::default())
    }

    pub fn with_defaults(source: S, defaults: CookieDefaults) -> Self {
        Self { source, defaults }
    }

    pub fn defaults(&self) -> &CookieDefaults {
        &self.defaults
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Update the defaults used by later writes.
    pub fn config(&mut self, options: ConfigOptions) {
        self.defaults.apply(options);
        log::debug!("Cookie defaults now {:?}", self.defaults);
    }

    /// Look up `key`, parsing `{...}` values as JSON when they are valid JSON.
    ///
    /// Absent keys and empty values both yield `None`.
    pub fn get(&self, key: &str) -> Option<CookieValue> {
        let text = self.get_text(key)?;
        if text.starts_with('{') && text.ends_with('}') {
            match serde_json::from_str::<Value>(&text) {
                Ok(value) => return Some(CookieValue::Json(value)),
                Err(err) => log::debug!("Cookie '{}' is not valid JSON: {}", key, err),
            }
        }
        Some(CookieValue::Text(text))
    }

    /// Look up `key` and return its decoded text without JSON detection.
    ///
    /// When the key occurs more than once the last occurrence wins.
    pub fn get_text(&self, key: &str) -> Option<String> {
        let encoded_key = EncodeUtils::encode_component(key);
        let ambient = self.source.read_all();
        let raw = store::entries(&ambient)
            .filter(|(name, _)| *name == encoded_key)
            .last()
            .map(|(_, value)| value)?;
        let decoded = EncodeUtils::decode_or_raw(raw);
        if decoded.is_empty() {
            None
        } else {
            Some(decoded)
        }
    }

    /// Write `key`. Fails for an empty or reserved key.
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<CookieValue>,
        options: CookieOptions,
    ) -> Result<&mut Self> {
        let line = self.build_set_line(key, &value.into(), &options)?;
        log::debug!("Setting cookie '{}'", key);
        self.source.write_entry(&line);
        Ok(self)
    }

    /// Serialize `value` with serde and write it under `key`.
    pub fn set_json<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
        options: CookieOptions,
    ) -> Result<&mut Self> {
        let value = serde_json::to_value(value)?;
        self.set(key, value, options)
    }

    /// The line `set` would write, without writing it.
    pub fn build_set_line(
        &self,
        key: &str,
        value: &CookieValue,
        options: &CookieOptions,
    ) -> Result<String> {
        validate_key(key)?;

        let expires = [options.expires.as_ref(), Some(&self.defaults.expires)]
            .into_iter()
            .flatten()
            .find(|expires| !expires.is_unset());

        Ok(format!(
            "{}={}{}{}{}{}",
            EncodeUtils::encode_component(key),
            EncodeUtils::encode_component(&value.stored_text()),
            ExpiryUtils::clause(expires),
            domain_clause(options),
            self.path_clause(options),
            if options.secure { "; secure" } else { "" },
        ))
    }

    /// Expire `key`. Returns `None` without writing when the key is absent.
    pub fn remove(&mut self, key: &str, options: CookieOptions) -> Option<&mut Self> {
        if key.is_empty() || !self.is_key(key) {
            return None;
        }
        let line = format!(
            "{}=; expires={}{}{}",
            EncodeUtils::encode_component(key),
            ExpiryUtils::EPOCH,
            domain_clause(&options),
            self.path_clause(&options),
        );
        log::debug!("Removing cookie '{}'", key);
        self.source.write_entry(&line);
        Some(self)
    }

    /// Whether an entry named `key` exists.
    pub fn is_key(&self, key: &str) -> bool {
        let encoded_key = EncodeUtils::encode_component(key);
        let ambient = self.source.read_all();
        let found = store::entries(&ambient).any(|(name, _)| name == encoded_key);
        found
    }

    /// Decoded names of every entry, in storage order.
    pub fn keys(&self) -> Vec<String> {
        let ambient = self.source.read_all();
        if ambient.is_empty() {
            return Vec::new();
        }
        store::entries(&ambient)
            .map(|(name, _)| EncodeUtils::decode_or_raw(name))
            .collect()
    }

    fn path_clause(&self, options: &CookieOptions) -> String {
        match options.path.as_deref() {
            Some(path) if !path.is_empty() => format!("; path={}", path),
            _ => self.defaults.path_clause.clone(),
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CookieError::MissingKey);
    }
    if RESERVED_KEYS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(key))
    {
        return Err(CookieError::ReservedKey(key.to_string()));
    }
    Ok(())
}

fn domain_clause(options: &CookieOptions) -> String {
    match options.domain.as_deref() {
        Some(domain) if !domain.is_empty() => format!("; domain={}", domain),
        _ => String::new(),
    }
}
