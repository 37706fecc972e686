//! Configuration for cookie writes
//!
//! [`CookieDefaults`] holds the per-accessor defaults consulted by every
//! `set`/`remove` that does not override them. [`CookieOptions`] and
//! [`ConfigOptions`] carry per-call and configuration overrides.

use std::convert::Infallible;
use std::str::FromStr;
use std::time::SystemTime;

/// Expiration policy for a cookie write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expiration {
    /// Relative lifetime in seconds. `-1` means "never expires".
    Seconds(i64),
    /// Never expires (pinned to the last representable HTTP date).
    Never,
    /// Either `<integer><unit>` (`10d`, `2h`, `30min`, ...) or a literal date string.
    Text(String),
    /// Absolute point in time.
    At(SystemTime),
}

impl Expiration {
    /// `0` and the empty string count as "not given" and fall back to the default.
    pub fn is_unset(&self) -> bool {
        match self {
            Expiration::Seconds(seconds) => *seconds == 0,
            Expiration::Text(text) => text.is_empty(),
            Expiration::Never | Expiration::At(_) => false,
        }
    }
}

impl From<i64> for Expiration {
    fn from(seconds: i64) -> Self {
        Expiration::Seconds(seconds)
    }
}

impl From<&str> for Expiration {
    fn from(text: &str) -> Self {
        Expiration::Text(text.to_string())
    }
}

impl From<String> for Expiration {
    fn from(text: String) -> Self {
        Expiration::Text(text)
    }
}

impl From<SystemTime> for Expiration {
    fn from(time: SystemTime) -> Self {
        Expiration::At(time)
    }
}

/// Parses command line input: `inf`/`infinity`/`never` and signed integers
/// become numeric policies, anything else is kept as text.
impl FromStr for Expiration {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "inf" | "infinity" | "never" => return Ok(Expiration::Never),
            _ => {}
        }
        if let Ok(seconds) = trimmed.parse::<i64>() {
            return Ok(Expiration::Seconds(seconds));
        }
        Ok(Expiration::Text(trimmed.to_string()))
    }
}

/// Per-call options for `set` and `remove`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub expires: Option<Expiration>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expires(mut self, expires: impl Into<Expiration>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

/// Options accepted by `config`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOptions {
    pub expires: Option<Expiration>,
    pub path: Option<String>,
}

impl ConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expires(mut self, expires: impl Into<Expiration>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Defaults consulted by writes that do not override them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDefaults {
    pub expires: Expiration,
    /// Rendered path attribute, e.g. `"; path=/"`. Empty suppresses the attribute.
    pub path_clause: String,
}

impl Default for CookieDefaults {
    fn default() -> Self {
        CookieDefaults {
            expires: Expiration::Text("1d".to_string()),
            path_clause: "; path=/".to_string(),
        }
    }
}

impl CookieDefaults {
    /// Merge `options` into the defaults in place.
    pub fn apply(&mut self, options: ConfigOptions) {
        if let Some(expires) = options.expires {
            if !expires.is_unset() {
                self.expires = expires;
            }
        }
        match options.path.as_deref() {
            None => {}
            Some("") => self.path_clause.clear(),
            Some(path) => self.path_clause = format!("; path={}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn defaults_are_one_day_at_root() {
        let defaults = CookieDefaults::default();
        assert_eq!(defaults.expires, Expiration::Text("1d".to_string()));
        assert_eq!(defaults.path_clause, "; path=/");
    }

    #[test]
    fn apply_overwrites_expiration_and_path() {
        let mut defaults = CookieDefaults::default();
        defaults.apply(ConfigOptions::new().expires("2h").path("app"));
        assert_eq!(defaults.expires, Expiration::Text("2h".to_string()));
        assert_eq!(defaults.path_clause, "; path=app");
    }

    #[test]
    fn apply_empty_path_suppresses_clause() {
        let mut defaults = CookieDefaults::default();
        defaults.apply(ConfigOptions::new().path(""));
        assert_eq!(defaults.path_clause, "");
    }

    #[test]
    fn apply_ignores_unset_expiration_and_missing_path() {
        let mut defaults = CookieDefaults::default();
        defaults.apply(ConfigOptions::new().expires(0));
        defaults.apply(ConfigOptions::new().expires(""));
        assert_eq!(defaults, CookieDefaults::default());
    }

    #[test]
    fn expiration_from_str_recognizes_numbers_and_infinity() {
        assert_eq!("infinity".parse::<Expiration>(), Ok(Expiration::Never));
        assert_eq!("INF".parse::<Expiration>(), Ok(Expiration::Never));
        assert_eq!("-1".parse::<Expiration>(), Ok(Expiration::Seconds(-1)));
        assert_eq!("3600".parse::<Expiration>(), Ok(Expiration::Seconds(3600)));
        assert_eq!(
            "10d".parse::<Expiration>(),
            Ok(Expiration::Text("10d".to_string()))
        );
    }

    #[test]
    fn options_builder_sets_fields() {
        let at = UNIX_EPOCH + Duration::from_secs(60);
        let options = CookieOptions::new()
            .expires(at)
            .path("/docs")
            .domain("example.com")
            .secure(true);
        assert_eq!(options.expires, Some(Expiration::At(at)));
        assert_eq!(options.path.as_deref(), Some("/docs"));
        assert_eq!(options.domain.as_deref(), Some("example.com"));
        assert!(options.secure);
    }
}
