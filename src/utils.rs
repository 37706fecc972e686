//! Utility functions and helpers

use crate::config::Expiration;
use crate::error::{CookieError, Result};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[cfg(test)]
mod tests;

/// Percent-encoding with `encodeURIComponent` rules
pub struct EncodeUtils;

impl EncodeUtils {
    /// Characters left untouched besides ASCII alphanumerics.
    const UNRESERVED_MARKS: &'static [char] = &['-', '_', '.', '!', '~', '*', '\'', '(', ')'];

    /// Percent-encode a cookie key or value.
    pub fn encode_component(input: &str) -> String {
        let mut encoded = String::with_capacity(input.len());
        let mut buf = [0u8; 4];
        for ch in input.chars() {
            if ch.is_ascii_alphanumeric() || Self::UNRESERVED_MARKS.contains(&ch) {
                encoded.push(ch);
            } else {
                encoded.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
            }
        }
        encoded
    }

    /// Percent-decode a cookie key or value. `None` if the bytes are not UTF-8.
    pub fn decode_component(input: &str) -> Option<String> {
        urlencoding::decode(input).ok().map(|decoded| decoded.into_owned())
    }

    /// Decode, falling back to the raw input.
    pub fn decode_or_raw(input: &str) -> String {
        Self::decode_component(input).unwrap_or_else(|| {
            log::trace!("Keeping undecodable cookie text as-is: {}", input);
            input.to_string()
        })
    }
}

/// Unit suffix of a relative expiration such as `10d`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    /// Case-insensitive suffix lookup.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "y" => Some(TimeUnit::Year),
            "m" => Some(TimeUnit::Month),
            "d" => Some(TimeUnit::Day),
            "h" => Some(TimeUnit::Hour),
            "min" => Some(TimeUnit::Minute),
            "s" => Some(TimeUnit::Second),
            _ => None,
        }
    }

    /// Months are 30 days and years are 360 days.
    pub fn seconds(self) -> i64 {
        match self {
            TimeUnit::Year => 31_104_000,
            TimeUnit::Month => 2_592_000,
            TimeUnit::Day => 86_400,
            TimeUnit::Hour => 3_600,
            TimeUnit::Minute => 60,
            TimeUnit::Second => 1,
        }
    }
}

/// Expiration clause rendering
pub struct ExpiryUtils;

impl ExpiryUtils {
    /// Last date an `expires` attribute can carry.
    pub const FAR_FUTURE: &'static str = "Fri, 31 Dec 9999 23:59:59 GMT";
    /// Already-expired date used for removals.
    pub const EPOCH: &'static str = "Thu, 01 Jan 1970 00:00:00 GMT";
    /// Lifetime used when no expiration resolves.
    pub const DEFAULT_MAX_AGE: i64 = 86_400;

    const MAX_HTTP_DATE_SECS: u64 = 253_402_300_799;

    /// Split `<digits><unit>` into its parts.
    pub fn split_relative(input: &str) -> Option<(&str, TimeUnit)> {
        let digits_end = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());
        if digits_end == 0 {
            return None;
        }
        let (digits, suffix) = input.split_at(digits_end);
        TimeUnit::from_suffix(suffix).map(|unit| (digits, unit))
    }

    /// Seconds for a relative expiration. `Some(None)` when the product overflows.
    pub fn relative_seconds(input: &str) -> Option<Option<i64>> {
        let (digits, unit) = Self::split_relative(input)?;
        Some(
            digits
                .parse::<i64>()
                .ok()
                .and_then(|count| count.checked_mul(unit.seconds())),
        )
    }

    /// Render an IMF-fixdate, clamped to the range an HTTP date can express.
    pub fn http_date(time: SystemTime) -> String {
        let latest = UNIX_EPOCH + Duration::from_secs(Self::MAX_HTTP_DATE_SECS);
        httpdate::fmt_http_date(time.clamp(UNIX_EPOCH, latest))
    }

    /// Build the `; max-age=` / `; expires=` clause for a write.
    pub fn clause(expires: Option<&Expiration>) -> String {
        let Some(expires) = expires else {
            return format!("; max-age={}", Self::DEFAULT_MAX_AGE);
        };
        match expires {
            Expiration::Never | Expiration::Seconds(-1) => {
                format!("; expires={}", Self::FAR_FUTURE)
            }
            Expiration::Seconds(seconds) => format!("; max-age={}", seconds),
            Expiration::Text(text) => match Self::relative_seconds(text) {
                Some(Some(seconds)) => format!("; max-age={}", seconds),
                Some(None) => {
                    log::debug!("Relative expiration '{}' overflows; never expiring", text);
                    format!("; expires={}", Self::FAR_FUTURE)
                }
                None => format!("; expires={}", text),
            },
            Expiration::At(time) => format!("; expires={}", Self::http_date(*time)),
        }
    }
}

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand tilde (~) in file paths
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        let rest = match path {
            "~" => "",
            _ => match path.strip_prefix("~/") {
                Some(rest) => rest,
                None => return Ok(PathBuf::from(path)),
            },
        };
        dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or_else(|| CookieError::Config("Cannot determine home directory".to_string()))
    }

    /// Jar file used when none is given on the command line.
    pub fn default_jar_path() -> Result<PathBuf> {
        Self::expand_path("~/.cookiekit/jar.json")
    }
}
