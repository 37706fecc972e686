//! Cookie sources
//!
//! A [`CookieSource`] owns the ambient cookie string: reading returns every
//! visible `name=value` pair joined by `"; "`, writing hands over a single
//! `Set-Cookie` style line that the source merges by key, the way a browser
//! treats assignments to `document.cookie`.

pub mod file;
pub mod memory;

pub use file::FileCookieStore;
pub use memory::{MemoryCookieStore, StoredCookie};

/// Capability over an ambient cookie string
pub trait CookieSource {
    /// Return the full ambient cookie string.
    fn read_all(&self) -> String;

    /// Apply one cookie line (`name=value; attr; ...`) to the store.
    fn write_entry(&mut self, line: &str);
}

impl<S: CookieSource + ?Sized> CookieSource for &mut S {
    fn read_all(&self) -> String {
        (**self).read_all()
    }

    fn write_entry(&mut self, line: &str) {
        (**self).write_entry(line)
    }
}

impl<S: CookieSource + ?Sized> CookieSource for Box<S> {
    fn read_all(&self) -> String {
        (**self).read_all()
    }

    fn write_entry(&mut self, line: &str) {
        (**self).write_entry(line)
    }
}

/// Split an ambient cookie string into `(name, value)` pairs.
///
/// Names are trimmed, values lose their leading whitespace, and segments
/// without `=` are skipped. Values are returned still percent-encoded.
pub fn entries(ambient: &str) -> impl Iterator<Item = (&str, &str)> {
    ambient.split(';').filter_map(|segment| {
        let (name, value) = segment.split_once('=')?;
        Some((name.trim(), value.trim_start()))
    })
}
