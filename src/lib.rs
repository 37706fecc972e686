//! cookiekit - a small accessor over a `document.cookie` style cookie string
//!
//! [`Cookies`] reads, writes, enumerates and deletes percent-encoded entries of
//! an ambient cookie string, with per-accessor defaults for expiration and
//! path. The ambient string lives behind the [`CookieSource`] capability, so
//! the same accessor runs against an in-memory store or a JSON jar file.

pub mod cli;
pub mod config;
pub mod cookies;
pub mod error;
pub mod exit_code;
pub mod logging;
pub mod store;
pub mod utils;

pub use config::{ConfigOptions, CookieDefaults, CookieOptions, Expiration};
pub use cookies::{CookieValue, Cookies, RESERVED_KEYS};
pub use error::{CookieError, Result};
pub use store::{CookieSource, FileCookieStore, MemoryCookieStore};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
