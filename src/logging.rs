//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging. `RUST_LOG` overrides the default filter.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

#[cfg(test)]
mod tests {
    use super::init;

    #[test]
    fn init_can_run_more_than_once() {
        init(false);
        init(true);
        assert!(log::log_enabled!(log::Level::Warn) || std::env::var_os("RUST_LOG").is_some());
    }
}
