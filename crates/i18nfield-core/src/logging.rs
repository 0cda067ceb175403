//! Logging integration for i18nfield-rs.
//!
//! Provides a helper for configuring [`tracing`]-based logging. Library code
//! emits `tracing` events (storage decode, validation failures); the host
//! decides whether and how to subscribe.

/// Sets up a global tracing subscriber.
///
/// The filter directive follows `tracing_subscriber::EnvFilter` syntax
/// (e.g. "debug", "info", "i18nfield_core=trace"). In debug mode a pretty,
/// human-readable format is used; otherwise a structured JSON format.
///
/// Installation is best-effort: if a subscriber is already set, this is a
/// no-op.
pub fn setup_logging(debug: bool, filter: &str) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_is_idempotent() {
        setup_logging(true, "debug");
        // A second call must not panic even though a subscriber is installed.
        setup_logging(false, "info");
    }
}
