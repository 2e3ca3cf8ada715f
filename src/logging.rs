/*
 * Logging Module
 *
 * Tracing set-up shared by the binary and the tests. `RUST_LOG` selects the
 * filter as usual; without it (or with an unparsable value) the filter falls
 * back to `info`, so run summaries are visible by default.
 */

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "info";

// Build the filter from a `RUST_LOG`-style directive string
pub fn env_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

pub fn init_tracing() {
    let directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive.as_deref()))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    fn enabled_levels(filter: EnvFilter) -> (bool, bool) {
        let subscriber = tracing_subscriber::registry().with(filter);
        tracing::subscriber::with_default(subscriber, || {
            (tracing::enabled!(Level::INFO), tracing::enabled!(Level::DEBUG))
        })
    }

    #[test]
    fn defaults_to_info_without_directive() {
        assert_eq!(enabled_levels(env_filter(None)), (true, false));
        assert_eq!(enabled_levels(env_filter(Some("  "))), (true, false));
    }

    #[test]
    fn explicit_directive_wins() {
        assert_eq!(enabled_levels(env_filter(Some("debug"))), (true, true));
        assert_eq!(enabled_levels(env_filter(Some("error"))), (false, false));
    }
}
