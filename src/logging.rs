use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV;

/// Filter used when `KURALSEARCH_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Pick the log filter: the environment override, else [`DEFAULT_FILTER`].
pub fn filter_directive(env: Option<String>) -> String {
    env.filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the stderr subscriber. Stdout is reserved for the JSON result.
pub fn init_tracing() {
    let directive = filter_directive(std::env::var(LOG_ENV).ok());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_default() {
        let directive = filter_directive(Some("kuralsearch=debug".into()));
        assert_eq!(directive, "kuralsearch=debug");
    }

    #[test]
    fn unset_env_uses_default() {
        assert_eq!(filter_directive(None), "info");
    }

    #[test]
    fn blank_env_uses_default() {
        assert_eq!(filter_directive(Some("  ".into())), "info");
    }
}
