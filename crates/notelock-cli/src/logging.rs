//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "NOTELOCK_LOG";

/// Pick the filter directive: `-v` flags win, then `NOTELOCK_LOG`, then the
/// config file, then `warn`.
pub fn filter_directive(verbose: u8, env_value: Option<&str>, config_level: Option<&str>) -> String {
    match verbose {
        0 => {}
        1 => return "notelock_core=debug,notelock_cli=debug".to_string(),
        _ => return "notelock_core=trace,notelock_cli=trace".to_string(),
    }
    env_value
        .filter(|v| !v.trim().is_empty())
        .or(config_level)
        .unwrap_or("warn")
        .to_string()
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for note content and JSON.
pub fn init(verbose: u8, config_level: Option<&str>) {
    let env_value = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(verbose, env_value.as_deref(), config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_wins() {
        assert_eq!(
            filter_directive(1, Some("error"), Some("info")),
            "notelock_core=debug,notelock_cli=debug"
        );
        assert_eq!(
            filter_directive(3, None, None),
            "notelock_core=trace,notelock_cli=trace"
        );
    }

    #[test]
    fn test_env_then_config_then_default() {
        assert_eq!(filter_directive(0, Some("info"), Some("debug")), "info");
        assert_eq!(filter_directive(0, Some("  "), Some("debug")), "debug");
        assert_eq!(filter_directive(0, None, None), "warn");
    }
}
