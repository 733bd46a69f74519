use flowdash_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over everything; otherwise `--dev` means `debug` and the
/// configured level applies. Output goes to stderr so command output on
/// stdout stays clean.
pub fn init(config: &LoggingConfig, dev: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config, dev)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // Already installed (e.g. in tests) is fine.
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn default_directive(config: &LoggingConfig, dev: bool) -> String {
    if dev {
        "debug".to_string()
    } else {
        config.level.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_overrides_configured_level() {
        let config = LoggingConfig {
            level: "warn".into(),
            json: false,
        };
        assert_eq!(default_directive(&config, true), "debug");
        assert_eq!(default_directive(&config, false), "warn");
    }
}
