use tracing_subscriber::{EnvFilter, fmt};

/// Log filter for a verbosity count
///
/// `RUST_LOG` is honoured when no `-v` flag is given.
pub fn filter_for(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Installs the stderr subscriber
pub fn init(verbose: u8) {
    let _ = fmt()
        .with_env_filter(filter_for(verbose))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn verbosity_raises_level() {
        assert_eq!(filter_for(1).to_string(), "info");
        assert_eq!(filter_for(2).to_string(), "debug");
        assert_eq!(filter_for(7).to_string(), "trace");
    }

    #[test]
    #[serial]
    fn default_filter_reads_rust_log() {
        unsafe { std::env::set_var("RUST_LOG", "debug") };
        assert_eq!(filter_for(0).to_string(), "debug");
        unsafe { std::env::remove_var("RUST_LOG") };
        assert_eq!(filter_for(0).to_string(), "warn");
    }

    #[test]
    #[serial]
    fn init_twice_is_harmless() {
        init(0);
        init(3);
    }
}
