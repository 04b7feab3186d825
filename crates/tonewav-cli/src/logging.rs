//! Diagnostic logging setup.
//!
//! Logs always go to stderr so that stdout stays free for audio bytes.

use tracing_subscriber::EnvFilter;

/// Maps the verbosity flags to a filter directive.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the global subscriber.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::new(level_for(verbose, quiet));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(1, false), "info");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(7, false), "debug");
        assert_eq!(level_for(3, true), "error");
    }
}
