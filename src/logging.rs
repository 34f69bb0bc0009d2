//! Diagnostic logging
//!
//! Library code logs through `tracing`; the binary installs one stderr
//! subscriber. `RUST_LOG` wins over the `-v` count when set.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "defuse=warn",
        1 => "defuse=info",
        2 => "defuse=debug",
        _ => "defuse=trace",
    }
}

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
        // a subscriber installed by an embedding program stays in place
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(verbosity >= 2)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_directive(0), "defuse=warn");
        assert_eq!(default_directive(1), "defuse=info");
        assert_eq!(default_directive(2), "defuse=debug");
        assert_eq!(default_directive(7), "defuse=trace");
    }

    #[test]
    fn init_is_idempotent() {
        init(0);
        init(3);
    }
}
