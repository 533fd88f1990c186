//! Diagnostics setup shared by both binaries. Everything goes to stderr so
//! that the tables and listings on stdout stay clean.

use tracing::Level;

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Level named by the environment variable `var`, `WARN` when it is unset or
/// not a level.
pub fn level_from_env(var: &str) -> Level {
    std::env::var(var)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(Level::WARN)
}
