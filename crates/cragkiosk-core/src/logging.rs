//! Logging initialization shared by the kiosk binary and tools.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The verbosity count comes from the CLI (`-v` info, `-vv` debug,
/// `-vvv` trace). `RUST_LOG`, when set, wins over the flag.
pub fn init(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
