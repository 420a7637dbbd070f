//! Log output setup
//!
//! The filter comes from `RUST_LOG` (default `warn`). While the editor owns
//! the terminal, logs go to a file or nowhere.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Where log lines are written
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber for `target`.
pub fn init(target: LogTarget<'_>) -> io::Result<()> {
    match target {
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(env_filter());
            tracing_subscriber::registry().with(layer).init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_filter(env_filter());
            tracing_subscriber::registry().with(layer).init();
        }
        LogTarget::Off => {}
    }
    Ok(())
}
