// Logging setup.
// Routes tracing output to a file so it never draws over the terminal UI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Build the filter: RUST_LOG wins, otherwise the configured level for this crate.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,jobdeck={}", level)))
}

/// Initialize the global subscriber writing to `log_path`.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init(log_path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    tracing::info!(
        "jobdeck v{} starting, logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_log_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("jobdeck.log");

        init(&path, "debug").unwrap();
        assert!(path.exists());

        // A second init must not fail even though a subscriber exists.
        init(&path, "info").unwrap();
    }
}
