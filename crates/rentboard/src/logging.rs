//! File logging for the TUI
//!
//! The alternate screen owns stdout, so every trace line goes to a file.
//! One previous generation is kept next to it as `<name>.1`.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Roll the file over once it passes 5 MB
const ROLL_SIZE: u64 = 5 * 1024 * 1024;

const DEFAULT_FILTER: &str = "rentboard=info,rentboard_core=info,rentboard_tui=warn";

/// `<cache dir>/rentboard/rentboard.log`, or the temp dir when the platform
/// has no cache dir
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("rentboard")
        .join("rentboard.log")
}

fn previous_generation(log_path: &Path) -> PathBuf {
    let mut name = log_path.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}

/// Move an oversized log aside, replacing the older generation.
/// Returns where the old contents went.
fn roll_over(log_path: &Path, limit: u64) -> io::Result<Option<PathBuf>> {
    let size = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    if size <= limit {
        return Ok(None);
    }

    let previous = previous_generation(log_path);
    match fs::remove_file(&previous) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }
    fs::rename(log_path, &previous)?;
    Ok(Some(previous))
}

/// Install the global subscriber writing to `log_path`.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_logging(log_path: &Path) -> Result<()> {
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    let rolled = roll_over(log_path, ROLL_SIZE);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    match rolled {
        Ok(Some(previous)) => {
            tracing::info!(previous = %previous.display(), "Previous log rolled over")
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Log roll-over failed, appending"),
    }
    tracing::info!(log_path = %log_path.display(), "Logging initialized");
    Ok(())
}
