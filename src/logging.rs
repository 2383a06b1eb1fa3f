//! Tracing setup.
//!
//! The terminal belongs to the UI, so log output goes to a file. `RUST_LOG`
//! takes precedence over the configured level.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LoggingConfig, APP_NAME};

/// `<data dir>/nutrition-tui/nutrition-tui.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_NAME).join(format!("{APP_NAME}.log")))
}

fn open_log_file(config: &LoggingConfig) -> io::Result<(PathBuf, File)> {
    let path = config
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no data directory"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the global subscriber. Returns the log file path, or `None` when
/// no file could be opened and logging stays off.
pub fn init(config: &LoggingConfig) -> Option<PathBuf> {
    let (path, file) = match open_log_file(config) {
        Ok(opened) => opened,
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            return None;
        }
    };

    let installed = fmt()
        .with_env_filter(env_filter(&config.level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    if let Err(err) = installed {
        eprintln!("warning: logging disabled: {err}");
        return None;
    }
    Some(path)
}
