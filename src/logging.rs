use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

pub const LOG_ENV_VAR: &str = "PDFX_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file; the terminal UI owns stdout and stderr.
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    pub fn for_terminal_ui(config: &LogConfig) -> Self {
        match config.resolved_file() {
            Some(path) => Self::File(path),
            None => Self::Stderr,
        }
    }
}

pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(config: &LogConfig, target: LogTarget) -> AppResult<()> {
    let filter = env_filter(config);
    let installed = match target {
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
        }
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> AppResult<fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| {
            AppError::io_with_context(
                err,
                format!("failed to create log directory {}", parent.display()),
            )
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| {
            AppError::io_with_context(err, format!("failed to open log file {}", path.display()))
        })
}
