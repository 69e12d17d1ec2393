//! Process-wide file logging for the recipe store.
//!
//! Logs go to a size-rotated file under a caller-chosen absolute directory.
//! The first successful `init_logging` fixes the settings for the process:
//! repeating it with the same settings is a no-op, different settings are
//! rejected. Without it, `log` macros in this crate are silently dropped.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Directory for log files; logging stays off when unset or empty.
pub const LOG_DIR_ENV: &str = "RECIPEBOX_LOG_DIR";
/// `trace|debug|info|warn|error`; defaults to `default_log_level()`.
pub const LOG_LEVEL_ENV: &str = "RECIPEBOX_LOG_LEVEL";

const LOG_FILE_BASENAME: &str = "recipebox";
const ROTATE_AT_BYTES: u64 = 4 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 3;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    level: &'static str,
    dir: PathBuf,
}

#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    RelativeDir(PathBuf),
    AlreadyActive {
        active: LogSettings,
        requested: LogSettings,
    },
    CreateDir(std::io::Error),
    Backend(FlexiLoggerError),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::AlreadyActive { active, requested } => write!(
                f,
                "logging already active as {}@{}; cannot switch to {}@{}",
                active.level,
                active.dir.display(),
                requested.level,
                requested.dir.display()
            ),
            Self::CreateDir(err) => write!(f, "cannot create log directory: {err}"),
            Self::Backend(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir(err) => Some(err),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

impl LogSettings {
    pub fn new(level: &str, dir: impl Into<PathBuf>) -> Result<Self, LoggingError> {
        let dir = dir.into();
        if !dir.is_absolute() {
            return Err(LoggingError::RelativeDir(dir));
        }
        Ok(Self {
            level: parse_level(level)?,
            dir,
        })
    }

    /// Reads `RECIPEBOX_LOG_DIR` and `RECIPEBOX_LOG_LEVEL`.
    ///
    /// Returns `Ok(None)` when no log directory is configured.
    pub fn from_env() -> Result<Option<Self>, LoggingError> {
        settings_from(
            std::env::var(LOG_DIR_ENV).ok(),
            std::env::var(LOG_LEVEL_ENV).ok(),
        )
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Starts the file logger, or confirms it already runs with `settings`.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    let active = ACTIVE.get_or_try_init(|| start_logger(settings))?;
    if active.settings != *settings {
        return Err(LoggingError::AlreadyActive {
            active: active.settings.clone(),
            requested: settings.clone(),
        });
    }
    Ok(())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: &LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.dir).map_err(LoggingError::CreateDir)?;

    let handle = Logger::try_with_str(settings.level)?
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={}",
        settings.level,
        settings.dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        settings: settings.clone(),
        _handle: handle,
    })
}

fn settings_from(
    dir: Option<String>,
    level: Option<String>,
) -> Result<Option<LogSettings>, LoggingError> {
    let Some(dir) = dir.filter(|dir| !dir.trim().is_empty()) else {
        return Ok(None);
    };
    let level = level.unwrap_or_else(|| default_log_level().to_string());
    LogSettings::new(&level, dir.trim()).map(Some)
}

fn parse_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(LoggingError::UnknownLevel(level.to_string())),
    }
}
