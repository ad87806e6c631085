//! Logging setup for embedding applications.
//!
//! Installs a global tracing subscriber writing to stdout and a
//! per-launch log file under the app directory. Log files carry a launch
//! timestamp; older launches are pruned to a bounded count once the
//! subscriber is live, so pruning problems surface as ordinary warnings
//! instead of failing startup.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Maximum number of log files to retain.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "roam";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// No platform-specific directory could be resolved for logs.
    #[error("No suitable directory available for logs")]
    NoLogDir,
    /// Failed to create or access the log directory.
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to format a timestamp for the log filename.
    #[error("Failed to format log filename time: {0}")]
    FormatTime(time::error::Format),
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
    /// Failed to create the log file for this launch.
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Initialize tracing to write to stdout and a per-launch log file.
///
/// Subsequent calls are no-ops. Errors are returned so a presenter can
/// keep running without file logging rather than abort.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir().map_err(map_app_dir_error)?;
    let log_file_name = launch_log_name()?;
    let log_path = log_dir.join(&log_file_name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|source| LoggingError::CreateLogFile {
            path: log_path.clone(),
            source,
        })?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, log_file_name));

    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_GUARD.set(guard);

    prune_old_logs(&log_dir, MAX_LOG_FILES);
    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(())
}

/// Name the log file for this launch after the current wall-clock time,
/// local when resolvable, UTC otherwise.
fn launch_log_name() -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let stamp = now.format(NAME_FORMAT).map_err(LoggingError::FormatTime)?;
    Ok(format!("{LOG_FILE_PREFIX}_{stamp}.log"))
}

/// Delete the oldest `.log` files beyond `max_files`. Best-effort: runs
/// after the subscriber is installed, so failures only warn.
fn prune_old_logs(dir: &Path, max_files: usize) {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) => {
            tracing::warn!("Skipping log pruning, cannot read {}: {err}", dir.display());
            return;
        }
    };
    let mut logs = read_dir
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect::<Vec<_>>();

    logs.sort_by_key(|(modified, _)| *modified);
    let excess = logs.len().saturating_sub(max_files);
    for (_, path) in logs.into_iter().take(excess) {
        if let Err(err) = fs::remove_file(&path) {
            tracing::warn!("Failed to remove old log file {}: {err}", path.display());
        }
    }
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> LoggingError {
    match error {
        app_dirs::AppDirError::NoBaseDir => LoggingError::NoLogDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            LoggingError::CreateDir { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs::File, thread, time::Duration};
    use tempfile::tempdir;

    #[test]
    fn log_filename_has_timestamp_and_prefix() {
        let name = launch_log_name().unwrap();
        assert!(name.starts_with("roam_"));
        assert!(name.ends_with(".log"));
        // roam_YYYY-MM-DD_HH-MM-SS.log
        assert_eq!(name.len(), "roam_0000-00-00_00-00-00.log".len());
    }

    #[test]
    fn prune_removes_oldest_files_beyond_limit() {
        let dir = tempdir().unwrap();
        for idx in 0..12 {
            File::create(dir.path().join(format!("roam_{idx}.log"))).unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        File::create(dir.path().join("notes.txt")).unwrap();

        prune_old_logs(dir.path(), MAX_LOG_FILES);
        let remaining = fs::read_dir(dir.path())
            .unwrap()
            .filter(|entry| {
                entry.as_ref().ok().map(|e| e.path()).is_some_and(|path| {
                    path.extension().and_then(|ext| ext.to_str()) == Some("log")
                })
            })
            .count();
        assert_eq!(remaining, MAX_LOG_FILES);
        // Oldest launches went first.
        assert!(!dir.path().join("roam_0.log").exists());
        assert!(!dir.path().join("roam_1.log").exists());
        assert!(dir.path().join("roam_11.log").exists());
        // Non-log files are never touched.
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn prune_ignores_missing_directories() {
        let dir = tempdir().unwrap();
        prune_old_logs(&dir.path().join("gone"), MAX_LOG_FILES);
    }
}
