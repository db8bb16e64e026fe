use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tokio::task;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

const LOG_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 3);
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Keeps the file writer alive; drop it only at shutdown.
#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

/// Console + daily rolling file logging. `RUST_LOG` refines `level`.
///
/// Must be called from within a tokio runtime (old-log cleanup runs as a task).
pub fn init_logging(log_dir: impl AsRef<Path>, prefix: &str, level: &str) -> anyhow::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref().to_path_buf();

    let (default_level, level_ok) = parse_level(level);

    let builder = EnvFilter::builder().with_default_directive(default_level.into());
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let console_filter = builder.clone().parse_lossy(&rust_log);
    let file_filter = builder.parse_lossy(&rust_log);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log file appender in {:?}: {}", log_dir, e))?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .init();

    if !level_ok {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", level);
    }

    start_log_cleanup_task(log_dir, prefix.to_string());

    Ok(LoggerGuard(guard))
}

/// Returns the level to use and whether `level` was valid.
fn parse_level(level: &str) -> (LevelFilter, bool) {
    match level.to_ascii_lowercase().as_str() {
        "trace" => (LevelFilter::TRACE, true),
        "debug" => (LevelFilter::DEBUG, true),
        "info" => (LevelFilter::INFO, true),
        "warn" => (LevelFilter::WARN, true),
        "error" => (LevelFilter::ERROR, true),
        _ => (LevelFilter::INFO, false),
    }
}

fn start_log_cleanup_task(log_dir: PathBuf, prefix: String) {
    task::spawn(async move {
        loop {
            match cleanup_old_logs(&log_dir, &prefix, LOG_MAX_AGE) {
                Ok(0) => {}
                Ok(n) => tracing::info!("Deleted {} old log files", n),
                Err(e) => tracing::warn!("Failed to delete old log file: {}", e),
            }
            tokio::time::sleep(CLEANUP_INTERVAL).await;
        }
    });
}

/// Delete `<prefix>*.log` files in `log_dir` last modified more than
/// `max_age` ago. Returns how many were removed.
fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.starts_with(prefix) || !file_name.ends_with(".log") {
            continue;
        }

        let modified = fs::metadata(&path)?.modified()?;
        if now.duration_since(modified).unwrap_or_default() > max_age {
            fs::remove_file(&path)?;
            tracing::debug!("Old log file deleted: {}", file_name);
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), (LevelFilter::DEBUG, true));
        assert_eq!(parse_level("WARN"), (LevelFilter::WARN, true));
        assert_eq!(parse_level("loud"), (LevelFilter::INFO, false));
    }

    #[test]
    fn test_cleanup_only_touches_own_expired_logs() {
        let dir = tempfile::tempdir().unwrap();
        let own_log = dir.path().join("dsn-server.2026-10-01.log");
        let other_log = dir.path().join("other.2026-10-01.log");
        let own_text = dir.path().join("dsn-server.notes.txt");
        for path in [&own_log, &other_log, &own_text] {
            fs::write(path, "line\n").unwrap();
        }

        // Nothing is old enough yet.
        assert_eq!(cleanup_old_logs(dir.path(), "dsn-server", LOG_MAX_AGE).unwrap(), 0);
        assert!(own_log.exists());

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cleanup_old_logs(dir.path(), "dsn-server", Duration::ZERO).unwrap(), 1);
        assert!(!own_log.exists());
        assert!(other_log.exists());
        assert!(own_text.exists());
    }
}
