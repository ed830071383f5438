use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use once_cell::sync::OnceCell;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "tup";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Start rotated file logging under the given directory.
/// Repeat calls are no-ops; the first initialization wins.
pub fn init(level: &str, log_dir: &Path) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)
        .map_err(|e| format!("failed to create log directory {}: {}", log_dir.display(), e))?;

    let handle = Logger::try_with_str(level)
        .map_err(|e| format!("invalid log level '{}': {}", level, e))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .start()
        .map_err(|e| format!("failed to start logger: {}", e))?;

    let _ = LOGGER.set(handle);
    log::info!("logging started, level={}", level);
    Ok(())
}
