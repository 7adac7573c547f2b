//! File logging. The terminal belongs to the keyboard, so logs only go to a
//! file, and only when one is asked for.

use crate::runtime::ProgramError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "paraboard=info";

/// Install a global subscriber writing to `log_file`.
///
/// Returns `None` without installing anything when no file is given. Keep
/// the guard alive for the whole run or buffered lines are lost.
pub fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>, ProgramError> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "paraboard.log".to_string());

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();

    tracing::info!(target: "paraboard::logging", path = %path.display(), "logging started");
    Ok(Some(guard))
}
