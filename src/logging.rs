//! Tracing setup shared by both binaries.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::platform;

/// Installs the global subscriber: human-readable logs on stderr plus daily-rotated
/// JSON files named `{component}.log` under the platform log directory.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Keep the returned guard alive
/// for the life of the process so buffered file logs are flushed on exit. When the
/// log directory cannot be created, only stderr logging is installed.
pub fn init_logging(component: &str) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let log_dir = platform::get_log_dir();
    let (file_layer, guard) = match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let appender = rolling::daily(&log_dir, format!("{}.log", component));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false).json();
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("File logging disabled, cannot create {}: {}", log_dir.display(), e);
            (None, None)
        }
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    guard
}
