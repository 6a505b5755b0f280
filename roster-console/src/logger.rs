//! Logging setup
//!
//! Console output goes to stderr so stdout stays clean for the table.
//! `RUST_LOG` overrides the default filter.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "warn,roster=info,roster_console=info,roster_client=info";

/// Initialize the global subscriber. With `log_dir` set, a daily rolling
/// file is written as well; keep the returned guard alive until exit or
/// buffered lines are lost.
pub fn init_logger(verbose: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = if let Ok(from_env) = EnvFilter::try_from_default_env() {
        from_env
    } else if verbose {
        EnvFilter::new("info,roster=debug,roster_console=debug,roster_client=debug")
    } else {
        EnvFilter::new(DEFAULT_FILTER)
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "roster.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if let Some(dir) = log_dir {
        tracing::debug!(path = %dir.display(), "File logging enabled");
    }
    guard
}
