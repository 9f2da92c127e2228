use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::CONFIG;

/// Install the global subscriber: human-readable stdout plus a
/// daily-rolling file when `logging.log_dir` is set. The returned guard
/// owns the background file writer; the host keeps it alive for the
/// process lifetime.
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let cfg = &CONFIG.logging;

    let stdout_layer = fmt::layer()
        .with_ansi(true)
        .with_filter(cfg.stdout_level.parse::<LevelFilter>()?);

    let mut file_guard = None;
    let file_layer = if cfg.log_dir.is_empty() {
        None
    } else {
        let appender = tracing_appender::rolling::daily(&cfg.log_dir, "sliceforge.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);
        Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(cfg.file_level.parse::<LevelFilter>()?),
        )
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!(log_dir = %cfg.log_dir, "Logging initialized");
    Ok(file_guard)
}

#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env()
            .add_directive("slice_forge=debug".parse().expect("static directive"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
