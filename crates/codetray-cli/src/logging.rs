//! File logging for the sidebar. The terminal belongs to the UI, so log
//! lines go to `~/.codetray/codetray.log`.

use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_DIRECTIVE: &str = "codetray=info";

/// Install the global subscriber writing to `file_name` inside `dir`.
///
/// `RUST_LOG` overrides the default filter. Returns `None` when the log
/// directory cannot be created; the sidebar then runs without logs. Keep the
/// guard alive for the life of the process so buffered lines are flushed.
pub fn init_logging(dir: &Path, file_name: &str) -> Option<WorkerGuard> {
    fs::create_dir_all(dir).ok()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok()?;

    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_parses() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVE).is_ok());
        assert!(EnvFilter::try_new("codetray_core=debug,codetray_ui=trace").is_ok());
    }
}
