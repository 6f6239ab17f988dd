//! Process-wide `tracing` setup driven by the `logging` config section.
//!
//! Events go to a daily-rolled `<app>.log.<YYYY-MM-DD>` file through a
//! non-blocking writer and, when `emit_stderr` is set, to stderr as well.
//! Both sinks share one encoding. `RUST_LOG` overrides `logging.filter`.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};
use veritas_config::{LogEncoding, LoggingConfig};

const LOG_DIR_ENV: &str = "VERITAS_LOG_DIR";

static SINK: OnceLock<(PathBuf, WorkerGuard)> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber and return today's log file.
///
/// Only the first call installs anything; later calls return the path chosen
/// by the first.
pub fn init_logging(app_name: &str, logging: &LoggingConfig) -> anyhow::Result<PathBuf> {
    if let Some((path, _)) = SINK.get() {
        return Ok(path.clone());
    }

    let dir = log_dir(app_name, logging.dir.as_deref());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let file_name = format!("{app_name}.log");
    let path = dir.join(format!("{file_name}.{}", Local::now().format("%Y-%m-%d")));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, &file_name));

    let mut sinks = vec![file_layer(logging.format, writer)];
    if logging.emit_stderr {
        sinks.push(stderr_layer(logging.format));
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    tracing_subscriber::registry()
        .with(sinks)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = SINK.set((path.clone(), guard));
    Ok(path)
}

fn file_layer(encoding: LogEncoding, writer: NonBlocking) -> BoxedLayer {
    match encoding {
        LogEncoding::Text => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
        LogEncoding::Json => fmt::layer().json().with_writer(writer).boxed(),
    }
}

fn stderr_layer(encoding: LogEncoding) -> BoxedLayer {
    match encoding {
        LogEncoding::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogEncoding::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    }
}

/// `logging.dir`, then `VERITAS_LOG_DIR`, then `~/.local/share/<app>`.
fn log_dir(app_name: &str, configured: Option<&str>) -> PathBuf {
    let chosen = configured
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_DIR_ENV).ok().filter(|d| !d.trim().is_empty()));
    let home = std::env::var_os("HOME").map(PathBuf::from);

    match (chosen, home) {
        (Some(dir), Some(home)) if dir.starts_with("~/") => home.join(&dir[2..]),
        (Some(dir), _) => PathBuf::from(dir),
        (None, Some(home)) => home.join(".local").join("share").join(app_name),
        (None, None) => Path::new(".").join(app_name),
    }
}
