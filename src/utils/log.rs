use std::fs::{self, File};
use std::io::stderr;
use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};

use chrono::Local;
use miette::{Context, IntoDiagnostic, miette};
use tracing::level_filters::LevelFilter;
use tracing::{Level, info, warn};
use tracing_appender::non_blocking;
use tracing_subscriber::reload;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, reload::Handle, util::SubscriberInitExt,
};

pub trait LogHandle: Send + Sync {
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()>;
}

impl<S> LogHandle for Handle<EnvFilter, S>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()> {
        self.modify(|current| *current = new_filter)
            .into_diagnostic()
    }
}

pub struct LogHandles {
    console_handle: Mutex<Box<dyn LogHandle>>,
    file_handle: Mutex<Box<dyn LogHandle>>,
    log_file: Option<PathBuf>,
    /// False when another subscriber won the race; the reload handles are dead then.
    installed: bool,
}

fn log_dir() -> PathBuf {
    std::env::temp_dir().join("perftgen_logs")
}

fn open_log_file() -> miette::Result<(File, PathBuf)> {
    let dir = log_dir();
    fs::create_dir_all(&dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Creating log directory {}", dir.display()))?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = dir.join(format!("perftgen_{timestamp}.log"));
    let file = File::create(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Creating log file {}", path.display()))?;
    Ok((file, path))
}

static LOG_HANDLES: LazyLock<LogHandles> = LazyLock::new(|| {
    #[cfg(feature = "dev-tools")]
    color_backtrace::install();

    // Console layer with its own reloadable filter
    let console_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let (console_filter, console_handle) = reload::Layer::new(console_filter);
    let console_layer = fmt::layer()
        .without_time()
        .with_writer(stderr)
        .with_filter(console_filter);

    // File layer, off until toggled on
    let file_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();
    let (file_filter, file_handle) = reload::Layer::new(file_filter);

    let (file_layer, log_file, file_error) = match open_log_file() {
        Ok((file, path)) => {
            let (writer, guard) = non_blocking(file);
            // The guard flushes on drop; the subscriber lives for the whole process.
            std::mem::forget(guard);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(file_filter);
            (Some(layer), Some(path), None)
        }
        Err(err) => (None, None, Some(err)),
    };

    let installed = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if let Err(err) = &installed {
        eprintln!("perftgen: a global tracing subscriber is already set: {err}");
    }
    if let Some(err) = file_error {
        warn!("File logging unavailable: {err:?}");
    }

    LogHandles {
        console_handle: Mutex::new(Box::new(console_handle)),
        file_handle: Mutex::new(Box::new(file_handle)),
        log_file,
        installed: installed.is_ok(),
    }
});

fn with_handle(
    handle: &Mutex<Box<dyn LogHandle>>,
    new_filter: EnvFilter,
) -> miette::Result<()> {
    miette::ensure!(
        LOG_HANDLES.installed,
        "perftgen's subscriber is not the global one"
    );
    handle
        .lock()
        .map_err(|_| miette!("Log handle mutex poisoned"))?
        .set_filter(new_filter)
}

pub fn set_log_level(level: Level) -> miette::Result<()> {
    with_handle(
        &LOG_HANDLES.console_handle,
        EnvFilter::new(level.to_string()),
    )
    .with_context(|| format!("Failed to modify log filter to level: {level}"))
}

pub fn toggle_file_logging(enable: bool) -> miette::Result<()> {
    miette::ensure!(
        !enable || LOG_HANDLES.log_file.is_some(),
        "File logging is unavailable in this process"
    );
    let new_filter = if enable {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("off")
    };

    with_handle(&LOG_HANDLES.file_handle, new_filter).context("Failed to modify log filter")
}

/// Path of this process' log file, if one could be created.
pub fn log_file() -> Option<&'static PathBuf> {
    LOG_HANDLES.log_file.as_ref()
}

/// Whether [`init`] installed the global subscriber, so the level and file
/// toggles can take effect.
pub fn is_installed() -> bool {
    LOG_HANDLES.installed
}

/// Initialize tracing and backtrace
pub fn init() {
    let handles = LazyLock::force(&LOG_HANDLES);
    match &handles.log_file {
        Some(path) => info!("File log available at {}", path.display()),
        None => info!("Logging to console only"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_toggles() {
        init();

        if !is_installed() {
            // Another test installed its subscriber first.
            assert!(set_log_level(Level::DEBUG).is_err());
            assert!(toggle_file_logging(false).is_err());
            return;
        }

        set_log_level(Level::DEBUG).unwrap();
        set_log_level(Level::INFO).unwrap();
        toggle_file_logging(false).unwrap();

        match log_file() {
            Some(path) => {
                assert!(path.starts_with(log_dir()));
                toggle_file_logging(true).unwrap();
                info!("file logging on");
                toggle_file_logging(false).unwrap();
            }
            None => assert!(toggle_file_logging(true).is_err()),
        }
    }
}
