//! Logging setup for hosts embedding the engine
//
// Installs a tracing subscriber with an env filter, console output and an optional
// non-blocking log file. The default output sinks log through `tracing`, so engine
// output lands here as well.
//
// Usage:
//   let _guard = doom_host::logging::init(LogOptions::default());
//   Keep the returned guard alive for the program's duration.

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use directories::ProjectDirs;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,cranelift_codegen=warn,wasmtime=warn";

/// Where and how loudly to log.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Console output with targets and thread ids.
    pub verbose: bool,
    /// Write `doom.log` under a timestamped folder here. `None` uses the platform data
    /// directory; see [`LogOptions::console_only`] to skip the file entirely.
    pub log_dir: Option<PathBuf>,
    pub file: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            log_dir: None,
            file: true,
        }
    }
}

impl LogOptions {
    pub fn console_only() -> Self {
        Self {
            file: false,
            ..Self::default()
        }
    }
}

/// Keeps the file writer flushing. Drop it last.
pub struct LogGuard {
    _file: Option<tracing_appender::non_blocking::WorkerGuard>,
    pub log_file: Option<PathBuf>,
}

/// Initializes logging.
///
/// The filter comes from `RUST_LOG`, falling back to `info` with wasmtime's compiler noise
/// turned down. Calling this when a subscriber is already installed is harmless: the
/// existing one stays and the returned guard holds nothing.
pub fn init(options: LogOptions) -> LogGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let log_target = options
        .file
        .then(|| open_log_file(options.log_dir.clone()))
        .flatten();

    let (file_layer, file_guard, log_file) = match log_target {
        Some((path, file)) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            // File log: plain formatting, no ANSI/color codes
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true);
            (Some(layer), Some(guard), Some(path))
        }
        None => (None, None, None),
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(options.verbose)
        .with_thread_ids(options.verbose);

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .is_ok();

    if !installed {
        tracing::debug!("[Logging] Subscriber already installed, keeping it");
        return LogGuard { _file: None, log_file: None };
    }

    if let Some(path) = &log_file {
        tracing::info!("[Logging] Writing log to {:?}", path);
    }

    LogGuard { _file: file_guard, log_file }
}

fn open_log_file(log_dir: Option<PathBuf>) -> Option<(PathBuf, fs::File)> {
    let base = match log_dir {
        Some(dir) => dir,
        None => ProjectDirs::from("com", "DoomHost", "doom_host")?.data_dir().join("logs"),
    };

    let folder = base.join(format!("{}", Local::now().format("%Y-%m-%d_%H-%M-%S")));
    if let Err(e) = fs::create_dir_all(&folder) {
        eprintln!("[Logging] Failed to create log folder {:?}: {e}", folder);
        return None;
    }

    let path = folder.join("doom.log");
    match fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Some((path, file)),
        Err(e) => {
            eprintln!("[Logging] Failed to open {:?}: {e}", path);
            None
        }
    }
}
