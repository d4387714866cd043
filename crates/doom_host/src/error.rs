use std::path::PathBuf;

use thiserror::Error;

use crate::entry::EntryPoint;

/// Errors that can occur while loading the engine module.
///
/// Any of these is fatal to [`crate::load`]; no partial handle is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Engine artifact not found: {path:?}")]
    ArtifactMissing { path: PathBuf },

    #[error("Failed to read engine artifact {path:?}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to expose asset directory {path:?} to the engine")]
    AssetsPath {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to compile engine module")]
    Compile(#[source] anyhow::Error),

    #[error("Failed to link host imports")]
    Link(#[source] anyhow::Error),

    #[error("Failed to instantiate engine module")]
    Instantiate(#[source] anyhow::Error),

    #[error("Engine entry point failed during initial run")]
    InitialRun(#[source] EngineError),

    #[error("Loader task did not complete")]
    Runtime(#[from] tokio::task::JoinError),

    #[error("Invalid launch configuration")]
    Config(#[from] ConfigError),
}

/// Errors reading a launch configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse launch config")]
    Parse(#[from] toml::de::Error),
}

/// A fault raised by the engine while one of its entry points was running.
///
/// Missing entry points are never reported this way; those fall back to defaults.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine trapped in {entry}")]
    Trap {
        entry: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Engine exited with code {code} in {entry}")]
    Exited { entry: String, code: i32 },

    #[error("{entry} takes {expected} argument(s), got {got}")]
    Arity {
        entry: String,
        expected: usize,
        got: usize,
    },

    #[error("Export not found: {0}")]
    MissingExport(String),

    #[error("Engine exports no linear memory")]
    NoMemory,

    #[error("Pointer {ptr:#x} is outside engine memory")]
    BadPointer { ptr: u32 },
}

impl EngineError {
    /// Classify a wasmtime call failure, separating `proc_exit` from real traps.
    pub(crate) fn from_call(entry: impl Into<String>, err: anyhow::Error) -> Self {
        let entry = entry.into();
        match err.downcast_ref::<wasmtime_wasi::I32Exit>() {
            Some(exit) => EngineError::Exited { entry, code: exit.0 },
            None => EngineError::Trap { entry, source: err },
        }
    }

    pub(crate) fn for_entry(entry: EntryPoint, err: anyhow::Error) -> Self {
        Self::from_call(entry.export_name(), err)
    }
}
