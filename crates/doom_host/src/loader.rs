//! # Module Loader
//!
//! Turns a [`LaunchConfig`] into a running [`DoomHandle`]:
//!
//! 1. Resolve the asset directory and locate `doom.wasm` inside it
//! 2. Compile the module
//! 3. Link WASI preview 1, with the asset directory preopened as `/` so every data file
//!    the engine opens resolves under it, and stdout/stderr routed to the sinks
//! 4. Instantiate, run `_initialize` if the build is a reactor
//! 5. Optionally run the entry point (off by default)
//!
//! One attempt only. Any failure is returned and no handle is produced.

use std::path::{Path, PathBuf};

use wasmtime::{Config, Engine, Linker, Module, Store};
use wasmtime_wasi::preview1::{self, WasiP1Ctx};
use wasmtime_wasi::{DirPerms, FilePerms, WasiCtxBuilder};

use crate::config::{LaunchConfig, ENGINE_ARTIFACT};
use crate::error::{EngineError, LoadError};
use crate::handle::{DoomHandle, ExportTable, HostState};
use crate::output::SinkStream;

/// Load and instantiate the engine.
///
/// Compilation and instantiation run on tokio's blocking pool, so this can be awaited
/// from any runtime without stalling it. No timeout is applied; drop the future or wrap
/// it in `tokio::time::timeout` to give up early.
///
/// Engine output goes to `tracing` unless the config supplies sinks, so install a
/// subscriber first (see [`crate::logging::init`]) or nothing will be shown.
pub async fn load(config: LaunchConfig) -> Result<DoomHandle, LoadError> {
    let assets_path = config.resolved_assets_path();
    let artifact = config.locate_file(ENGINE_ARTIFACT);

    tracing::info!("[Loader] Loading engine from {:?}", artifact);

    let exists = tokio::fs::try_exists(&artifact)
        .await
        .map_err(|source| LoadError::ArtifactRead {
            path: artifact.clone(),
            source,
        })?;
    if !exists {
        return Err(LoadError::ArtifactMissing { path: artifact });
    }

    let wasm_bytes = tokio::fs::read(&artifact)
        .await
        .map_err(|source| LoadError::ArtifactRead {
            path: artifact.clone(),
            source,
        })?;

    tracing::debug!("[Loader] Read {} bytes", wasm_bytes.len());

    let handle = tokio::task::spawn_blocking(move || instantiate(&wasm_bytes, &config, assets_path))
        .await??;

    tracing::info!("[Loader] Engine ready");
    Ok(handle)
}

fn instantiate(
    wasm_bytes: &[u8],
    config: &LaunchConfig,
    assets_path: PathBuf,
) -> Result<DoomHandle, LoadError> {
    let engine = Engine::new(&Config::new()).map_err(LoadError::Compile)?;
    let module = Module::new(&engine, wasm_bytes).map_err(LoadError::Compile)?;

    let arguments = config.resolved_arguments();
    let wasi = build_wasi(config, &assets_path, &arguments)?;

    let mut linker: Linker<HostState> = Linker::new(&engine);
    preview1::add_to_linker_sync(&mut linker, |state: &mut HostState| &mut state.wasi)
        .map_err(LoadError::Link)?;
    // Builds may import JS-side helpers we don't provide; they trap only if called.
    linker.define_unknown_imports_as_traps(&module).map_err(LoadError::Link)?;

    let mut store = Store::new(&engine, HostState { wasi });
    let instance = linker.instantiate(&mut store, &module).map_err(LoadError::Instantiate)?;

    if let Some(init) = instance.get_func(&mut store, "_initialize") {
        tracing::debug!("[Loader] Running reactor initializer");
        init.call(&mut store, &[], &mut [])
            .map_err(|err| LoadError::Instantiate(err.context("_initialize failed")))?;
    }

    let exports = ExportTable::resolve(&instance, &mut store);
    let mut handle = DoomHandle::new(store, instance, exports, assets_path, arguments);

    if config.suppresses_initial_run() {
        tracing::debug!("[Loader] Initial run suppressed");
    } else {
        match handle.call_main() {
            Ok(0) => {}
            Ok(code) => {
                return Err(LoadError::InitialRun(EngineError::Exited {
                    entry: "main".to_string(),
                    code,
                }))
            }
            Err(err) => return Err(LoadError::InitialRun(err)),
        }
    }

    Ok(handle)
}

fn build_wasi(
    config: &LaunchConfig,
    assets_path: &Path,
    arguments: &[String],
) -> Result<WasiP1Ctx, LoadError> {
    let mut builder = WasiCtxBuilder::new();
    builder
        .args(arguments)
        .stdout(SinkStream::new(config.resolved_print()))
        .stderr(SinkStream::new(config.resolved_print_err()));

    builder
        .preopened_dir(assets_path, "/", DirPerms::all(), FilePerms::all())
        .map_err(|source| LoadError::AssetsPath {
            path: assets_path.to_path_buf(),
            source,
        })?;

    Ok(builder.build_p1())
}
