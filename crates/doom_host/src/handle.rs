//! A live engine instance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::runtime::RuntimeFlavor;
use wasmtime::{Func, FuncType, Instance, Memory, Store, Val, ValType};
use wasmtime_wasi::preview1::WasiP1Ctx;

use crate::entry::EntryPoint;
use crate::error::EngineError;
use crate::instance::EngineInstance;

/// Per-store host state.
pub(crate) struct HostState {
    pub(crate) wasi: WasiP1Ctx,
}

/// Entry points the engine was found to export, resolved once at load.
#[derive(Default)]
pub(crate) struct ExportTable {
    entries: HashMap<EntryPoint, Func>,
    main: Option<(&'static str, Func)>,
    memory: Option<Memory>,
}

impl ExportTable {
    pub(crate) fn resolve(instance: &Instance, store: &mut Store<HostState>) -> Self {
        let mut table = ExportTable::default();

        for entry in EntryPoint::ALL {
            let Some(func) = instance.get_func(&mut *store, entry.export_name()) else {
                continue;
            };
            let ty = func.ty(&*store);
            if !signature_matches(entry, &ty) {
                tracing::warn!(
                    "[Loader] Ignoring export {} with signature {:?}, expected {} i32 param(s)",
                    entry,
                    ty,
                    entry.arity()
                );
                continue;
            }
            tracing::debug!("[Loader] Resolved export {}", entry);
            table.entries.insert(entry, func);
        }

        // WASI commands export `_start`; bare Emscripten builds export `main`.
        for name in ["_start", "main"] {
            if let Some(func) = instance.get_func(&mut *store, name) {
                table.main = Some((name, func));
                break;
            }
        }

        table.memory = instance.get_memory(&mut *store, "memory");

        let missing: Vec<&str> = EntryPoint::ALL
            .iter()
            .filter(|entry| !table.entries.contains_key(entry))
            .map(|entry| entry.export_name())
            .collect();
        if !missing.is_empty() {
            tracing::debug!("[Loader] Engine build lacks exports: {:?}", missing);
        }

        table
    }
}

/// Handle to one instantiated engine.
///
/// Owns the wasmtime store, so every call needs `&mut self`; the engine is never entered
/// from two places at once. Dropping the handle tears the instance down and flushes any
/// buffered output.
pub struct DoomHandle {
    store: Store<HostState>,
    instance: Instance,
    exports: ExportTable,
    assets_path: PathBuf,
    arguments: Vec<String>,
}

impl DoomHandle {
    pub(crate) fn new(
        store: Store<HostState>,
        instance: Instance,
        exports: ExportTable,
        assets_path: PathBuf,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            store,
            instance,
            exports,
            assets_path,
            arguments,
        }
    }

    pub fn assets_path(&self) -> &Path {
        &self.assets_path
    }

    /// The `argv` the engine was started with.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn locate_file(&self, filename: &str) -> PathBuf {
        self.assets_path.join(filename)
    }

    /// Run the engine's entry point (`_start`, or `main`) and return its exit code.
    ///
    /// Arguments are the ones fixed at load time. A module without an entry point
    /// returns `0`.
    pub fn call_main(&mut self) -> Result<i32, EngineError> {
        let Some((name, func)) = self.exports.main else {
            tracing::warn!("[DOOM] Engine exports no entry point, nothing to run");
            return Ok(0);
        };

        tracing::info!("[DOOM] Running {} with {:?}", name, self.arguments);

        let ty = func.ty(&self.store);
        let params: Vec<Val> = ty.params().map(|p| zero_value(&p)).collect();
        let mut results: Vec<Val> = ty.results().map(|r| zero_value(&r)).collect();

        match guest_call(&mut self.store, |store| func.call(store, &params, &mut results)) {
            Ok(()) => Ok(results.first().and_then(Val::i32).unwrap_or(0)),
            Err(err) => match EngineError::from_call(name, err) {
                EngineError::Exited { code, .. } => Ok(code),
                other => Err(other),
            },
        }
    }

    /// Call any export by name with raw wasm values.
    pub fn call_export(&mut self, name: &str, params: &[Val]) -> Result<Vec<Val>, EngineError> {
        let func = self
            .instance
            .get_func(&mut self.store, name)
            .ok_or_else(|| EngineError::MissingExport(name.to_string()))?;

        let mut results: Vec<Val> = func
            .ty(&self.store)
            .results()
            .map(|r| zero_value(&r))
            .collect();
        guest_call(&mut self.store, |store| func.call(store, params, &mut results))
            .map_err(|err| EngineError::from_call(name, err))?;
        Ok(results)
    }

    /// Decode a NUL-terminated UTF-8 string from engine memory.
    pub fn read_c_string(&self, ptr: u32) -> Result<String, EngineError> {
        let memory = self.exports.memory.ok_or(EngineError::NoMemory)?;
        let data = memory.data(&self.store);
        let tail = data.get(ptr as usize..).ok_or(EngineError::BadPointer { ptr })?;
        let len = tail.iter().position(|b| *b == 0).unwrap_or(tail.len());
        Ok(String::from_utf8_lossy(&tail[..len]).into_owned())
    }

    /// Size of the engine's linear memory in bytes, if it exports one.
    pub fn memory_size(&self) -> Option<usize> {
        self.exports.memory.map(|memory| memory.data_size(&self.store))
    }
}

impl EngineInstance for DoomHandle {
    fn has_entry_point(&self, entry: EntryPoint) -> bool {
        self.exports.entries.contains_key(&entry)
    }

    fn invoke(&mut self, entry: EntryPoint, args: &[i32]) -> Result<Option<i32>, EngineError> {
        let Some(func) = self.exports.entries.get(&entry).copied() else {
            return Ok(None);
        };

        if args.len() != entry.arity() {
            return Err(EngineError::Arity {
                entry: entry.export_name().to_string(),
                expected: entry.arity(),
                got: args.len(),
            });
        }

        let ty = func.ty(&self.store);
        let params: Vec<Val> = ty.params().zip(args).map(|(p, v)| coerce(*v, &p)).collect();
        let mut results: Vec<Val> = ty.results().map(|r| zero_value(&r)).collect();

        guest_call(&mut self.store, |store| func.call(store, &params, &mut results))
            .map_err(|err| EngineError::for_entry(entry, err))?;

        Ok(Some(results.first().map(val_to_i32).unwrap_or(0)))
    }
}

impl std::fmt::Debug for DoomHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoomHandle")
            .field("assets_path", &self.assets_path)
            .field("arguments", &self.arguments)
            .field("exports", &self.exports.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for DoomHandle {
    fn drop(&mut self) {
        tracing::debug!("[DOOM] Dropping engine instance from {:?}", self.assets_path);
    }
}

/// Run a call into the guest where the sync WASI bindings are allowed to block.
///
/// Those bindings drive their I/O futures with `block_on`, which panics on a thread that
/// is already polling async tasks. Multi-thread workers step out with `block_in_place`;
/// a current-thread runtime can't, so the call moves to a scoped thread instead.
fn guest_call<R: Send>(
    store: &mut Store<HostState>,
    call: impl FnOnce(&mut Store<HostState>) -> R + Send,
) -> R {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        return call(store);
    };

    match runtime.runtime_flavor() {
        RuntimeFlavor::CurrentThread => std::thread::scope(|scope| {
            match scope.spawn(move || call(store)).join() {
                Ok(out) => out,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }),
        _ => tokio::task::block_in_place(move || call(store)),
    }
}

/// Parameter count must match exactly; queries must produce a value.
fn signature_matches(entry: EntryPoint, ty: &FuncType) -> bool {
    ty.params().len() == entry.arity() && (entry.is_command() || ty.results().next().is_some())
}

fn zero_value(ty: &ValType) -> Val {
    match ty {
        ValType::I64 => Val::I64(0),
        ValType::F32 => Val::F32(0),
        ValType::F64 => Val::F64(0),
        _ => Val::I32(0),
    }
}

fn coerce(value: i32, ty: &ValType) -> Val {
    match ty {
        ValType::I64 => Val::I64(value as i64),
        ValType::F32 => Val::F32((value as f32).to_bits()),
        ValType::F64 => Val::F64((value as f64).to_bits()),
        _ => Val::I32(value),
    }
}

fn val_to_i32(val: &Val) -> i32 {
    match val {
        Val::I32(v) => *v,
        Val::I64(v) => *v as i32,
        Val::F32(bits) => f32::from_bits(*bits) as i32,
        Val::F64(bits) => f64::from_bits(*bits) as i32,
        _ => 0,
    }
}
