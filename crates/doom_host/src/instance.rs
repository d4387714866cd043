use crate::entry::EntryPoint;
use crate::error::EngineError;

/// Anything that can stand in for a running engine.
///
/// Every entry point is optional. [`DoomHandle`](crate::DoomHandle) implements this over a
/// wasmtime instance; tests implement it with in-memory doubles.
pub trait EngineInstance {
    fn has_entry_point(&self, entry: EntryPoint) -> bool;

    /// Call `entry` with `args` if the engine exports it.
    ///
    /// Returns `Ok(None)` when the export is absent and `Ok(Some(value))` otherwise,
    /// with `0` standing in for commands that return nothing.
    fn invoke(&mut self, entry: EntryPoint, args: &[i32]) -> Result<Option<i32>, EngineError>;
}

impl<T: EngineInstance + ?Sized> EngineInstance for &mut T {
    fn has_entry_point(&self, entry: EntryPoint) -> bool {
        (**self).has_entry_point(entry)
    }

    fn invoke(&mut self, entry: EntryPoint, args: &[i32]) -> Result<Option<i32>, EngineError> {
        (**self).invoke(entry, args)
    }
}

impl<T: EngineInstance + ?Sized> EngineInstance for Box<T> {
    fn has_entry_point(&self, entry: EntryPoint) -> bool {
        (**self).has_entry_point(entry)
    }

    fn invoke(&mut self, entry: EntryPoint, args: &[i32]) -> Result<Option<i32>, EngineError> {
        (**self).invoke(entry, args)
    }
}
