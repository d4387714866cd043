//! # DOOM Host
//!
//! Loads a WebAssembly build of the DOOM engine and drives it through a small typed
//! surface. The engine itself (rendering, simulation, WAD parsing) lives entirely inside
//! the compiled module; this crate only:
//!
//! - instantiates `doom.wasm` with output sinks, startup arguments and an asset
//!   directory every engine file request resolves under
//! - builds the engine's command line (re-exported from [`doom_api`])
//! - forwards status queries and commands to the engine's exports, returning `0`
//!   or doing nothing when a build doesn't export one
//!
//! ## Usage
//!
//! ```rust,ignore
//! use doom_host::{facade, load, build_args, LaunchConfig, DoomKey};
//!
//! let rt = tokio::runtime::Runtime::new()?;
//! let mut doom = rt.block_on(load(
//!     LaunchConfig::new()
//!         .assets_path("/opt/doom")
//!         .arguments(build_args(Some(1), Some(3), None)),
//! ))?;
//!
//! doom.call_main()?;
//! facade::init_graphics(&mut doom)?;
//! loop {
//!     facade::queue_key(&mut doom, DoomKey::UpArrow)?;
//!     facade::draw_frame(&mut doom)?;
//!     println!("health: {}", facade::get_player_health(&mut doom)?);
//! }
//! ```
//!
//! Facade calls are synchronous and block the caller while the engine runs. They are safe
//! to make from async code: the call steps out of the runtime before entering the engine.
//!
//! Engine output is logged through `tracing` by default; install a subscriber with
//! [`logging::init`] or pass explicit sinks to see it.

pub mod config;
pub mod entry;
pub mod error;
pub mod facade;
mod handle;
pub mod instance;
mod loader;
pub mod logging;
pub mod output;

pub use config::{LaunchConfig, ENGINE_ARTIFACT};
pub use entry::EntryPoint;
pub use error::{ConfigError, EngineError, LoadError};
pub use handle::DoomHandle;
pub use instance::EngineInstance;
pub use loader::load;
pub use output::OutputSink;

pub use doom_api::{
    build_args, weapon_name, AmmoType, DoomKey, GameConfig, GameState, KeyCard, PlayerStats,
    PlayerStatus, WeaponType, DEFAULT_SCALING, PROGRAM_NAME, WEAPON_NAMES,
};

pub use wasmtime::Val;
