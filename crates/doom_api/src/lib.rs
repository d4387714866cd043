//! # DOOM API
//!
//! Plain data types shared between the DOOM WASM host and whatever sits on top of it
//! (a HUD, a bot, a test harness). Nothing in here talks to the engine; the host crate
//! owns the calls, this crate owns the vocabulary.
//!
//! - [`DoomKey`]: the engine's native key codes, passed straight to `WASM_QueueKey`
//! - [`WeaponType`], [`AmmoType`], [`KeyCard`]: numeric ids used by the status exports
//! - [`WEAPON_NAMES`]: display names indexed by weapon id
//! - [`PlayerStatus`] / [`PlayerStats`]: snapshot records filled in by the host
//! - [`GameConfig`] / [`GameState`]: launch selection and consumer-side bookkeeping
//! - [`build_args`]: the engine's command line for a given episode, skill and scaling

pub mod args;
mod cards;
mod game;
mod keys;
mod status;
mod weapons;

pub use args::{build_args, DEFAULT_SCALING, PROGRAM_NAME};
pub use cards::KeyCard;
pub use game::{GameConfig, GameState};
pub use keys::DoomKey;
pub use status::{AmmoCounts, KeyRing, PlayerStats, PlayerStatus, Tally};
pub use weapons::{weapon_name, AmmoType, WeaponType, WEAPON_NAMES};

/// Returned when an engine-reported integer does not map onto one of the typed ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} id out of range: {value}")]
pub struct UnknownId {
    pub kind: &'static str,
    pub value: i32,
}
