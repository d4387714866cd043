//! # Status/Control Facade
//!
//! Typed forwarding calls onto the engine's exports. Every function checks whether the
//! export exists; when it doesn't, queries return `0` and commands do nothing. Numeric
//! arguments (ammo type, key id, key code) are forwarded untouched.
//!
//! Queries re-read live engine state on every call. Nothing is cached here.
//!
//! A fault inside the engine (a trap or `exit()`) is passed back as [`EngineError`]
//! without interpretation.

use doom_api::{AmmoType, KeyCard, PlayerStats, PlayerStatus, WeaponType};

use crate::entry::EntryPoint;
use crate::error::EngineError;
use crate::instance::EngineInstance;

fn query<E>(engine: &mut E, entry: EntryPoint, args: &[i32]) -> Result<i32, EngineError>
where
    E: EngineInstance + ?Sized,
{
    Ok(engine.invoke(entry, args)?.unwrap_or(0))
}

fn command<E>(engine: &mut E, entry: EntryPoint, args: &[i32]) -> Result<(), EngineError>
where
    E: EngineInstance + ?Sized,
{
    if engine.invoke(entry, args)?.is_none() {
        tracing::trace!("[DOOM] {} not exported, skipping", entry);
    }
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

/// `DG_Init`
pub fn init_graphics<E: EngineInstance + ?Sized>(engine: &mut E) -> Result<(), EngineError> {
    command(engine, EntryPoint::InitGraphics, &[])
}

/// Advance and render one frame (`DG_DrawFrame`).
pub fn draw_frame<E: EngineInstance + ?Sized>(engine: &mut E) -> Result<(), EngineError> {
    command(engine, EntryPoint::DrawFrame, &[])
}

/// Push one key event into the engine's input queue (`WASM_QueueKey`).
pub fn queue_key<E: EngineInstance + ?Sized>(
    engine: &mut E,
    keycode: impl Into<i32>,
) -> Result<(), EngineError> {
    command(engine, EntryPoint::QueueKey, &[keycode.into()])
}

/// `WASM_StopGameLoop`. Only some engine builds export it.
pub fn stop_game_loop<E: EngineInstance + ?Sized>(engine: &mut E) -> Result<(), EngineError> {
    command(engine, EntryPoint::StopGameLoop, &[])
}

// ============================================================================
// Queries
// ============================================================================

/// 0-100
pub fn get_player_health<E: EngineInstance + ?Sized>(engine: &mut E) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetPlayerHealth, &[])
}

/// 0-200
pub fn get_player_armor<E: EngineInstance + ?Sized>(engine: &mut E) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetPlayerArmor, &[])
}

/// Weapon id, 0-8. See [`doom_api::WEAPON_NAMES`].
pub fn get_player_weapon<E: EngineInstance + ?Sized>(engine: &mut E) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetPlayerWeapon, &[])
}

pub fn get_player_ammo<E: EngineInstance + ?Sized>(
    engine: &mut E,
    ammo_type: impl Into<i32>,
) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetPlayerAmmo, &[ammo_type.into()])
}

pub fn get_player_max_ammo<E: EngineInstance + ?Sized>(
    engine: &mut E,
    ammo_type: impl Into<i32>,
) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetPlayerMaxAmmo, &[ammo_type.into()])
}

pub fn get_current_weapon_ammo<E: EngineInstance + ?Sized>(
    engine: &mut E,
) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetCurrentWeaponAmmo, &[])
}

/// Non-zero when the player holds key `key_id` (0-5, see [`KeyCard`]).
pub fn get_player_has_key<E: EngineInstance + ?Sized>(
    engine: &mut E,
    key_id: impl Into<i32>,
) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetPlayerHasKey, &[key_id.into()])
}

pub fn get_player_kills<E: EngineInstance + ?Sized>(engine: &mut E) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetPlayerKills, &[])
}

pub fn get_player_items<E: EngineInstance + ?Sized>(engine: &mut E) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetPlayerItems, &[])
}

pub fn get_player_secrets<E: EngineInstance + ?Sized>(engine: &mut E) -> Result<i32, EngineError> {
    query(engine, EntryPoint::GetPlayerSecrets, &[])
}

// ============================================================================
// Snapshots
// ============================================================================

/// Query every status export once and collect the results.
pub fn player_status<E: EngineInstance + ?Sized>(
    engine: &mut E,
) -> Result<PlayerStatus, EngineError> {
    let mut status = PlayerStatus {
        health: get_player_health(engine)?,
        armor: get_player_armor(engine)?,
        weapon: get_player_weapon(engine)?,
        weapon_ammo: get_current_weapon_ammo(engine)?,
        ..Default::default()
    };

    for ammo in AmmoType::ALL {
        status.ammo.set(ammo, get_player_ammo(engine, ammo)?);
        status.max_ammo.set(ammo, get_player_max_ammo(engine, ammo)?);
    }

    for card in KeyCard::ALL {
        status.keys.set(card, get_player_has_key(engine, card)? != 0);
    }

    status.stats.kills = get_player_kills(engine)?;
    status.stats.items = get_player_items(engine)?;
    status.stats.secrets = get_player_secrets(engine)?;

    Ok(status)
}

/// HUD summary: the current weapon, its ammo and pool capacity, keys and tally.
pub fn player_stats<E: EngineInstance + ?Sized>(
    engine: &mut E,
) -> Result<PlayerStats, EngineError> {
    let weapon = get_player_weapon(engine)?;
    let max_ammo = match WeaponType::try_from(weapon).ok().and_then(WeaponType::ammo_type) {
        Some(ammo) => get_player_max_ammo(engine, ammo)?,
        None => 0,
    };

    let mut stats = PlayerStats {
        health: get_player_health(engine)?,
        armor: get_player_armor(engine)?,
        weapon,
        weapon_name: PlayerStats::display_name(weapon),
        current_ammo: get_current_weapon_ammo(engine)?,
        max_ammo,
        kills: get_player_kills(engine)?,
        items: get_player_items(engine)?,
        secrets: get_player_secrets(engine)?,
        ..Default::default()
    };

    for card in KeyCard::ALL {
        stats.keys.set(card, get_player_has_key(engine, card)? != 0);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doom_api::DoomKey;
    use std::collections::HashMap;

    type Handler = Box<dyn FnMut(&[i32]) -> i32>;

    /// In-memory engine: exports are whatever handlers were registered.
    #[derive(Default)]
    struct FakeEngine {
        exports: HashMap<EntryPoint, Handler>,
        calls: Vec<(EntryPoint, Vec<i32>)>,
    }

    impl FakeEngine {
        fn with(mut self, entry: EntryPoint, handler: impl FnMut(&[i32]) -> i32 + 'static) -> Self {
            self.exports.insert(entry, Box::new(handler));
            self
        }

        fn returning(self, entry: EntryPoint, value: i32) -> Self {
            self.with(entry, move |_| value)
        }
    }

    impl EngineInstance for FakeEngine {
        fn has_entry_point(&self, entry: EntryPoint) -> bool {
            self.exports.contains_key(&entry)
        }

        fn invoke(&mut self, entry: EntryPoint, args: &[i32]) -> Result<Option<i32>, EngineError> {
            match self.exports.get_mut(&entry) {
                Some(handler) => {
                    self.calls.push((entry, args.to_vec()));
                    Ok(Some(handler(args)))
                }
                None => Ok(None),
            }
        }
    }

    struct TrappingEngine;

    impl EngineInstance for TrappingEngine {
        fn has_entry_point(&self, _entry: EntryPoint) -> bool {
            true
        }

        fn invoke(&mut self, entry: EntryPoint, _args: &[i32]) -> Result<Option<i32>, EngineError> {
            Err(EngineError::Trap {
                entry: entry.export_name().to_string(),
                source: anyhow::anyhow!("wasm trap: unreachable"),
            })
        }
    }

    #[test]
    fn test_queries_default_to_zero_when_missing() {
        let mut engine = FakeEngine::default();

        assert_eq!(get_player_health(&mut engine).unwrap(), 0);
        assert_eq!(get_player_armor(&mut engine).unwrap(), 0);
        assert_eq!(get_player_weapon(&mut engine).unwrap(), 0);
        assert_eq!(get_player_ammo(&mut engine, AmmoType::Shell).unwrap(), 0);
        assert_eq!(get_player_max_ammo(&mut engine, AmmoType::Cell).unwrap(), 0);
        assert_eq!(get_current_weapon_ammo(&mut engine).unwrap(), 0);
        assert_eq!(get_player_has_key(&mut engine, KeyCard::RedSkull).unwrap(), 0);
        assert_eq!(get_player_kills(&mut engine).unwrap(), 0);
        assert_eq!(get_player_items(&mut engine).unwrap(), 0);
        assert_eq!(get_player_secrets(&mut engine).unwrap(), 0);

        assert!(engine.calls.is_empty());
    }

    #[test]
    fn test_commands_are_noops_when_missing() {
        let mut engine = FakeEngine::default();

        init_graphics(&mut engine).unwrap();
        draw_frame(&mut engine).unwrap();
        queue_key(&mut engine, DoomKey::Enter).unwrap();
        stop_game_loop(&mut engine).unwrap();

        assert!(engine.calls.is_empty());
    }

    #[test]
    fn test_queries_return_reported_values() {
        for health in [0, 1, 100] {
            let mut engine = FakeEngine::default().returning(EntryPoint::GetPlayerHealth, health);
            assert_eq!(get_player_health(&mut engine).unwrap(), health);
        }

        let mut engine = FakeEngine::default()
            .returning(EntryPoint::GetPlayerArmor, 200)
            .returning(EntryPoint::GetPlayerWeapon, 8)
            .returning(EntryPoint::GetCurrentWeaponAmmo, 37)
            .returning(EntryPoint::GetPlayerKills, 12)
            .returning(EntryPoint::GetPlayerItems, 4)
            .returning(EntryPoint::GetPlayerSecrets, 1);

        assert_eq!(get_player_armor(&mut engine).unwrap(), 200);
        assert_eq!(get_player_weapon(&mut engine).unwrap(), 8);
        assert_eq!(get_current_weapon_ammo(&mut engine).unwrap(), 37);
        assert_eq!(get_player_kills(&mut engine).unwrap(), 12);
        assert_eq!(get_player_items(&mut engine).unwrap(), 4);
        assert_eq!(get_player_secrets(&mut engine).unwrap(), 1);
    }

    #[test]
    fn test_has_key_forwards_id_unchanged() {
        let mut engine =
            FakeEngine::default().with(EntryPoint::GetPlayerHasKey, |args| (args[0] == 4) as i32);

        assert_eq!(get_player_has_key(&mut engine, 4).unwrap(), 1);
        assert_eq!(get_player_has_key(&mut engine, KeyCard::BlueCard).unwrap(), 0);
        assert_eq!(get_player_has_key(&mut engine, 77).unwrap(), 0);

        let ids: Vec<i32> = engine.calls.iter().map(|(_, args)| args[0]).collect();
        assert_eq!(ids, vec![4, 0, 77]);
    }

    #[test]
    fn test_ammo_type_forwarded() {
        let mut engine = FakeEngine::default()
            .with(EntryPoint::GetPlayerAmmo, |args| args[0] * 10)
            .with(EntryPoint::GetPlayerMaxAmmo, |args| 200 + args[0]);

        assert_eq!(get_player_ammo(&mut engine, AmmoType::Rocket).unwrap(), 30);
        assert_eq!(get_player_ammo(&mut engine, -2).unwrap(), -20);
        assert_eq!(get_player_max_ammo(&mut engine, AmmoType::Shell).unwrap(), 201);
    }

    #[test]
    fn test_commands_forward_and_repeat() {
        let mut engine = FakeEngine::default()
            .returning(EntryPoint::DrawFrame, 0)
            .returning(EntryPoint::QueueKey, 0);

        for _ in 0..3 {
            draw_frame(&mut engine).unwrap();
        }
        queue_key(&mut engine, DoomKey::Fire).unwrap();
        queue_key(&mut engine, 0x1234).unwrap();

        assert_eq!(engine.calls.len(), 5);
        assert_eq!(engine.calls[3], (EntryPoint::QueueKey, vec![0xa3]));
        assert_eq!(engine.calls[4], (EntryPoint::QueueKey, vec![0x1234]));
    }

    #[test]
    fn test_engine_faults_propagate() {
        let mut engine = TrappingEngine;
        let err = get_player_health(&mut engine).unwrap_err();
        assert!(
            matches!(err, EngineError::Trap { ref entry, .. } if entry == "WASM_GetPlayerHealth")
        );
        assert!(draw_frame(&mut engine).is_err());
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut engine: Box<dyn EngineInstance> =
            Box::new(FakeEngine::default().returning(EntryPoint::GetPlayerHealth, 55));
        assert_eq!(get_player_health(&mut engine).unwrap(), 55);
        assert_eq!(get_player_armor(&mut *engine).unwrap(), 0);
    }

    #[test]
    fn test_player_status_snapshot() {
        let mut engine = FakeEngine::default()
            .returning(EntryPoint::GetPlayerHealth, 87)
            .returning(EntryPoint::GetPlayerArmor, 50)
            .returning(EntryPoint::GetPlayerWeapon, 2)
            .returning(EntryPoint::GetCurrentWeaponAmmo, 14)
            .with(EntryPoint::GetPlayerAmmo, |args| [50, 14, 0, 3][args[0] as usize])
            .with(EntryPoint::GetPlayerMaxAmmo, |args| [200, 50, 300, 50][args[0] as usize])
            .with(EntryPoint::GetPlayerHasKey, |args| matches!(args[0], 0 | 5) as i32)
            .returning(EntryPoint::GetPlayerKills, 9);

        let status = player_status(&mut engine).unwrap();

        assert_eq!(status.health, 87);
        assert_eq!(status.armor, 50);
        assert_eq!(status.weapon_type(), Some(WeaponType::Shotgun));
        assert_eq!(status.weapon_ammo, 14);
        assert_eq!(status.ammo.bullets, 50);
        assert_eq!(status.ammo.rockets, 3);
        assert_eq!(status.max_ammo.cells, 300);
        assert!(status.keys.blue_card);
        assert!(status.keys.red_skull);
        assert!(!status.keys.yellow_card);
        assert_eq!(status.stats.kills, 9);
        assert_eq!(status.stats.items, 0);
        assert_eq!(status.stats.secrets, 0);
    }

    #[test]
    fn test_player_stats_uses_current_weapon_pool() {
        let mut engine = FakeEngine::default()
            .returning(EntryPoint::GetPlayerWeapon, 4)
            .returning(EntryPoint::GetCurrentWeaponAmmo, 6)
            .with(EntryPoint::GetPlayerMaxAmmo, |args| [200, 50, 300, 50][args[0] as usize]);

        let stats = player_stats(&mut engine).unwrap();
        assert_eq!(stats.weapon_name, "Rocket Launcher");
        assert_eq!(stats.current_ammo, 6);
        assert_eq!(stats.max_ammo, 50);
    }

    #[test]
    fn test_player_stats_melee_has_no_pool() {
        let mut engine = FakeEngine::default()
            .returning(EntryPoint::GetPlayerWeapon, 7)
            .returning(EntryPoint::GetPlayerMaxAmmo, 999);

        let stats = player_stats(&mut engine).unwrap();
        assert_eq!(stats.weapon_name, "Chainsaw");
        assert_eq!(stats.max_ammo, 0);
        assert!(!engine.calls.iter().any(|(entry, _)| *entry == EntryPoint::GetPlayerMaxAmmo));
    }

    #[test]
    fn test_empty_engine_snapshot_is_default() {
        let mut engine = FakeEngine::default();
        assert_eq!(player_status(&mut engine).unwrap(), PlayerStatus::default());
        let stats = player_stats(&mut engine).unwrap();
        assert_eq!(stats.weapon_name, "Fist");
        assert_eq!(stats.health, 0);
    }
}
