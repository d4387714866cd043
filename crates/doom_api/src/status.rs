//! Player status records.
//!
//! These are plain values: the host fills them by querying the engine one field at a
//! time, and nothing here is kept in sync afterwards.

use serde::{Deserialize, Serialize};

use crate::{weapon_name, AmmoType, KeyCard, WeaponType};

/// One count per ammo pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoCounts {
    pub bullets: i32,
    pub shells: i32,
    pub cells: i32,
    pub rockets: i32,
}

impl AmmoCounts {
    pub fn get(&self, ammo: AmmoType) -> i32 {
        match ammo {
            AmmoType::Clip => self.bullets,
            AmmoType::Shell => self.shells,
            AmmoType::Cell => self.cells,
            AmmoType::Rocket => self.rockets,
        }
    }

    pub fn set(&mut self, ammo: AmmoType, count: i32) {
        match ammo {
            AmmoType::Clip => self.bullets = count,
            AmmoType::Shell => self.shells = count,
            AmmoType::Cell => self.cells = count,
            AmmoType::Rocket => self.rockets = count,
        }
    }
}

/// Key-card possession.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRing {
    pub blue_card: bool,
    pub yellow_card: bool,
    pub red_card: bool,
    pub blue_skull: bool,
    pub yellow_skull: bool,
    pub red_skull: bool,
}

impl KeyRing {
    pub fn has(&self, card: KeyCard) -> bool {
        match card {
            KeyCard::BlueCard => self.blue_card,
            KeyCard::YellowCard => self.yellow_card,
            KeyCard::RedCard => self.red_card,
            KeyCard::BlueSkull => self.blue_skull,
            KeyCard::YellowSkull => self.yellow_skull,
            KeyCard::RedSkull => self.red_skull,
        }
    }

    pub fn set(&mut self, card: KeyCard, held: bool) {
        let slot = match card {
            KeyCard::BlueCard => &mut self.blue_card,
            KeyCard::YellowCard => &mut self.yellow_card,
            KeyCard::RedCard => &mut self.red_card,
            KeyCard::BlueSkull => &mut self.blue_skull,
            KeyCard::YellowSkull => &mut self.yellow_skull,
            KeyCard::RedSkull => &mut self.red_skull,
        };
        *slot = held;
    }

    pub fn count(&self) -> usize {
        KeyCard::ALL.iter().filter(|card| self.has(**card)).count()
    }
}

/// Level tally counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub kills: i32,
    pub items: i32,
    pub secrets: i32,
}

/// Full snapshot of the status exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub health: i32,
    pub armor: i32,
    /// Raw weapon id as reported; see [`PlayerStatus::weapon_type`].
    pub weapon: i32,
    pub weapon_ammo: i32,
    pub ammo: AmmoCounts,
    pub max_ammo: AmmoCounts,
    pub keys: KeyRing,
    pub stats: Tally,
}

impl PlayerStatus {
    pub fn weapon_type(&self) -> Option<WeaponType> {
        WeaponType::try_from(self.weapon).ok()
    }
}

/// HUD-style summary centred on the current weapon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: i32,
    pub armor: i32,
    pub weapon: i32,
    pub weapon_name: String,
    pub current_ammo: i32,
    /// Capacity of the current weapon's ammo pool, 0 for melee weapons.
    pub max_ammo: i32,
    pub kills: i32,
    pub items: i32,
    pub secrets: i32,
    pub keys: KeyRing,
}

impl PlayerStats {
    /// Display name for a raw weapon id. Unknown ids render as `"Unknown"`.
    pub fn display_name(weapon: i32) -> String {
        weapon_name(weapon).unwrap_or("Unknown").to_string()
    }
}
