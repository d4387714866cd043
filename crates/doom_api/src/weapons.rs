use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::UnknownId;

/// Display names indexed by weapon id (`weapontype_t` order).
pub const WEAPON_NAMES: [&str; 9] = [
    "Fist",
    "Pistol",
    "Shotgun",
    "Chaingun",
    "Rocket Launcher",
    "Plasma Rifle",
    "BFG 9000",
    "Chainsaw",
    "Super Shotgun",
];

/// Display name for a raw weapon id, `None` outside 0..=8.
pub fn weapon_name(id: i32) -> Option<&'static str> {
    usize::try_from(id).ok().and_then(|i| WEAPON_NAMES.get(i).copied())
}

/// Weapon ids matching the engine's `weapontype_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum WeaponType {
    Fist = 0,
    Pistol = 1,
    Shotgun = 2,
    Chaingun = 3,
    RocketLauncher = 4,
    PlasmaRifle = 5,
    Bfg9000 = 6,
    Chainsaw = 7,
    SuperShotgun = 8,
}

impl WeaponType {
    pub const ALL: [WeaponType; 9] = [
        WeaponType::Fist,
        WeaponType::Pistol,
        WeaponType::Shotgun,
        WeaponType::Chaingun,
        WeaponType::RocketLauncher,
        WeaponType::PlasmaRifle,
        WeaponType::Bfg9000,
        WeaponType::Chainsaw,
        WeaponType::SuperShotgun,
    ];

    pub fn name(self) -> &'static str {
        WEAPON_NAMES[self as usize]
    }

    /// The ammo pool this weapon draws from, per the engine's `weaponinfo` table.
    /// Melee weapons draw from none.
    pub fn ammo_type(self) -> Option<AmmoType> {
        match self {
            WeaponType::Fist | WeaponType::Chainsaw => None,
            WeaponType::Pistol | WeaponType::Chaingun => Some(AmmoType::Clip),
            WeaponType::Shotgun | WeaponType::SuperShotgun => Some(AmmoType::Shell),
            WeaponType::PlasmaRifle | WeaponType::Bfg9000 => Some(AmmoType::Cell),
            WeaponType::RocketLauncher => Some(AmmoType::Rocket),
        }
    }
}

impl From<WeaponType> for i32 {
    fn from(weapon: WeaponType) -> Self {
        weapon as i32
    }
}

impl TryFrom<i32> for WeaponType {
    type Error = UnknownId;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(UnknownId { kind: "weapon", value })
    }
}

/// Ammo pools matching the engine's `ammotype_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum AmmoType {
    /// Bullets (pistol, chaingun)
    Clip = 0,
    /// Shotgun and super shotgun
    Shell = 1,
    /// Plasma rifle and BFG
    Cell = 2,
    Rocket = 3,
}

impl AmmoType {
    pub const ALL: [AmmoType; 4] = [
        AmmoType::Clip,
        AmmoType::Shell,
        AmmoType::Cell,
        AmmoType::Rocket,
    ];
}

impl From<AmmoType> for i32 {
    fn from(ammo: AmmoType) -> Self {
        ammo as i32
    }
}

impl TryFrom<i32> for AmmoType {
    type Error = UnknownId;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(UnknownId { kind: "ammo", value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_names() {
        assert_eq!(weapon_name(0), Some("Fist"));
        assert_eq!(weapon_name(6), Some("BFG 9000"));
        assert_eq!(weapon_name(8), Some("Super Shotgun"));
        assert_eq!(weapon_name(9), None);
        assert_eq!(weapon_name(-1), None);
    }

    #[test]
    fn test_weapon_ids_line_up_with_names() {
        for weapon in WeaponType::ALL {
            assert_eq!(weapon_name(weapon as i32), Some(weapon.name()));
        }
    }

    #[test]
    fn test_weapon_try_from() {
        assert_eq!(WeaponType::try_from(4), Ok(WeaponType::RocketLauncher));
        let err = WeaponType::try_from(12).unwrap_err();
        assert_eq!(err.value, 12);
        assert_eq!(err.to_string(), "weapon id out of range: 12");
    }

    #[test]
    fn test_ammo_mapping() {
        assert_eq!(WeaponType::Fist.ammo_type(), None);
        assert_eq!(WeaponType::Chainsaw.ammo_type(), None);
        assert_eq!(WeaponType::SuperShotgun.ammo_type(), Some(AmmoType::Shell));
        assert_eq!(WeaponType::Bfg9000.ammo_type(), Some(AmmoType::Cell));
        assert_eq!(WeaponType::RocketLauncher.ammo_type(), Some(AmmoType::Rocket));
    }

    #[test]
    fn test_ammo_try_from() {
        assert_eq!(AmmoType::try_from(3), Ok(AmmoType::Rocket));
        assert!(AmmoType::try_from(4).is_err());
    }
}
