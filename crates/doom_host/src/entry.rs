//! Named engine exports the facade knows how to call.

use std::fmt;

/// One optional engine export.
///
/// Export names are the raw wasm names, without the `_` prefix Emscripten's JS glue adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryPoint {
    InitGraphics,
    DrawFrame,
    QueueKey,
    GetPlayerHealth,
    GetPlayerArmor,
    GetPlayerWeapon,
    GetPlayerAmmo,
    GetPlayerMaxAmmo,
    GetCurrentWeaponAmmo,
    GetPlayerHasKey,
    GetPlayerKills,
    GetPlayerItems,
    GetPlayerSecrets,
    StopGameLoop,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 14] = [
        EntryPoint::InitGraphics,
        EntryPoint::DrawFrame,
        EntryPoint::QueueKey,
        EntryPoint::GetPlayerHealth,
        EntryPoint::GetPlayerArmor,
        EntryPoint::GetPlayerWeapon,
        EntryPoint::GetPlayerAmmo,
        EntryPoint::GetPlayerMaxAmmo,
        EntryPoint::GetCurrentWeaponAmmo,
        EntryPoint::GetPlayerHasKey,
        EntryPoint::GetPlayerKills,
        EntryPoint::GetPlayerItems,
        EntryPoint::GetPlayerSecrets,
        EntryPoint::StopGameLoop,
    ];

    pub const fn export_name(self) -> &'static str {
        match self {
            EntryPoint::InitGraphics => "DG_Init",
            EntryPoint::DrawFrame => "DG_DrawFrame",
            EntryPoint::QueueKey => "WASM_QueueKey",
            EntryPoint::GetPlayerHealth => "WASM_GetPlayerHealth",
            EntryPoint::GetPlayerArmor => "WASM_GetPlayerArmor",
            EntryPoint::GetPlayerWeapon => "WASM_GetPlayerWeapon",
            EntryPoint::GetPlayerAmmo => "WASM_GetPlayerAmmo",
            EntryPoint::GetPlayerMaxAmmo => "WASM_GetPlayerMaxAmmo",
            EntryPoint::GetCurrentWeaponAmmo => "WASM_GetCurrentWeaponAmmo",
            EntryPoint::GetPlayerHasKey => "WASM_GetPlayerHasKey",
            EntryPoint::GetPlayerKills => "WASM_GetPlayerKills",
            EntryPoint::GetPlayerItems => "WASM_GetPlayerItems",
            EntryPoint::GetPlayerSecrets => "WASM_GetPlayerSecrets",
            EntryPoint::StopGameLoop => "WASM_StopGameLoop",
        }
    }

    /// Number of `i32` parameters the export takes.
    pub const fn arity(self) -> usize {
        match self {
            EntryPoint::QueueKey
            | EntryPoint::GetPlayerAmmo
            | EntryPoint::GetPlayerMaxAmmo
            | EntryPoint::GetPlayerHasKey => 1,
            _ => 0,
        }
    }

    /// Commands advance engine state and return nothing.
    pub const fn is_command(self) -> bool {
        matches!(
            self,
            EntryPoint::InitGraphics
                | EntryPoint::DrawFrame
                | EntryPoint::QueueKey
                | EntryPoint::StopGameLoop
        )
    }

    pub fn from_export_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|entry| entry.export_name() == name)
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.export_name())
    }
}
