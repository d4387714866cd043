//! Engine key codes.
//!
//! Values match `doomkeys.h`. The host does no translation, so these are exactly the
//! integers `WASM_QueueKey` expects.

use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum DoomKey {
    RightArrow = 0xae,
    LeftArrow = 0xac,
    UpArrow = 0xad,
    DownArrow = 0xaf,
    StrafeL = 0xa0,
    StrafeR = 0xa1,
    Use = 0xa2,
    Fire = 0xa3,
    Escape = 27,
    Enter = 13,
    Tab = 9,
    F1 = 0x80 + 0x3b,
    F2 = 0x80 + 0x3c,
    F3 = 0x80 + 0x3d,
    F4 = 0x80 + 0x3e,
    F5 = 0x80 + 0x3f,
    F6 = 0x80 + 0x40,
    F7 = 0x80 + 0x41,
    F8 = 0x80 + 0x42,
    F9 = 0x80 + 0x43,
    F10 = 0x80 + 0x44,
    F11 = 0x80 + 0x57,
    F12 = 0x80 + 0x58,
    Backspace = 0x7f,
    Pause = 0xff,
    Equals = 0x3d,
    Minus = 0x2d,
    RShift = 0x80 + 0x36,
    RCtrl = 0x80 + 0x1d,
    RAlt = 0x80 + 0x38,

    // ASCII literals
    Space = 32,
    Y = 121,
    N = 110,
}

impl DoomKey {
    /// The engine does not distinguish left and right alt.
    pub const LALT: DoomKey = DoomKey::RAlt;

    pub const ALL: [DoomKey; 33] = [
        DoomKey::RightArrow,
        DoomKey::LeftArrow,
        DoomKey::UpArrow,
        DoomKey::DownArrow,
        DoomKey::StrafeL,
        DoomKey::StrafeR,
        DoomKey::Use,
        DoomKey::Fire,
        DoomKey::Escape,
        DoomKey::Enter,
        DoomKey::Tab,
        DoomKey::F1,
        DoomKey::F2,
        DoomKey::F3,
        DoomKey::F4,
        DoomKey::F5,
        DoomKey::F6,
        DoomKey::F7,
        DoomKey::F8,
        DoomKey::F9,
        DoomKey::F10,
        DoomKey::F11,
        DoomKey::F12,
        DoomKey::Backspace,
        DoomKey::Pause,
        DoomKey::Equals,
        DoomKey::Minus,
        DoomKey::RShift,
        DoomKey::RCtrl,
        DoomKey::RAlt,
        DoomKey::Space,
        DoomKey::Y,
        DoomKey::N,
    ];

    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Reverse lookup of a raw engine key code.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.code() == code)
    }
}

impl From<DoomKey> for i32 {
    fn from(key: DoomKey) -> Self {
        key.code()
    }
}
