use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::UnknownId;

/// Key ids accepted by `WASM_GetPlayerHasKey` (`card_t` order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum KeyCard {
    BlueCard = 0,
    YellowCard = 1,
    RedCard = 2,
    BlueSkull = 3,
    YellowSkull = 4,
    RedSkull = 5,
}

impl KeyCard {
    pub const ALL: [KeyCard; 6] = [
        KeyCard::BlueCard,
        KeyCard::YellowCard,
        KeyCard::RedCard,
        KeyCard::BlueSkull,
        KeyCard::YellowSkull,
        KeyCard::RedSkull,
    ];
}

impl From<KeyCard> for i32 {
    fn from(card: KeyCard) -> Self {
        card as i32
    }
}

impl TryFrom<i32> for KeyCard {
    type Error = UnknownId;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(UnknownId { kind: "key card", value })
    }
}
