use serde::{Deserialize, Serialize};

/// Closed set of object tags a level map can place.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Tile,
    Coin,
    Light,
    Player,
    Spike,
    Exit,
    Enemy,
    Bounce,
    Dash,
}

/// One placement record, decoded from a single classified pixel.
///
/// `y` counts rows from the bottom of the level, not from the top of the
/// bitmap the record came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelObject {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub x: u32,
    pub y: u32,
}
