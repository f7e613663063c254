use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::level::ObjectKind;
use crate::error::ToolsError;

pub type Rgb = [u8; 3];

/// One row of a palette file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Rgb,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
}

/// Classification table mapping exact RGB values to object kinds.
///
/// The table is configuration, not logic: different level sets ship
/// different palettes. A color may appear at most once; conflicting
/// assignments are rejected rather than merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: HashMap<Rgb, ObjectKind>,
}

impl Palette {
    pub fn from_entries(entries: &[(Rgb, ObjectKind)]) -> Result<Self, ToolsError> {
        let mut map = HashMap::with_capacity(entries.len());
        for &(color, kind) in entries {
            if let Some(previous) = map.insert(color, kind) {
                return Err(ToolsError::Palette(format!(
                    "color ({}, {}, {}) is mapped to both {:?} and {:?}",
                    color[0], color[1], color[2], previous, kind
                )));
            }
        }
        Ok(Self { entries: map })
    }

    /// The built-in table for the platformer level set.
    pub fn platformer() -> Self {
        Self::from_entries(&[
            ([0, 255, 0], ObjectKind::Tile),
            ([255, 0, 0], ObjectKind::Player),
            ([0, 0, 255], ObjectKind::Spike),
            ([0, 255, 255], ObjectKind::Bounce),
            ([255, 0, 255], ObjectKind::Dash),
        ])
        .expect("built-in palette has no duplicate colors")
    }

    /// Load a palette from a JSON entry list:
    /// `[{ "color": [r, g, b], "type": "tag" }, ...]`.
    pub fn load(path: &Path) -> Result<Self, ToolsError> {
        let json = fs::read_to_string(path)?;
        let entries: Vec<PaletteEntry> = serde_json::from_str(&json)?;
        let pairs: Vec<(Rgb, ObjectKind)> =
            entries.into_iter().map(|e| (e.color, e.kind)).collect();
        Self::from_entries(&pairs)
    }

    pub fn classify(&self, color: Rgb) -> Option<ObjectKind> {
        self.entries.get(&color).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_hits_exact_colors_only() {
        let palette = Palette::platformer();
        assert_eq!(palette.classify([0, 255, 0]), Some(ObjectKind::Tile));
        assert_eq!(palette.classify([0, 254, 0]), None);
        assert_eq!(palette.len(), 5);
    }

    #[test]
    fn duplicate_colors_are_rejected() {
        let result = Palette::from_entries(&[
            ([255, 255, 0], ObjectKind::Enemy),
            ([255, 255, 0], ObjectKind::Coin),
        ]);
        assert!(matches!(result, Err(ToolsError::Palette(_))));
    }
}
