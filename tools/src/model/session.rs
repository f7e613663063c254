use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::ToolsError;

/// Sideband fields the recorder writes next to the frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionMetadata {
    pub level: Option<Value>,
    pub deaths: Option<Value>,
    /// Any other non-numeric key found in the log.
    pub extra: BTreeMap<String, Value>,
}

/// A recorded gameplay session: base64 PNG payloads ordered by frame
/// index, separated from the metadata keys the recorder mixes into the
/// same JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLog {
    frames: BTreeMap<u32, String>,
    pub metadata: SessionMetadata,
}

impl SessionLog {
    /// Split a raw frame log into frames and metadata. Keys that parse as
    /// non-negative integers are frames and must hold string payloads;
    /// everything else is metadata.
    pub fn parse(json: &str) -> Result<Self, ToolsError> {
        let raw: serde_json::Map<String, Value> = serde_json::from_str(json)?;
        let mut frames = BTreeMap::new();
        let mut metadata = SessionMetadata::default();
        for (key, value) in raw {
            match key.parse::<u32>() {
                Ok(index) => {
                    let payload = value.as_str().ok_or_else(|| {
                        ToolsError::Session(format!("frame {index} is not a string payload"))
                    })?;
                    frames.insert(index, payload.to_owned());
                }
                Err(_) => match key.as_str() {
                    "level" => metadata.level = Some(value),
                    "deaths" => metadata.deaths = Some(value),
                    _ => {
                        metadata.extra.insert(key, value);
                    }
                },
            }
        }
        Ok(Self { frames, metadata })
    }

    pub fn load(path: &Path) -> Result<Self, ToolsError> {
        let json = fs::read_to_string(path)?;
        Self::parse(&json)
    }

    /// Frames in playback order (ascending index).
    pub fn frames(&self) -> impl Iterator<Item = (u32, &str)> {
        self.frames
            .iter()
            .map(|(index, payload)| (*index, payload.as_str()))
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
