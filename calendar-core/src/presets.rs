//! Phone screen sizes offered by the UI.

use serde::{Deserialize, Serialize};

use crate::params::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePreset {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl DevicePreset {
    fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            id: format!("{width}x{height}"),
            name: name.into(),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetsResponse {
    /// Id of the preset matching the default wallpaper size.
    pub default: String,
    pub presets: Vec<DevicePreset>,
}

/// All known device presets, largest screen first.
pub fn device_presets() -> PresetsResponse {
    PresetsResponse {
        default: format!("{DEFAULT_WIDTH}x{DEFAULT_HEIGHT}"),
        presets: vec![
            DevicePreset::new("iPhone 14/15/16 Pro Max", 1290, 2796),
            DevicePreset::new("iPhone 14/15/16 Pro", 1179, 2556),
            DevicePreset::new("iPhone 13/14", 1170, 2532),
            DevicePreset::new("iPhone X/XS/11 Pro", 1125, 2436),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_exists() {
        let response = device_presets();
        let default = response
            .presets
            .iter()
            .find(|p| p.id == response.default)
            .unwrap();
        assert_eq!((default.width, default.height), (1290, 2796));
    }

    #[test]
    fn test_serializes_for_ui() {
        let json = serde_json::to_value(device_presets()).unwrap();
        assert_eq!(json["presets"][1]["id"], "1179x2556");
        assert_eq!(json["presets"][1]["name"], "iPhone 14/15/16 Pro");
        assert_eq!(json["presets"].as_array().unwrap().len(), 4);
    }
}
