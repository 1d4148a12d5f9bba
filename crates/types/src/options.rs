//! Panel options: the full configuration object the host persists

use crate::mapping::Mapping;
use crate::sensor::Sensor;
use serde::{Deserialize, Serialize};

/// Background image shown until the user configures their own
pub const DEFAULT_IMAGE_URL: &str = "https://i.ibb.co/6F8wgdG/default-background.png";

pub const DEFAULT_SENSORS_TEXT_SIZE: f64 = 10.0;

/// Panel configuration, read-only to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelOptions {
    #[serde(default = "default_image_url")]
    pub image_url: String,
    /// Append a cache-busting token to the image URL on every data refresh
    #[serde(default)]
    pub force_image_refresh: bool,
    /// Disable dragging of sensors
    #[serde(default)]
    pub lock_sensors: bool,
    #[serde(default = "default_sensors_text_size")]
    pub sensors_text_size: f64,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    #[serde(default)]
    pub mappings: Vec<Mapping>,
}

fn default_image_url() -> String {
    DEFAULT_IMAGE_URL.to_string()
}

fn default_sensors_text_size() -> f64 {
    DEFAULT_SENSORS_TEXT_SIZE
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            image_url: default_image_url(),
            force_image_refresh: false,
            lock_sensors: false,
            sensors_text_size: DEFAULT_SENSORS_TEXT_SIZE,
            sensors: Vec::new(),
            mappings: Vec::new(),
        }
    }
}
