//! Sensor configuration: one data-bound widget placed over the background image

use serde::{Deserialize, Deserializer, Serialize};

/// Reference to the data series a sensor displays.
///
/// `id` matches a series ref-id and takes precedence; `alias` matches the
/// series name and is only consulted when `id` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub id: String,
    pub alias: String,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            id: "A".to_string(),
            alias: String::new(),
        }
    }
}

/// Sensor position as percentages (0 to 100) of the container width/height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default = "default_coordinate", deserialize_with = "deserialize_coordinate")]
    pub x: f64,
    #[serde(default = "default_coordinate", deserialize_with = "deserialize_coordinate")]
    pub y: f64,
}

const DEFAULT_COORDINATE: f64 = 50.0;

fn default_coordinate() -> f64 {
    DEFAULT_COORDINATE
}

/// Non-finite coordinates are written as `null`; read those (and any other
/// non-number) back as the default coordinate
fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw.as_f64().filter(|c| c.is_finite()) {
        Some(c) => Ok(c),
        None => {
            log::debug!("Ignoring unusable coordinate {}", raw);
            Ok(DEFAULT_COORDINATE)
        }
    }
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: DEFAULT_COORDINATE,
            y: DEFAULT_COORDINATE,
        }
    }
}

/// A positioned, data-bound widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sensor {
    pub visible: bool,
    pub name: String,
    pub query: Query,
    pub background_color: String,
    pub font_color: String,
    pub bold: bool,
    pub value_blink: bool,
    pub icon_name: String,
    pub background_blink: bool,
    pub link: String,
    pub position: Position,
    /// Ids into the panel's mapping list; order is evaluation priority
    pub mapping_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Decimal places for the formatted value (None = chosen from magnitude)
    #[serde(deserialize_with = "deserialize_decimals")]
    pub decimals: Option<u32>,
}

impl Default for Sensor {
    fn default() -> Self {
        Self {
            visible: true,
            name: "Name".to_string(),
            query: Query::default(),
            background_color: "#000".to_string(),
            font_color: "#FFF".to_string(),
            bold: false,
            value_blink: false,
            icon_name: String::new(),
            background_blink: false,
            link: String::new(),
            position: Position::default(),
            mapping_ids: Vec::new(),
            unit: None,
            decimals: Some(2),
        }
    }
}

/// Accept decimals as a number or numeric text; anything unusable means "auto"
fn deserialize_decimals<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let count = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(match count {
        Some(c) if c.is_finite() && c >= 0.0 => Some(c.trunc().min(20.0) as u32),
        Some(c) => {
            log::debug!("Ignoring unusable decimals count {}", c);
            None
        }
        None => None,
    })
}
