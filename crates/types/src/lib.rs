//! imageit-types: Shared data types for ImageIt panels.
//!
//! This crate contains pure data types (sensors, mappings, panel options and
//! the number-or-string `Value`) that are shared across all ImageIt crates.
//! The JSON shape matches the panel options the dashboard host persists.

pub mod mapping;
pub mod options;
pub mod sensor;
pub mod value;

// Re-export commonly used types at the crate root for convenience
pub use mapping::{Mapping, MappingValues};
pub use options::{PanelOptions, DEFAULT_IMAGE_URL, DEFAULT_SENSORS_TEXT_SIZE};
pub use sensor::{Position, Query, Sensor};
pub use value::{to_number, Value};
