//! ImageIt: a background image overlaid with data-driven sensor widgets
//!
//! This library provides the standalone host around the ImageIt engine:
//! - Persistence of panel options (`config`)
//! - Loading series data and variables from files (`host`)
//!
//! The engine itself lives in `imageit-core`; shared types in `imageit-types`.

pub mod config;
pub mod host;

// Re-export commonly used types
pub use config::OptionsStore;
pub use imageit_core::{ImagePanel, PanelPresentation, SensorPresentation};
pub use imageit_types::{Mapping, PanelOptions, Sensor, Value};
