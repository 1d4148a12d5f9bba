//! imageit-core: Mapping resolution and sensor presentation for ImageIt.
//!
//! Given panel options and the host's latest series values, this crate
//! decides which mapping applies to each sensor, formats the value, and
//! produces the attributes each sensor widget is drawn with. It also turns
//! drags and editor actions into complete new option sets for the host.

pub mod editor;
pub mod error;
pub mod format;
pub mod operator;
pub mod panel;
pub mod presentation;
pub mod resolver;
pub mod series;
pub mod transform;
pub mod variables;

pub use error::{ImageItError, Result};
pub use format::{format_value, FormattedValue, UnitFormat, NO_DATA};
pub use operator::{builtin_operators, Operator, OperatorKind, OperatorOption, OperatorRegistry};
pub use panel::{ImagePanel, OptionsSink, PanelPresentation};
pub use presentation::{SensorAssembler, SensorPresentation};
pub use resolver::{sensor_mappings, MappingResolver, Resolution, SensorResolution, SensorStyle};
pub use series::{Series, ValueSource};
pub use transform::{percent_to_pixels, pixels_to_percent, Dimensions, PixelPosition};
pub use variables::{NoVariables, TemplateVariables, VariableInterpolator};

// Re-export the shared types so hosts need only one dependency
pub use imageit_types::{Mapping, MappingValues, PanelOptions, Position, Query, Sensor, Value};
