//! Sensor presentation assembly: from configuration and live data to the
//! attributes a widget is rendered with.
//!
//! Everything here is recomputed on every render pass and holds no state
//! between passes.

use crate::format::format_value;
use crate::resolver::MappingResolver;
use crate::series::ValueSource;
use crate::transform::{to_pixels, Dimensions, PixelPosition};
use crate::variables::VariableInterpolator;
use imageit_types::{PanelOptions, Sensor, Value};
use serde::Serialize;

/// Link used when a sensor has none
pub const EMPTY_LINK: &str = "#";

/// Everything needed to draw one sensor widget
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorPresentation {
    /// Position of the sensor in the panel's sensor list
    pub index: usize,
    pub name: String,
    /// Formatted display string, "No data" when there is no value
    pub text: String,
    /// Effective value after any override
    pub value: Option<Value>,
    pub font_color: String,
    pub background_color: String,
    pub bold: bool,
    /// Blink the value text continuously
    pub value_blink: bool,
    /// Blink the widget background continuously
    pub background_blink: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    pub link: String,
    pub position: PixelPosition,
    pub draggable: bool,
    /// Id of the mapping that applied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_id: Option<String>,
}

/// Builds sensor presentations for a render pass
pub struct SensorAssembler<'a> {
    resolver: MappingResolver<'a>,
    variables: &'a dyn VariableInterpolator,
}

impl<'a> SensorAssembler<'a> {
    pub fn new(resolver: MappingResolver<'a>, variables: &'a dyn VariableInterpolator) -> Self {
        Self {
            resolver,
            variables,
        }
    }

    /// Presentation for one sensor, or `None` when its effective visibility
    /// is off (a mapping may hide or reveal a sensor)
    pub fn assemble_sensor(
        &self,
        index: usize,
        sensor: &Sensor,
        options: &PanelOptions,
        source: &dyn ValueSource,
        container: Dimensions,
    ) -> Option<SensorPresentation> {
        let value = source.latest_value(&sensor.query);
        let resolved = self.resolver.resolve_sensor(sensor, value, &options.mappings);

        if !resolved.style.visible {
            return None;
        }

        let text = format_value(resolved.value.as_ref(), sensor.unit.as_deref(), sensor.decimals);

        let link = self.variables.interpolate(&sensor.link);
        let link = if link.is_empty() {
            EMPTY_LINK.to_string()
        } else {
            link
        };

        let icon_name = Some(sensor.icon_name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Some(SensorPresentation {
            index,
            name: self.variables.interpolate(&sensor.name),
            text,
            value: resolved.value,
            font_color: resolved.style.font_color,
            background_color: resolved.style.background_color,
            bold: resolved.style.bold,
            value_blink: resolved.style.value_blink,
            background_blink: resolved.style.background_blink,
            icon_name,
            link,
            position: to_pixels(&sensor.position, container),
            draggable: !options.lock_sensors,
            mapping_id: resolved.applied.map(|m| m.id.clone()),
        })
    }

    /// Presentations for every visible sensor, in list order
    pub fn assemble(
        &self,
        options: &PanelOptions,
        source: &dyn ValueSource,
        container: Dimensions,
    ) -> Vec<SensorPresentation> {
        options
            .sensors
            .iter()
            .enumerate()
            .filter_map(|(index, sensor)| {
                self.assemble_sensor(index, sensor, options, source, container)
            })
            .collect()
    }
}
