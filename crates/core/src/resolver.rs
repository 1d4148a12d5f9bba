//! Mapping resolution: pick the first matching rule and apply its overrides
//!
//! Mappings form a priority list. Evaluation stops at the first mapping whose
//! comparison holds; its values are merged over the sensor's own style field
//! by field, and a non-empty `overrideValue` replaces the displayed value.
//! Dangling mapping ids and unknown operators never match.

use crate::operator::{builtin_operators, OperatorRegistry};
use imageit_types::{Mapping, MappingValues, Sensor, Value};
use log::{debug, trace};
use serde::Serialize;

/// Style fields a mapping can override
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorStyle {
    pub font_color: String,
    pub background_color: String,
    pub visible: bool,
    pub bold: bool,
    pub value_blink: bool,
    pub background_blink: bool,
}

impl SensorStyle {
    /// The sensor's own (base) style
    pub fn from_sensor(sensor: &Sensor) -> Self {
        Self {
            font_color: sensor.font_color.clone(),
            background_color: sensor.background_color.clone(),
            visible: sensor.visible,
            bold: sensor.bold,
            value_blink: sensor.value_blink,
            background_blink: sensor.background_blink,
        }
    }

    /// Overlay the fields a mapping sets. `override_value` is not a style
    /// field and is left to the caller.
    pub fn merge(&mut self, values: &MappingValues) {
        if let Some(color) = &values.font_color {
            self.font_color = color.clone();
        }
        if let Some(color) = &values.background_color {
            self.background_color = color.clone();
        }
        if let Some(visible) = values.visible {
            self.visible = visible;
        }
        if let Some(bold) = values.bold {
            self.bold = bold;
        }
        if let Some(blink) = values.value_blink {
            self.value_blink = blink;
        }
        if let Some(blink) = values.background_blink {
            self.background_blink = blink;
        }
    }
}

/// Outcome of resolving one value against a mapping list
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    /// The winning mapping, if any matched
    pub applied: Option<&'a Mapping>,
    /// Value to display: the override text, or the original value
    pub value: Option<Value>,
}

/// Resolution against a sensor: the effective style as well as the value
#[derive(Debug, Clone, PartialEq)]
pub struct SensorResolution<'a> {
    pub applied: Option<&'a Mapping>,
    pub style: SensorStyle,
    pub value: Option<Value>,
}

/// Look up a sensor's mapping ids in the panel's mapping list.
///
/// Ids with no mapping are dropped; the remaining ones keep their order.
/// When several mappings share an id the first one wins.
pub fn sensor_mappings<'a>(mapping_ids: &[String], mappings: &'a [Mapping]) -> Vec<&'a Mapping> {
    mapping_ids
        .iter()
        .filter_map(|id| {
            let found = mappings.iter().find(|m| &m.id == id);
            if found.is_none() {
                debug!("Dropping dangling mapping id '{}'", id);
            }
            found
        })
        .collect()
}

/// Applies mapping lists using an operator registry
#[derive(Debug, Clone, Copy)]
pub struct MappingResolver<'r> {
    registry: &'r OperatorRegistry,
}

impl<'r> MappingResolver<'r> {
    pub fn new(registry: &'r OperatorRegistry) -> Self {
        Self { registry }
    }

    /// First mapping whose comparison holds for `value`
    pub fn find_match<'a>(
        &self,
        value: Option<&Value>,
        mappings: &[&'a Mapping],
    ) -> Option<&'a Mapping> {
        mappings.iter().copied().find(|mapping| {
            match self.registry.lookup(&mapping.operator) {
                Some(op) => op.matches(value, mapping.compare_to.as_ref()),
                None => {
                    debug!(
                        "Mapping '{}' uses unknown operator '{}'",
                        mapping.id, mapping.operator
                    );
                    false
                }
            }
        })
    }

    /// Resolve a value against an ordered mapping list
    pub fn resolve<'a>(&self, value: Option<Value>, mappings: &[&'a Mapping]) -> Resolution<'a> {
        let applied = self.find_match(value.as_ref(), mappings);

        let value = match applied.and_then(|m| m.values.override_text()) {
            Some(text) => Some(Value::Text(text.to_string())),
            None => value,
        };

        if let Some(mapping) = applied {
            trace!("Mapping '{}' applied", mapping.id);
        }

        Resolution { applied, value }
    }

    /// Resolve a sensor's live value against the panel's mappings, producing
    /// the effective style and value
    pub fn resolve_sensor<'a>(
        &self,
        sensor: &Sensor,
        value: Option<Value>,
        mappings: &'a [Mapping],
    ) -> SensorResolution<'a> {
        let ordered = sensor_mappings(&sensor.mapping_ids, mappings);
        let Resolution { applied, value } = self.resolve(value, &ordered);

        let mut style = SensorStyle::from_sensor(sensor);
        if let Some(mapping) = applied {
            style.merge(&mapping.values);
        }

        SensorResolution {
            applied,
            style,
            value,
        }
    }
}

impl Default for MappingResolver<'static> {
    fn default() -> Self {
        Self::new(builtin_operators())
    }
}
