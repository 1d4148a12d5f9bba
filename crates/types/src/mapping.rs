//! Mapping: a named conditional style rule referenced by sensors

use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize};

/// Style and value overrides applied when a mapping matches.
///
/// Every field is optional; an absent field leaves the sensor's own setting
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MappingValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_blink: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_blink: Option<bool>,
    /// Text displayed instead of the live value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_value: Option<String>,
}

impl MappingValues {
    /// The override text, if one is set and non-empty
    pub fn override_text(&self) -> Option<&str> {
        self.override_value.as_deref().filter(|s| !s.is_empty())
    }
}

/// A conditional style rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// Operator registry id, e.g. "equal" or "greaterThan"; empty never matches
    #[serde(default)]
    pub operator: String,
    /// Right-hand operand of the comparison; `None` never matches
    #[serde(
        default,
        deserialize_with = "deserialize_compare_to",
        skip_serializing_if = "Option::is_none"
    )]
    pub compare_to: Option<Value>,
    #[serde(default)]
    pub values: MappingValues,
}

impl Mapping {
    pub fn new(
        id: impl Into<String>,
        operator: impl Into<String>,
        compare_to: impl Into<Value>,
        values: MappingValues,
    ) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            operator: operator.into(),
            compare_to: Some(compare_to.into()),
            values,
        }
    }
}

/// Numbers and text are operands; null, booleans and containers are dropped
/// so one bad rule does not make the panel options unreadable
fn deserialize_compare_to<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
        serde_json::Value::String(s) => Some(Value::Text(s)),
        other => {
            log::debug!("Ignoring unusable compareTo {}", other);
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_json_roundtrip() {
        let json = r##"{
            "id": "mapping-ab12c",
            "description": "too hot",
            "operator": "greaterThan",
            "compareTo": "80",
            "values": {"backgroundColor": "red", "valueBlink": true, "overrideValue": "HOT"}
        }"##;

        let mapping: Mapping = serde_json::from_str(json).unwrap();
        assert_eq!(mapping.compare_to, Some(Value::Text("80".to_string())));
        assert_eq!(mapping.values.background_color.as_deref(), Some("red"));
        assert_eq!(mapping.values.font_color, None);
        assert_eq!(mapping.values.override_text(), Some("HOT"));

        let out = serde_json::to_string(&mapping).unwrap();
        let back: Mapping = serde_json::from_str(&out).unwrap();
        assert_eq!(back, mapping);
        assert!(!out.contains("fontColor"));
    }

    #[test]
    fn test_malformed_rule_still_parses() {
        let mapping: Mapping =
            serde_json::from_str(r#"{"id": "m", "compareTo": null, "values": {}}"#).unwrap();
        assert_eq!(mapping.operator, "");
        assert_eq!(mapping.compare_to, None);

        let mapping: Mapping =
            serde_json::from_str(r#"{"id": "m", "operator": "equal", "compareTo": true}"#)
                .unwrap();
        assert_eq!(mapping.compare_to, None);

        let mapping: Mapping = serde_json::from_str(r#"{"operator": "equal"}"#).unwrap();
        assert_eq!(mapping.id, "");
        assert_eq!(mapping.compare_to, None);
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let values = MappingValues {
            override_value: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(values.override_text(), None);
    }
}
