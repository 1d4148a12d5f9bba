//! List edits for the options editor.
//!
//! Every operation returns a new list (or a new options object) to hand to
//! the host as a whole; nothing is edited in place.

use crate::error::{ImageItError, Result};
use crate::operator::builtin_operators;
use imageit_types::{Mapping, MappingValues, PanelOptions, Sensor, Value};
use rand::Rng;

const MAPPING_ID_PREFIX: &str = "mapping-";
const MAPPING_ID_LEN: usize = 5;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(ImageItError::IndexOutOfRange { index, len })
    }
}

/// `items` with `item` appended
pub fn push<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut out = items.to_vec();
    out.push(item);
    out
}

/// `items` with the entry at `index` replaced
pub fn replace<T: Clone>(items: &[T], index: usize, item: T) -> Result<Vec<T>> {
    check_index(index, items.len())?;
    let mut out = items.to_vec();
    out[index] = item;
    Ok(out)
}

/// `items` without the entry at `index`
pub fn remove<T: Clone>(items: &[T], index: usize) -> Result<Vec<T>> {
    check_index(index, items.len())?;
    let mut out = items.to_vec();
    out.remove(index);
    Ok(out)
}

/// `items` with the entry at `from` moved to position `to`
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>> {
    check_index(from, items.len())?;
    check_index(to, items.len())?;
    let mut out = items.to_vec();
    let item = out.remove(from);
    out.insert(to, item);
    Ok(out)
}

/// Random mapping id of the form `mapping-xxxxx` (lowercase base 36)
pub fn new_mapping_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..MAPPING_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}", MAPPING_ID_PREFIX, suffix)
}

/// Sensor added by "Add New"
pub fn new_sensor() -> Sensor {
    Sensor::default()
}

/// Mapping added by "Add New": random id, first operator, compare to 0
pub fn new_mapping() -> Mapping {
    Mapping {
        id: new_mapping_id(),
        description: String::new(),
        operator: builtin_operators().first().id.to_string(),
        compare_to: Some(Value::Number(0.0)),
        values: MappingValues {
            font_color: Some("#fff".to_string()),
            background_color: Some("#000".to_string()),
            visible: Some(true),
            bold: Some(false),
            value_blink: Some(false),
            background_blink: Some(false),
            override_value: None,
        },
    }
}

/// Append a mapping id to a sensor's list; ids are trimmed and must be
/// non-empty and not already present
pub fn add_mapping_id(ids: &[String], id: &str) -> Result<Vec<String>> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ImageItError::EmptyMappingId);
    }
    if ids.iter().any(|existing| existing == id) {
        return Err(ImageItError::DuplicateMappingId(id.to_string()));
    }
    Ok(push(ids, id.to_string()))
}

pub fn add_sensor(options: &PanelOptions) -> PanelOptions {
    PanelOptions {
        sensors: push(&options.sensors, new_sensor()),
        ..options.clone()
    }
}

pub fn update_sensor(options: &PanelOptions, index: usize, sensor: Sensor) -> Result<PanelOptions> {
    Ok(PanelOptions {
        sensors: replace(&options.sensors, index, sensor)?,
        ..options.clone()
    })
}

pub fn delete_sensor(options: &PanelOptions, index: usize) -> Result<PanelOptions> {
    Ok(PanelOptions {
        sensors: remove(&options.sensors, index)?,
        ..options.clone()
    })
}

pub fn add_mapping(options: &PanelOptions) -> PanelOptions {
    PanelOptions {
        mappings: push(&options.mappings, new_mapping()),
        ..options.clone()
    }
}

pub fn update_mapping(
    options: &PanelOptions,
    index: usize,
    mapping: Mapping,
) -> Result<PanelOptions> {
    Ok(PanelOptions {
        mappings: replace(&options.mappings, index, mapping)?,
        ..options.clone()
    })
}

/// Remove a mapping. Sensors keep any ids that referred to it; dangling ids
/// are skipped at resolution time.
pub fn delete_mapping(options: &PanelOptions, index: usize) -> Result<PanelOptions> {
    Ok(PanelOptions {
        mappings: remove(&options.mappings, index)?,
        ..options.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_list_operations_leave_input_untouched() {
        let items = vec![1, 2, 3];

        assert_eq!(push(&items, 4), vec![1, 2, 3, 4]);
        assert_eq!(replace(&items, 1, 9).unwrap(), vec![1, 9, 3]);
        assert_eq!(remove(&items, 0).unwrap(), vec![2, 3]);
        assert_eq!(move_item(&items, 0, 2).unwrap(), vec![2, 3, 1]);
        assert_eq!(move_item(&items, 2, 0).unwrap(), vec![3, 1, 2]);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_out_of_range() {
        let items = vec!["a"];
        assert_eq!(
            remove(&items, 1),
            Err(ImageItError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(move_item(&items, 0, 5).is_err());
        assert!(replace(&items, 2, "b").is_err());
    }

    #[test]
    fn test_new_mapping_defaults() {
        let mapping = new_mapping();
        assert!(mapping.id.starts_with("mapping-"));
        assert_eq!(mapping.id.len(), "mapping-".len() + 5);
        assert!(mapping.id["mapping-".len()..]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(mapping.operator, "equal");
        assert_eq!(mapping.compare_to, Some(Value::Number(0.0)));
        assert_eq!(mapping.values.visible, Some(true));
        assert_eq!(mapping.values.override_value, None);
    }

    #[test]
    fn test_add_mapping_id_validation() {
        let ids = strings(&["hot"]);
        assert_eq!(add_mapping_id(&ids, "  cold ").unwrap(), strings(&["hot", "cold"]));
        assert_eq!(add_mapping_id(&ids, "   "), Err(ImageItError::EmptyMappingId));
        assert_eq!(
            add_mapping_id(&ids, "hot"),
            Err(ImageItError::DuplicateMappingId("hot".to_string()))
        );
    }

    #[test]
    fn test_delete_mapping_keeps_sensor_references() {
        let options = add_mapping(&PanelOptions::default());
        let id = options.mappings[0].id.clone();
        let mut sensor = new_sensor();
        sensor.mapping_ids = vec![id.clone()];
        let options = PanelOptions {
            sensors: vec![sensor],
            ..options
        };

        let options = delete_mapping(&options, 0).unwrap();
        assert!(options.mappings.is_empty());
        assert_eq!(options.sensors[0].mapping_ids, vec![id]);
    }

    #[test]
    fn test_sensor_edits() {
        let options = add_sensor(&add_sensor(&PanelOptions::default()));
        assert_eq!(options.sensors.len(), 2);

        let renamed = Sensor {
            name: "Pump".to_string(),
            ..options.sensors[1].clone()
        };
        let options = update_sensor(&options, 1, renamed).unwrap();
        assert_eq!(options.sensors[1].name, "Pump");

        let options = delete_sensor(&options, 0).unwrap();
        assert_eq!(options.sensors.len(), 1);
        assert_eq!(options.sensors[0].name, "Pump");
    }
}
