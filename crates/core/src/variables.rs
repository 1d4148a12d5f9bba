//! Host variable substitution for sensor names and links.
//!
//! Supports the `$name`, `${name}` (optionally `${name:format}`, format
//! ignored) and `[[name]]` syntaxes. Unknown variables are left as written.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{(\w+)(?::[^}]*)?\}|\[\[(\w+)\]\]|\$(\w+)").expect("valid variable pattern")
});

/// Replaces dashboard variables in free text
pub trait VariableInterpolator {
    fn interpolate(&self, text: &str) -> String;
}

/// Leaves text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl VariableInterpolator for NoVariables {
    fn interpolate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Map-backed variable set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateVariables {
    values: HashMap<String, String>,
}

impl TemplateVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a variable
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl VariableInterpolator for TemplateVariables {
    fn interpolate(&self, text: &str) -> String {
        if self.values.is_empty() || !(text.contains('$') || text.contains("[[")) {
            return text.to_string();
        }

        VARIABLE_PATTERN
            .replace_all(text, |caps: &Captures| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map_or("", |m| m.as_str());
                match self.values.get(name) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> TemplateVariables {
        [("host", "plant-01"), ("room", "boiler")].into_iter().collect()
    }

    #[test]
    fn test_all_syntaxes() {
        let vars = vars();
        assert_eq!(vars.interpolate("$host"), "plant-01");
        assert_eq!(vars.interpolate("${host}/rooms"), "plant-01/rooms");
        assert_eq!(vars.interpolate("${room:raw} @ [[host]]"), "boiler @ plant-01");
    }

    #[test]
    fn test_unknown_variables_untouched() {
        assert_eq!(vars().interpolate("/d/abc?var-x=$missing"), "/d/abc?var-x=$missing");
    }

    #[test]
    fn test_set_replaces_value() {
        let mut vars = TemplateVariables::new();
        assert_eq!(vars.interpolate("$room"), "$room");

        vars.set("room", "boiler");
        vars.set("room", "cellar");
        assert_eq!(vars.interpolate("[[room]]"), "cellar");
    }

    #[test]
    fn test_no_variables_is_identity() {
        assert_eq!(NoVariables.interpolate("${host}"), "${host}");
    }
}
