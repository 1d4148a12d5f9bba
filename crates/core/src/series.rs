//! Data series supplied by the host and the lookup of a sensor's value

use imageit_types::{Query, Value};
use serde::{Deserialize, Serialize};

/// One data series (frame) as the host delivers it.
///
/// `values` is already ordered by the host; the last entry is the most
/// recent sample. `null` samples are kept as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Series {
    pub ref_id: Option<String>,
    pub name: Option<String>,
    pub values: Vec<Option<Value>>,
}

impl Series {
    pub fn new(ref_id: Option<&str>, name: Option<&str>, values: Vec<Option<Value>>) -> Self {
        Self {
            ref_id: ref_id.map(str::to_string),
            name: name.map(str::to_string),
            values,
        }
    }

    /// Most recent sample
    pub fn last_value(&self) -> Option<Value> {
        self.values.last().cloned().flatten()
    }

    /// Query match: by ref-id when the query has one, otherwise by name
    pub fn matches(&self, query: &Query) -> bool {
        if !query.id.is_empty() {
            self.ref_id.as_deref() == Some(query.id.as_str())
        } else {
            self.name.as_deref() == Some(query.alias.as_str())
        }
    }
}

/// Where the renderer gets a sensor's current value from.
///
/// The host owns querying and reduction; the renderer only asks for the
/// latest value of whatever series matches a sensor's query.
pub trait ValueSource {
    /// Latest value of the series matching `query`, `None` when there is no
    /// matching series or no sample
    fn latest_value(&self, query: &Query) -> Option<Value>;
}

impl ValueSource for [Series] {
    fn latest_value(&self, query: &Query) -> Option<Value> {
        find_series(self, query).and_then(Series::last_value)
    }
}

impl ValueSource for Vec<Series> {
    fn latest_value(&self, query: &Query) -> Option<Value> {
        self.as_slice().latest_value(query)
    }
}

/// First series matching the query
pub fn find_series<'a>(series: &'a [Series], query: &Query) -> Option<&'a Series> {
    series.iter().find(|s| s.matches(query))
}
