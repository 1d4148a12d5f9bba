//! Operator registry: the fixed set of comparisons usable in mapping rules
//!
//! Operands are `Option<&Value>`; `None` stands for an undefined value (no
//! data) and never matches. Equality and ordering coerce text to numbers
//! when the other side is a number, as the dashboard host does.

use crate::error::{ImageItError, Result};
use imageit_types::Value;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The kinds of comparison a mapping can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatorKind {
    Equal,
    NotEqual,
    GreaterThan,
    SmallerThan,
}

impl OperatorKind {
    /// Evaluate `value <op> compare_to`
    pub fn evaluate(self, value: Option<&Value>, compare_to: Option<&Value>) -> bool {
        match self {
            OperatorKind::Equal => is_equal_to(value, compare_to),
            OperatorKind::NotEqual => is_not_equal_to(value, compare_to),
            OperatorKind::GreaterThan => is_greater_than(value, compare_to),
            OperatorKind::SmallerThan => is_smaller_than(value, compare_to),
        }
    }
}

/// Loose equality; both operands must be defined
pub fn is_equal_to(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(Value::Text(a)), Some(Value::Text(b))) => a == b,
        (Some(a), Some(b)) => a.as_number() == b.as_number(),
        _ => false,
    }
}

/// Complement of [`is_equal_to`] over defined operands; undefined never matches
pub fn is_not_equal_to(a: Option<&Value>, b: Option<&Value>) -> bool {
    a.is_some() && b.is_some() && !is_equal_to(a, b)
}

pub fn is_greater_than(a: Option<&Value>, b: Option<&Value>) -> bool {
    compare(a, b) == Some(Ordering::Greater)
}

pub fn is_smaller_than(a: Option<&Value>, b: Option<&Value>) -> bool {
    compare(a, b) == Some(Ordering::Less)
}

/// Text against text orders by UTF-16 code units; any other pairing is
/// numeric, and NaN is unordered.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Option<Ordering> {
    match (a?, b?) {
        (Value::Text(a), Value::Text(b)) => Some(a.encode_utf16().cmp(b.encode_utf16())),
        (a, b) => a.as_number().partial_cmp(&b.as_number()),
    }
}

/// A registry entry
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub kind: OperatorKind,
    pub id: &'static str,
    /// Display symbol, e.g. ">"
    pub operator: &'static str,
    pub description: Option<&'static str>,
}

impl Operator {
    pub fn matches(&self, value: Option<&Value>, compare_to: Option<&Value>) -> bool {
        self.kind.evaluate(value, compare_to)
    }
}

/// Entry for an editor drop-down
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorOption {
    pub label: &'static str,
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// Read-only list of operators, in declaration order
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    operators: Vec<Operator>,
}

impl OperatorRegistry {
    /// The built-in operators: equal, notEqual, greaterThan, smallerThan
    pub fn builtin() -> Self {
        Self {
            operators: vec![
                Operator {
                    kind: OperatorKind::Equal,
                    id: "equal",
                    operator: "=",
                    description: Some("Check if the two values are equal"),
                },
                Operator {
                    kind: OperatorKind::NotEqual,
                    id: "notEqual",
                    operator: "!=",
                    description: Some("Check if the two values are not equal"),
                },
                Operator {
                    kind: OperatorKind::GreaterThan,
                    id: "greaterThan",
                    operator: ">",
                    description: None,
                },
                Operator {
                    kind: OperatorKind::SmallerThan,
                    id: "smallerThan",
                    operator: "<",
                    description: None,
                },
            ],
        }
    }

    /// Find an operator by id
    pub fn lookup(&self, id: &str) -> Option<&Operator> {
        self.operators.iter().find(|op| op.id == id)
    }

    /// Find an operator by id, failing on unknown ids
    pub fn get(&self, id: &str) -> Result<&Operator> {
        self.lookup(id)
            .ok_or_else(|| ImageItError::UnknownOperator(id.to_string()))
    }

    /// The default operator for new mappings
    pub fn first(&self) -> &Operator {
        &self.operators[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }

    /// Options for an operator selector: symbol as label, id as value
    pub fn options(&self) -> Vec<OperatorOption> {
        self.operators
            .iter()
            .map(|op| OperatorOption {
                label: op.operator,
                value: op.id,
                description: op.description,
            })
            .collect()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

static BUILTIN_OPERATORS: Lazy<OperatorRegistry> = Lazy::new(OperatorRegistry::builtin);

/// The process-wide built-in registry
pub fn builtin_operators() -> &'static OperatorRegistry {
    &BUILTIN_OPERATORS
}
