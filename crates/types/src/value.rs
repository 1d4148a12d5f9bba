//! Sensor values as delivered by the host: a number or a piece of text.
//!
//! Comparisons between values follow loose (JavaScript-style) coercion:
//! text compared against a number is converted with [`to_number`] first.
//! Mapping configurations routinely store `compareTo` as text while live
//! values arrive as numbers, so this coercion is part of the contract.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A live or configured value: number or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Numeric view of the value. Text that is not a number yields NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Text(s) => to_number(s),
        }
    }

    /// Text view of the value
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Number(n) => Cow::Owned(number_to_string(*n)),
            Value::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

fn number_to_string(n: f64) -> String {
    if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        n.to_string()
    }
}

/// Convert text to a number the way a JavaScript host does (`Number(text)`).
///
/// Surrounding whitespace is ignored and blank text is zero. Decimal and
/// exponent forms, `Infinity`, and unsigned `0x`/`0o`/`0b` literals are
/// accepted. Anything else is NaN.
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(n) = parse_radix_literal(trimmed) {
        return n;
    }

    let (sign, body) = match trimmed.as_bytes()[0] {
        b'+' => (1.0, &trimmed[1..]),
        b'-' => (-1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if body == "Infinity" {
        return sign * f64::INFINITY;
    }

    let starts_numeric = body
        .as_bytes()
        .first()
        .map_or(false, |b| b.is_ascii_digit() || *b == b'.');
    let only_numeric_chars = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    let has_digit = body.chars().any(|c| c.is_ascii_digit());

    if !(starts_numeric && only_numeric_chars && has_digit) {
        return f64::NAN;
    }

    body.parse::<f64>().map(|n| sign * n).unwrap_or(f64::NAN)
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    // Accumulate in f64 so literals wider than 64 bits stay finite
    let n = digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(n.unwrap_or(f64::NAN))
}
