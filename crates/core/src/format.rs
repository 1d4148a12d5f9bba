//! Value formatting by unit id and decimal count.
//!
//! Follows the dashboard host's unit conventions: a formatter turns a number
//! into `{prefix, text, suffix}` and the display string is their
//! concatenation. Unknown unit ids become a literal suffix.

use imageit_types::{to_number, Value};
use std::fmt;

/// Placeholder shown when a sensor has no value
pub const NO_DATA: &str = "No data";

const MAX_DECIMALS: u32 = 20;

const SHORT: &[&str] = &["", " K", " Mil", " Bil", " Tri", " Quadr", " Quint", " Sext", " Sept"];
const IEC_BYTES: &[&str] = &[" B", " KiB", " MiB", " GiB", " TiB", " PiB", " EiB", " ZiB", " YiB"];
const SI_PREFIXES: &[&str] = &["n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y"];
/// Index of the unprefixed entry in [`SI_PREFIXES`]
const SI_OFFSET: i32 = 3;

/// A formatted number split into its parts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormattedValue {
    pub prefix: String,
    pub text: String,
    pub suffix: String,
}

impl FormattedValue {
    fn text(text: String) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }

    fn with_suffix(text: String, suffix: impl Into<String>) -> Self {
        Self {
            text,
            suffix: suffix.into(),
            ..Default::default()
        }
    }

    fn with_prefix(text: String, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            text,
            ..Default::default()
        }
    }
}

impl fmt::Display for FormattedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.text, self.suffix)
    }
}

/// How a unit id renders numbers
#[derive(Debug, Clone, PartialEq)]
pub enum UnitFormat {
    /// Plain number
    None,
    /// Number followed by `suffix` (verbatim, spacing included)
    Suffix(String),
    /// `prefix` followed by the number
    Prefix(String),
    /// Value multiplied by 100 with a percent sign
    PercentUnit,
    /// Scaled by powers of `factor`, picking the suffix from `units`;
    /// `offset` is the index of the unscaled entry
    Scaled {
        factor: f64,
        units: Vec<String>,
        offset: i32,
    },
    /// SI scaling with a base unit, e.g. "W" -> " mW", " W", " kW"
    Si(String),
    /// Milliseconds, promoted to s / min / hour / day / year
    Milliseconds,
    /// Seconds, demoted to ms or promoted to min / hour / day / week / year
    Seconds,
}

impl UnitFormat {
    /// Formatter for a unit id
    pub fn for_unit(unit: Option<&str>) -> Self {
        let unit = match unit.map(str::trim) {
            None | Some("") => return UnitFormat::None,
            Some(u) => u,
        };

        match unit {
            "none" => UnitFormat::None,
            "short" => scaled(1000.0, SHORT, 0),
            "percent" => UnitFormat::Suffix("%".to_string()),
            "percentunit" => UnitFormat::PercentUnit,
            "humidity" => suffix("%H"),
            "celsius" => suffix("°C"),
            "fahrenheit" => suffix("°F"),
            "kelvin" => suffix("K"),
            "pressurebar" => suffix("bar"),
            "pressurehpa" => suffix("hPa"),
            "rpm" => suffix("rpm"),
            "ppm" => suffix("ppm"),
            "lux" => suffix("lux"),
            "velocityms" => suffix("m/s"),
            "velocitykmh" => suffix("km/h"),
            "kwatt" => suffix("kW"),
            "m" => suffix("min"),
            "h" => suffix("hour"),
            "d" => suffix("day"),
            "volt" => UnitFormat::Si("V".to_string()),
            "amp" => UnitFormat::Si("A".to_string()),
            "watt" => UnitFormat::Si("W".to_string()),
            "hertz" => UnitFormat::Si("Hz".to_string()),
            "lengthm" => UnitFormat::Si("m".to_string()),
            "bps" => UnitFormat::Si("bps".to_string()),
            "bytes" => scaled(1024.0, IEC_BYTES, 0),
            "decbytes" => UnitFormat::Si("B".to_string()),
            "ms" => UnitFormat::Milliseconds,
            "s" => UnitFormat::Seconds,
            "currencyUSD" => UnitFormat::Prefix("$".to_string()),
            "currencyEUR" => UnitFormat::Prefix("€".to_string()),
            custom => match custom.split_once(':') {
                Some(("prefix", p)) => UnitFormat::Prefix(p.to_string()),
                Some(("suffix", s)) => UnitFormat::Suffix(s.to_string()),
                _ => suffix(custom),
            },
        }
    }

    /// Format a number with `decimals` places (None = chosen from magnitude)
    pub fn format(&self, value: f64, decimals: Option<u32>) -> FormattedValue {
        if !value.is_finite() {
            return FormattedValue::text(non_finite_text(value));
        }

        match self {
            UnitFormat::None => FormattedValue::text(to_fixed(value, decimals)),
            UnitFormat::Suffix(s) => {
                FormattedValue::with_suffix(to_fixed(value, decimals), s.clone())
            }
            UnitFormat::Prefix(p) => {
                FormattedValue::with_prefix(to_fixed(value, decimals), p.clone())
            }
            UnitFormat::PercentUnit => {
                FormattedValue::with_suffix(to_fixed(value * 100.0, decimals), "%")
            }
            UnitFormat::Scaled {
                factor,
                units,
                offset,
            } => format_scaled(value, decimals, *factor, units, *offset),
            UnitFormat::Si(base) => {
                let units: Vec<String> = SI_PREFIXES
                    .iter()
                    .map(|p| format!(" {}{}", p, base))
                    .collect();
                format_scaled(value, decimals, 1000.0, &units, SI_OFFSET)
            }
            UnitFormat::Milliseconds => format_milliseconds(value, decimals),
            UnitFormat::Seconds => format_seconds(value, decimals),
        }
    }
}

fn suffix(unit: &str) -> UnitFormat {
    UnitFormat::Suffix(format!(" {}", unit))
}

fn scaled(factor: f64, units: &[&str], offset: i32) -> UnitFormat {
    UnitFormat::Scaled {
        factor,
        units: units.iter().map(|u| u.to_string()).collect(),
        offset,
    }
}

fn non_finite_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}

fn format_scaled(
    value: f64,
    decimals: Option<u32>,
    factor: f64,
    units: &[String],
    offset: i32,
) -> FormattedValue {
    let last = units.len() as i32 - 1;
    let magnitude = if value == 0.0 {
        0
    } else {
        (value.abs().ln() / factor.ln()).floor() as i32
    };
    let power = magnitude.clamp(-offset, last - offset);
    let unit = &units[(offset + power) as usize];

    FormattedValue::with_suffix(to_fixed(value / factor.powi(power), decimals), unit.clone())
}

fn format_milliseconds(value: f64, decimals: Option<u32>) -> FormattedValue {
    let abs = value.abs();
    let (scaled, unit) = if abs < 1000.0 {
        (value, " ms")
    } else if abs < 60_000.0 {
        (value / 1000.0, " s")
    } else if abs < 3_600_000.0 {
        (value / 60_000.0, " min")
    } else if abs < 86_400_000.0 {
        (value / 3_600_000.0, " hour")
    } else if abs < 31_536_000_000.0 {
        (value / 86_400_000.0, " day")
    } else {
        (value / 31_536_000_000.0, " year")
    };
    FormattedValue::with_suffix(to_fixed(scaled, decimals), unit)
}

fn format_seconds(value: f64, decimals: Option<u32>) -> FormattedValue {
    let abs = value.abs();
    if abs != 0.0 && abs < 1.0 {
        return format_milliseconds(value * 1000.0, decimals);
    }
    let (scaled, unit) = if abs < 60.0 {
        (value, " s")
    } else if abs < 3600.0 {
        (value / 60.0, " min")
    } else if abs < 86_400.0 {
        (value / 3600.0, " hour")
    } else if abs < 604_800.0 {
        (value / 86_400.0, " day")
    } else if abs < 31_536_000.0 {
        (value / 604_800.0, " week")
    } else {
        (value / 31_536_000.0, " year")
    };
    FormattedValue::with_suffix(to_fixed(scaled, decimals), unit)
}

/// Fixed-point text with half-up rounding
pub fn to_fixed(value: f64, decimals: Option<u32>) -> String {
    if !value.is_finite() {
        return non_finite_text(value);
    }
    let decimals = decimals
        .unwrap_or_else(|| decimals_for_value(value))
        .min(MAX_DECIMALS);

    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor + 0.5).floor() / factor;
    // Large magnitudes overflow the scaled product; keep the value as-is
    let rounded = if rounded.is_finite() { rounded } else { value };

    let text = format!("{:.*}", decimals as usize, rounded);
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// Precision picked from the value's magnitude when none is configured
fn decimals_for_value(value: f64) -> u32 {
    if value.fract() == 0.0 {
        return 0;
    }
    let abs = value.abs();
    let log10 = abs.log10().floor() as i32;
    let mut dec = -log10 + 1;
    let magn = 10f64.powi(-dec);
    if abs / magn > 2.25 {
        dec += 1;
    }
    dec.max(0) as u32
}

/// Display string for a sensor value: "No data" when absent, numbers (and
/// numeric text) formatted with the unit, other text shown verbatim
pub fn format_value(value: Option<&Value>, unit: Option<&str>, decimals: Option<u32>) -> String {
    let number = match value {
        None => return NO_DATA.to_string(),
        Some(Value::Number(n)) => *n,
        Some(Value::Text(text)) => {
            let n = to_number(text);
            if text.trim().is_empty() || n.is_nan() {
                return text.clone();
            }
            n
        }
    };

    UnitFormat::for_unit(unit).format(number, decimals).to_string()
}
