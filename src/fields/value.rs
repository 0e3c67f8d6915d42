//! Field value objects and raw input normalization

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Persisted value used when a currency field holds nothing
pub const ZERO_AMOUNT: &str = "0.00";

/// Type-safe internal field values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Boolean(bool),
    Currency(String),
    Text(String),
    Selection(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (empty for booleans and selections)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) | FieldValue::Currency(s) => s,
            FieldValue::Boolean(_) | FieldValue::Selection(_) => "",
        }
    }

    /// Get the selected keys (empty for scalar values)
    pub fn as_selection(&self) -> &[String] {
        match self {
            FieldValue::Selection(keys) => keys,
            _ => &[],
        }
    }

    /// True when the value holds nothing a user entered
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Boolean(_) => false,
            FieldValue::Text(s) | FieldValue::Currency(s) => s.is_empty(),
            FieldValue::Selection(keys) => keys.is_empty(),
        }
    }
}

/// A value as written into a record
///
/// Deserializes from any JSON value the way [`DataValue::from_raw`] reads it,
/// so booleans and numeric key lists are accepted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    #[default]
    Absent,
    Integer(i64),
    Number(f64),
    Text(String),
    Keys(Vec<String>),
}

impl DataValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, DataValue::Absent)
    }

    /// Convert into the raw shape a field's `set_value` accepts
    pub fn to_raw(&self) -> Value {
        match self {
            DataValue::Absent => Value::Null,
            DataValue::Integer(i) => Value::from(*i),
            DataValue::Number(n) => Value::from(*n),
            DataValue::Text(s) => Value::String(s.clone()),
            DataValue::Keys(keys) => Value::Array(keys.iter().cloned().map(Value::String).collect()),
        }
    }

    /// Interpret an arbitrary JSON value as a stored value
    pub fn from_raw(raw: &Value) -> Self {
        match raw {
            Value::Null => DataValue::Absent,
            Value::Bool(b) => DataValue::Integer(i64::from(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DataValue::Integer(i),
                None => DataValue::Number(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => DataValue::Text(s.clone()),
            Value::Array(items) => DataValue::Keys(items.iter().map(scalar_to_string).collect()),
            Value::Object(map) => DataValue::Keys(map.values().map(scalar_to_string).collect()),
        }
    }
}

impl<'de> Deserialize<'de> for DataValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw))
    }
}

/// Result of normalizing one raw input
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Canonical internal value
    pub value: FieldValue,
    /// What a user sees and edits
    pub display: String,
    /// What gets written back into the record
    pub persisted: DataValue,
}

/// Loose truthiness of a submitted value
///
/// `null`, `false`, `0`, `""`, `"0"` and empty collections are falsy.
pub fn is_truthy(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Render a scalar input as text; `null` and `false` become empty
pub fn scalar_to_string(raw: &Value) -> String {
    match raw {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => String::new(),
    }
}

/// Interpret a submitted selection as an ordered, de-duplicated key list
///
/// Accepts an array of keys, an object of `key => key` pairs, a JSON array
/// string, a comma-separated string or a single scalar.
pub fn parse_keys(raw: &Value) -> Vec<String> {
    let candidates: Vec<String> = match raw {
        Value::Null | Value::Bool(false) => Vec::new(),
        Value::Array(items) => items.iter().map(scalar_to_string).collect(),
        Value::Object(map) => map.values().map(scalar_to_string).collect(),
        Value::String(s) => {
            let trimmed = s.trim();
            match serde_json::from_str::<Vec<Value>>(trimmed) {
                Ok(items) if trimmed.starts_with('[') => {
                    items.iter().map(scalar_to_string).collect()
                }
                _ => trimmed.split(',').map(|k| k.trim().to_string()).collect(),
            }
        }
        other => vec![scalar_to_string(other)],
    };

    let mut keys: Vec<String> = Vec::with_capacity(candidates.len());
    for key in candidates {
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Normalize a checkbox input: truthy persists as `1`, anything else as absent
pub fn normalize_boolean(raw: &Value) -> Normalized {
    let checked = is_truthy(raw);
    Normalized {
        value: FieldValue::Boolean(checked),
        display: if checked { "1" } else { "0" }.to_string(),
        persisted: if checked {
            DataValue::Integer(1)
        } else {
            DataValue::Absent
        },
    }
}

/// Normalize a currency input against the configured symbol
pub fn normalize_currency(raw: &Value, symbol: &str) -> Normalized {
    let persisted = currency_data_value(&scalar_to_string(raw));
    let display = format_currency(symbol, parse_leading_number(&persisted));
    Normalized {
        value: FieldValue::Currency(display.clone()),
        display,
        persisted: DataValue::Text(persisted),
    }
}

/// Keep only digits, `.` and `-`
pub fn strip_currency(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Stripped amount, or `0.00` when nothing numeric remains
pub fn currency_data_value(text: &str) -> String {
    let stripped = strip_currency(text);
    if stripped.is_empty() {
        ZERO_AMOUNT.to_string()
    } else {
        stripped
    }
}

/// Parse the longest numeric prefix (`-?\d*\.?\d*`); unparsable text is 0
pub fn parse_leading_number(text: &str) -> f64 {
    let text = text.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }
    text[..end].parse::<f64>().unwrap_or(0.0)
}

/// Two decimals with `,` thousands separators
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return ZERO_AMOUNT.to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction:02}")
}

/// Symbol followed by the formatted amount, e.g. `$1,234.50`
pub fn format_currency(symbol: &str, amount: f64) -> String {
    format!("{symbol}{}", format_amount(amount))
}
