use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Path the autofill endpoint is mounted on.
pub const AUTOFILL_PATH: &str = "/autofill";

/// Suffix marking a checkbox as an autofill opt-in.
pub const AUTOFILL_SUFFIX: &str = "-autofill";
/// Suffix marking an input as a form value.
pub const VALUE_SUFFIX: &str = "-value";
/// Stripped from an autofill checkbox id to obtain its label.
pub const LABEL_SUFFIX: &str = "-value-autofill";
/// Id of the selector that holds the entity kind.
pub const KIND_FIELD_ID: &str = "type-select";
pub const KIND_KEY: &str = "kind";

pub const TARGET_ATTR: &str = "target";
pub const CHECKSUM_ATTR: &str = "checksum";

/// A raw field value after coercion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// JSON form of the value. Integral numbers carry no fractional part,
    /// so `70` goes on the wire as `70` rather than `70.0`.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                Value::from(*n as i64)
            }
            FieldValue::Number(n) => Value::from(*n),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// The `state` half of the request: the kind plus every `*-value` input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default)]
    pub kind: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, FieldValue>,
}

impl FormState {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: &str, value: FieldValue) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

/// One checked autofill checkbox, as sent to the endpoint.
///
/// `value` is left out of the JSON entirely when the target element is
/// missing; `id` and `checksum` are sent as `null` when their attribute is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutofillField {
    pub id: Option<String>,
    pub checksum: Option<String>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutofillRequest {
    pub state: FormState,
    #[serde(default)]
    pub fields: Vec<AutofillField>,
}

/// Envelope of an endpoint response. Items stay untyped until each one is
/// inspected, so a single bad item cannot reject the whole response.
#[derive(Debug, Deserialize)]
pub struct AutofillResponse {
    pub data: Vec<Value>,
}

/// One actionable entry of a response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub checksum: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// What the resolver sends back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutofillResult {
    pub data: Vec<AutofillField>,
}

/// Shortest round-trip text of a number, in the notation browsers (and Go's
/// JSON encoder) use: plain decimals for 1e-6 <= |n| < 1e21, exponent form
/// such as `2e-7` or `1e+21` outside that range.
pub fn format_number(n: f64) -> String {
    let magnitude = n.abs();
    if n == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return format!("{}", if n == 0.0 { 0.0 } else { n });
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// Render a JSON value the way a browser stringifies it into a form field.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) if !n.is_i64() && !n.is_u64() => match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        },
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
        other => other.to_string(),
    }
}
