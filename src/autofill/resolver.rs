use md5::{Digest, Md5};
use serde_json::Value;
use tracing::info;

use crate::autofill::model::{
    AutofillField, AutofillRequest, AutofillResult, FieldValue, FormState, format_number,
};
use crate::error::{AutofillError, Result};

// Per-kilometre line parameters.
const R_PER_KM: f64 = 0.05;
const X_PER_KM: f64 = 0.4;
const GCH_PER_KM: f64 = 0.05;
const BCH_PER_KM: f64 = 4.0e-5;

const SHORT_NAME_SEPARATORS: &[char] = &[',', '-', ' '];
const SHORT_NAME_PART_LEN: usize = 3;

/// Staleness token for a field value: hex MD5 of its JSON encoding.
///
/// The encoding follows Go's `encoding/json`, so tokens match the ones
/// rendered into forms by the entity server.
pub fn checksum(value: &Value) -> String {
    let mut hasher = Md5::new();
    hasher.update(canonical_json(value).as_bytes());
    format!("{:x}", hasher.finalize())
}

fn canonical_json(value: &Value) -> String {
    match value {
        Value::Number(n) if !n.is_i64() && !n.is_u64() => match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        },
        Value::String(s) => quote(s),
        other => other.to_string(),
    }
}

/// JSON string literal with HTML-safe escapes.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' | '>' | '&' | '\u{2028}' | '\u{2029}' => {
                out.push_str(&format!("\\u{:04x}", c as u32))
            }
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Checksum of an optional field value; a missing value hashes as `null`.
pub fn field_checksum(value: Option<&FieldValue>) -> String {
    checksum(&value.map(FieldValue::to_json).unwrap_or(Value::Null))
}

/// A value the endpoint knows how to derive from the form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    R,
    X,
    Gch,
    Bch,
    ShortName,
    Description,
}

impl Rule {
    pub const ALL: [Rule; 6] = [
        Rule::R,
        Rule::X,
        Rule::Gch,
        Rule::Bch,
        Rule::ShortName,
        Rule::Description,
    ];

    pub fn from_label(label: &str) -> Option<Rule> {
        match label {
            "R" => Some(Rule::R),
            "X" => Some(Rule::X),
            "Gch" => Some(Rule::Gch),
            "Bch" => Some(Rule::Bch),
            "ShortName" => Some(Rule::ShortName),
            "Description" => Some(Rule::Description),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rule::R => "R",
            Rule::X => "X",
            Rule::Gch => "Gch",
            Rule::Bch => "Bch",
            Rule::ShortName => "ShortName",
            Rule::Description => "Description",
        }
    }

    pub fn evaluate(&self, state: &FormState) -> FieldValue {
        let length = state_length(state);
        match self {
            Rule::R => FieldValue::Number(length * R_PER_KM),
            Rule::X => FieldValue::Number(length * X_PER_KM),
            Rule::Gch => FieldValue::Number(GCH_PER_KM * length),
            Rule::Bch => FieldValue::Number(BCH_PER_KM * length),
            Rule::ShortName => FieldValue::Text(short_name(&state_name(state))),
            Rule::Description => FieldValue::Text(state_name(state)),
        }
    }
}

/// Derive the value for `label`, or fail when no rule exists for it.
pub fn resolve_value(label: &str, state: &FormState) -> Result<FieldValue> {
    Rule::from_label(label)
        .map(|rule| rule.evaluate(state))
        .ok_or_else(|| AutofillError::UnknownRule(label.to_string()))
}

/// Answer an autofill request.
///
/// Fields whose checksum no longer matches their value were edited by the
/// user and are left out. Fields without a rule are left out too.
pub fn resolve_request(request: &AutofillRequest) -> AutofillResult {
    let mut data = Vec::new();
    let mut missing = Vec::new();

    for field in &request.fields {
        let current = field_checksum(field.value.as_ref());
        if field.checksum.as_deref() != Some(current.as_str()) {
            continue;
        }

        match resolve_value(&field.label, &request.state) {
            Ok(value) => data.push(AutofillField {
                id: field.id.clone(),
                label: field.label.clone(),
                checksum: Some(field_checksum(Some(&value))),
                value: Some(value),
            }),
            Err(_) => missing.push(field.label.clone()),
        }
    }

    if !missing.is_empty() {
        info!(missing = ?missing, "No autofill");
    }

    AutofillResult { data }
}

fn state_length(state: &FormState) -> f64 {
    state
        .values
        .get("Length")
        .and_then(FieldValue::as_number)
        .unwrap_or(0.0)
}

fn state_name(state: &FormState) -> String {
    match state.values.get("Name") {
        Some(FieldValue::Text(s)) => s.clone(),
        Some(number) => number.to_json().to_string(),
        None => String::new(),
    }
}

fn short_name(name: &str) -> String {
    name.split(SHORT_NAME_SEPARATORS)
        .filter(|part| !part.is_empty())
        .map(|part| part.chars().take(SHORT_NAME_PART_LEN).collect::<String>())
        .collect()
}
