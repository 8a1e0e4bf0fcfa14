use serde_json::Value;

use crate::autofill::model::{AUTOFILL_SUFFIX, CHECKSUM_ATTR, TARGET_ATTR, VALUE_SUFFIX};
use crate::autofill::resolver::checksum;
use crate::dom::form_document::FormControl;

/// Fields the user always types in themselves.
const NEVER_AUTOFILLED: &[&str] = &["Name", "Length"];
const MRID_MARKER: &str = "Mrid";

/// Id of the input rendered for field `name`.
pub fn value_id(name: &str) -> String {
    format!("{}{}", name, VALUE_SUFFIX)
}

/// Whether field `name` holding `value` gets an autofill checkbox.
///
/// Booleans, identifiers and the fields the rules derive from are never
/// offered for autofill.
pub fn offers_autofill(name: &str, value: &Value) -> bool {
    !value.is_boolean() && !NEVER_AUTOFILLED.contains(&name) && !name.contains(MRID_MARKER)
}

/// A value still at its default: empty text or zero.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// The autofill checkbox for field `name`, or `None` when the field is not
/// offered. Blank fields start opted in; the checksum pins the value the
/// form was rendered with.
pub fn checkbox_for(name: &str, value: &Value) -> Option<FormControl> {
    if !offers_autofill(name, value) {
        return None;
    }

    let target = value_id(name);
    let control = FormControl::checkbox(&format!("{}{}", target, AUTOFILL_SUFFIX), is_blank(value))
        .with_attribute(TARGET_ATTR, &target)
        .with_attribute(CHECKSUM_ATTR, &checksum(value));
    Some(control)
}
