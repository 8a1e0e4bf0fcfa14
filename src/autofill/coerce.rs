use crate::autofill::model::FieldValue;

/// Classify a raw field value before it is sent.
///
/// Empty stays empty text, anything that parses as a finite number becomes
/// a number, everything else is kept verbatim. Surrounding whitespace is
/// ignored for the numeric check only.
///
/// Whitespace-only input and hex literals such as `0x10` stay text, where a
/// browser's `Number()` would turn them into `0` and `16`.
pub fn coerce(raw: &str) -> FieldValue {
    if raw.is_empty() {
        return FieldValue::Text(String::new());
    }

    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => FieldValue::Number(n),
        _ => FieldValue::Text(raw.to_string()),
    }
}
