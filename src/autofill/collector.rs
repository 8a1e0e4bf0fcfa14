use tracing::{debug, warn};

use crate::autofill::coerce::coerce;
use crate::autofill::model::{
    AUTOFILL_SUFFIX, AutofillField, AutofillRequest, CHECKSUM_ATTR, FormState, KIND_FIELD_ID,
    KIND_KEY, LABEL_SUFFIX, TARGET_ATTR, VALUE_SUFFIX,
};
use crate::dom::document::Document;
use crate::error::{AutofillError, Result};

/// Build the request payload from the current document.
///
/// Fails with [`AutofillError::MissingRequiredField`] when the kind selector
/// is absent; no partial payload is ever returned.
pub fn collect_payload(doc: &dyn Document) -> Result<AutofillRequest> {
    let inputs = doc.inputs();

    let fields: Vec<AutofillField> = inputs
        .iter()
        .filter(|input| input.is_checkbox() && input.checked && input.id.ends_with(AUTOFILL_SUFFIX))
        .map(|checkbox| checkbox_descriptor(doc, &checkbox.id))
        .collect();

    let kind = doc
        .get_value(KIND_FIELD_ID)
        .ok_or_else(|| AutofillError::MissingRequiredField(KIND_FIELD_ID.to_string()))?;

    let mut state = FormState::new(kind);
    for input in inputs.iter().filter(|i| i.id.ends_with(VALUE_SUFFIX)) {
        let key = strip_suffix(&input.id, VALUE_SUFFIX);
        if key == KIND_KEY {
            warn!(id = %input.id, "Ignoring value field that shadows the kind selector");
            continue;
        }
        let raw = doc.get_value(&input.id).unwrap_or_default();
        state.values.insert(key.to_string(), coerce(&raw));
    }

    debug!(
        kind = %state.kind,
        values = state.values.len(),
        fields = fields.len(),
        "Collected autofill payload"
    );

    Ok(AutofillRequest { state, fields })
}

fn checkbox_descriptor(doc: &dyn Document, checkbox_id: &str) -> AutofillField {
    let target = doc.get_attribute(checkbox_id, TARGET_ATTR);
    let value = target
        .as_deref()
        .and_then(|id| doc.get_value(id))
        .map(|raw| coerce(&raw));

    AutofillField {
        checksum: doc.get_attribute(checkbox_id, CHECKSUM_ATTR),
        label: strip_suffix(checkbox_id, LABEL_SUFFIX).to_string(),
        id: target,
        value,
    }
}

fn strip_suffix<'a>(id: &'a str, suffix: &str) -> &'a str {
    id.strip_suffix(suffix).unwrap_or(id)
}
