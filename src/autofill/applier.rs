use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::autofill::model::{
    AUTOFILL_SUFFIX, AutofillResponse, CHECKSUM_ATTR, ResultItem, display_value,
};
use crate::dom::document::Document;

/// Outcome of applying a response, for diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Ids whose value was overwritten, in response order.
    pub updated: Vec<String>,
    /// Companion checkboxes that received a new checksum.
    pub checksums: Vec<String>,
    pub skipped: usize,
}

/// Write a response back into the document.
///
/// Nothing here is fatal. A malformed envelope is logged and leaves the
/// document untouched; bad items are logged and skipped.
pub fn apply_result(doc: &mut dyn Document, result: &Value) -> ApplyReport {
    let mut report = ApplyReport::default();

    let response = match AutofillResponse::deserialize(result) {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "Invalid result data for autofill");
            return report;
        }
    };

    for raw in &response.data {
        let item = match parse_item(raw) {
            Some(item) => item,
            None => {
                warn!(item = %raw, "Skipping invalid item in autofill data");
                report.skipped += 1;
                continue;
            }
        };
        // parse_item guarantees a non-empty id
        let id = item.id.as_deref().unwrap_or_default();

        if !doc.contains(id) {
            warn!(id = %id, "Element not found");
            report.skipped += 1;
            continue;
        }

        if let Some(checksum) = item.checksum.as_ref().filter(|c| !c.is_null()) {
            let companion = format!("{}{}", id, AUTOFILL_SUFFIX);
            if doc.set_attribute(&companion, CHECKSUM_ATTR, &display_value(checksum)) {
                report.checksums.push(companion);
            } else {
                debug!(id = %id, "No autofill checkbox to receive checksum");
            }
        }

        if let Some(value) = item.value.as_ref().filter(|v| !v.is_null()) {
            doc.set_value(id, &display_value(value));
            report.updated.push(id.to_string());
        }
    }

    report
}

/// Accepts only objects carrying a non-empty string id.
fn parse_item(raw: &Value) -> Option<ResultItem> {
    if !raw.is_object() {
        return None;
    }
    ResultItem::deserialize(raw)
        .ok()
        .filter(|item| item.id.as_deref().is_some_and(|id| !id.is_empty()))
}
