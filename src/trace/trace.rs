use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::autofill::applier::ApplyReport;
use crate::autofill::model::AutofillRequest;
use crate::error::AutofillError;

/// One line of the JSONL sync trace, written per invocation.
#[derive(Debug, Serialize)]
pub struct SyncEvent {
    pub timestamp_ms: u128,

    pub kind: Option<String>,
    pub requested: Vec<String>,

    pub updated: Vec<String>,
    pub checksums: Vec<String>,
    pub skipped: usize,

    pub error: Option<String>,
}

impl SyncEvent {
    pub fn now() -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            kind: None,
            requested: vec![],
            updated: vec![],
            checksums: vec![],
            skipped: 0,
            error: None,
        }
    }

    pub fn with_request(mut self, request: &AutofillRequest) -> Self {
        self.kind = Some(request.state.kind.clone());
        self.requested = request.fields.iter().map(|f| f.label.clone()).collect();
        self
    }

    pub fn with_report(mut self, report: &ApplyReport) -> Self {
        self.updated = report.updated.clone();
        self.checksums = report.checksums.clone();
        self.skipped = report.skipped;
        self
    }

    pub fn with_error(mut self, error: &AutofillError) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
