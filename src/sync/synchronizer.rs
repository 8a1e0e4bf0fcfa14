use tracing::{error, info, warn};

use crate::autofill::applier::{ApplyReport, apply_result};
use crate::autofill::collector::collect_payload;
use crate::dom::document::Document;
use crate::exchange::Transport;
use crate::sync::notifier::Notifier;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::SyncEvent;

/// Runs collect, exchange and apply as one operation.
///
/// Invocations are independent: nothing is retried, queued or deduplicated.
pub struct Synchronizer {
    pub transport: Box<dyn Transport>,
    pub notifier: Box<dyn Notifier>,
    tracer: Option<TraceLogger>,
}

impl Synchronizer {
    pub fn new(transport: Box<dyn Transport>, notifier: Box<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            tracer: None,
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Synchronize `doc` with the endpoint.
    ///
    /// Collection and exchange failures are logged and alerted, and yield
    /// `None` with the document untouched. Problems with individual result
    /// items never reach the user.
    pub fn run(&self, doc: &mut dyn Document) -> Option<ApplyReport> {
        let mut event = SyncEvent::now();

        let response = collect_payload(doc).and_then(|request| {
            event = SyncEvent::now().with_request(&request);
            self.transport.exchange(&request)
        });

        match response {
            Ok(result) => {
                let report = apply_result(doc, &result);
                info!(
                    updated = report.updated.len(),
                    skipped = report.skipped,
                    "Autofill applied"
                );
                self.trace(event.with_report(&report));
                Some(report)
            }
            Err(e) => {
                error!(error = %e, "Autofill failed");
                self.notifier.alert(&format!("Autofill failed: {}", e));
                self.trace(event.with_error(&e));
                None
            }
        }
    }

    fn trace(&self, event: SyncEvent) {
        if let Some(tracer) = &self.tracer {
            if let Err(e) = tracer.log(&event) {
                warn!(path = %tracer.path().display(), error = %e, "Failed to write sync event");
            }
        }
    }
}
