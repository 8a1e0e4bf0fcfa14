use std::collections::BTreeMap;

use tracing::warn;

use crate::autofill::collector::collect_payload;
use crate::autofill::model::AutofillRequest;
use crate::autofill::resolver::resolve_request;
use crate::cli::config::AppConfig;
use crate::dom::form_document::FormDocument;
use crate::exchange::{HttpTransport, LocalTransport, Transport};
use crate::sync::{ConsoleNotifier, Synchronizer};
use crate::trace::logger::TraceLogger;

fn load_document(html_path: &str) -> Result<FormDocument, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(html_path)?;
    Ok(FormDocument::from_html(&source))
}

// ============================================================================
// payload subcommand
// ============================================================================

pub fn cmd_payload(html_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(html_path)?;
    let request = collect_payload(&doc)?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

// ============================================================================
// sync subcommand
// ============================================================================

/// Run one sync and return whether it succeeded.
pub fn cmd_sync(
    html_path: &str,
    endpoint: &str,
    offline: bool,
    output: Option<&str>,
    config: &AppConfig,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut doc = load_document(html_path)?;

    let transport: Box<dyn Transport> = if offline {
        Box::new(LocalTransport)
    } else {
        Box::new(HttpTransport::new(endpoint))
    };

    if verbose > 0 {
        eprintln!(
            "Syncing {} via {}...",
            html_path,
            if offline { "local resolver" } else { endpoint }
        );
    }

    let mut synchronizer = Synchronizer::new(transport, Box::new(ConsoleNotifier));
    if let Some(path) = &config.trace_file {
        match TraceLogger::open(path) {
            Ok(tracer) => synchronizer = synchronizer.with_tracer(tracer),
            Err(e) => warn!(path = %path, error = %e, "Could not open trace file"),
        }
    }

    let report = match synchronizer.run(&mut doc) {
        Some(report) => report,
        None => return Ok(false),
    };

    if verbose > 0 {
        eprintln!(
            "Updated {} fields, {} items skipped",
            report.updated.len(),
            report.skipped
        );
    }

    let values: BTreeMap<String, String> = doc.values();
    let content = serde_json::to_string_pretty(&values)?;
    match output {
        Some(path) => {
            std::fs::write(path, &content)?;
            eprintln!("Field values written to: {}", path);
        }
        None => println!("{}", content),
    }

    Ok(true)
}

// ============================================================================
// resolve subcommand
// ============================================================================

pub fn cmd_resolve(request_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(request_path)?;
    let request: AutofillRequest = serde_json::from_str(&content)?;
    let result = resolve_request(&request);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
