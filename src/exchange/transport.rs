use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use crate::autofill::model::{AUTOFILL_PATH, AutofillRequest};
use crate::autofill::resolver::resolve_request;
use crate::error::{AutofillError, Result};

/// Sends a payload to the autofill endpoint and returns its JSON answer.
pub trait Transport {
    fn exchange(&self, request: &AutofillRequest) -> Result<Value>;
}

// ============================================================================
// HTTP transport
// ============================================================================

/// POSTs to `<base>/autofill`. No timeout of its own; the client defaults apply.
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::blocking::Client::new())
    }

    /// Use a preconfigured client (proxy, TLS, timeout settings).
    pub fn with_client(base_url: &str, client: reqwest::blocking::Client) -> Self {
        Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), AUTOFILL_PATH),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn exchange(&self, request: &AutofillRequest) -> Result<Value> {
        let body = serde_json::to_vec(request).map_err(|e| AutofillError::JsonSerialize {
            context: "autofill request".into(),
            source: e,
        })?;

        debug!(endpoint = %self.endpoint, bytes = body.len(), "Sending autofill request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AutofillError::HttpStatus(status.as_u16()));
        }

        let text = response.text()?;
        serde_json::from_str(&text).map_err(AutofillError::InvalidJson)
    }
}

// ============================================================================
// Local transport (no network)
// ============================================================================

/// Answers requests in-process with the built-in resolver.
///
/// The request goes through a JSON round trip first, so the resolver sees
/// exactly what a remote endpoint would.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTransport;

impl Transport for LocalTransport {
    fn exchange(&self, request: &AutofillRequest) -> Result<Value> {
        let wire = serde_json::to_string(request).map_err(|e| AutofillError::JsonSerialize {
            context: "autofill request".into(),
            source: e,
        })?;
        let received: AutofillRequest =
            serde_json::from_str(&wire).map_err(|e| AutofillError::JsonSerialize {
                context: "decoding autofill request".into(),
                source: e,
            })?;

        serde_json::to_value(resolve_request(&received)).map_err(|e| AutofillError::JsonSerialize {
            context: "autofill result".into(),
            source: e,
        })
    }
}
