use std::cell::RefCell;
use std::rc::Rc;

use form_autofill::autofill::model::AutofillRequest;
use form_autofill::dom::form_document::FormDocument;
use form_autofill::error::{AutofillError, Result};
use form_autofill::exchange::Transport;
use form_autofill::sync::Notifier;
use serde_json::{Value, json};

pub fn fixture(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);
    std::fs::read_to_string(path).unwrap()
}

/// A freshly rendered line form: R and ShortName are blank and opted in,
/// X already holds a value and is opted out.
pub fn line_form() -> FormDocument {
    FormDocument::new()
        .with_select("type-select", "ACLineSegment")
        .with_field("Name", &json!("Demo line no 1"))
        .with_field("Length", &json!(10))
        .with_field("R", &json!(""))
        .with_field("X", &json!(1.5))
        .with_field("ShortName", &json!(""))
}

/// What a scripted transport hands back.
pub enum Scripted {
    Json(Value),
    Status(u16),
}

/// Transport returning a canned answer and remembering what it was sent.
pub struct MockTransport {
    reply: Scripted,
    pub requests: Rc<RefCell<Vec<AutofillRequest>>>,
}

impl MockTransport {
    pub fn json(value: Value) -> Self {
        Self {
            reply: Scripted::Json(value),
            requests: Rc::new(RefCell::new(vec![])),
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            reply: Scripted::Status(code),
            requests: Rc::new(RefCell::new(vec![])),
        }
    }
}

impl Transport for MockTransport {
    fn exchange(&self, request: &AutofillRequest) -> Result<Value> {
        self.requests.borrow_mut().push(request.clone());
        match &self.reply {
            Scripted::Json(v) => Ok(v.clone()),
            Scripted::Status(code) => Err(AutofillError::HttpStatus(*code)),
        }
    }
}

/// Notifier that keeps every alert for later inspection.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub alerts: Rc<RefCell<Vec<String>>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}
