//! Form autofill synchronization.
//!
//! Collects checkbox and input state from a form, sends it to an autofill
//! endpoint, and writes the returned values back into the form. The form is
//! reached only through the [`dom::document::Document`] trait, so the
//! pipeline runs the same against a browser bridge or an in-memory
//! [`dom::form_document::FormDocument`].

pub mod autofill;
pub mod cli;
pub mod dom;
pub mod error;
pub mod exchange;
pub mod sync;
pub mod trace;

pub use autofill::applier::{ApplyReport, apply_result};
pub use autofill::coerce::coerce;
pub use autofill::collector::collect_payload;
pub use autofill::model::{AutofillField, AutofillRequest, AutofillResult, FieldValue, FormState};
pub use dom::document::Document;
pub use dom::form_document::FormDocument;
pub use error::{AutofillError, Result};
pub use sync::Synchronizer;
