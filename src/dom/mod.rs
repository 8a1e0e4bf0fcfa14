pub mod document;
pub mod form_document;
