/// An `<input>` as seen while scanning the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElement {
    pub id: String,
    /// The `type` attribute, lowercased. `"text"` when absent.
    pub input_type: String,
    pub checked: bool,
}

impl InputElement {
    pub fn is_checkbox(&self) -> bool {
        self.input_type == "checkbox"
    }
}

/// The slice of a live document the synchronizer needs.
///
/// Elements are addressed purely by id. Implementations decide what "value"
/// means for non-input controls (a `<select>` reports its selected option).
pub trait Document {
    /// Every `<input>` element, in document order.
    fn inputs(&self) -> Vec<InputElement>;

    /// Whether an element with this id exists.
    fn contains(&self, id: &str) -> bool;

    fn get_attribute(&self, id: &str, name: &str) -> Option<String>;

    /// Returns `false` when no element has this id.
    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> bool;

    fn get_value(&self, id: &str) -> Option<String>;

    /// Returns `false` when no element has this id.
    fn set_value(&mut self, id: &str, value: &str) -> bool;
}
