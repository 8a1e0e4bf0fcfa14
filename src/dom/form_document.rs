use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::autofill::checkbox::{checkbox_for, value_id};
use crate::autofill::model::display_value;
use crate::dom::document::{Document, InputElement};

/// A single form control held by [`FormDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormControl {
    pub id: String,
    pub tag: String,
    pub input_type: String,
    pub checked: bool,
    pub value: String,
    pub attributes: BTreeMap<String, String>,
}

impl FormControl {
    pub fn input(id: &str, value: &str) -> Self {
        Self {
            id: id.to_string(),
            tag: "input".into(),
            input_type: "text".into(),
            checked: false,
            value: value.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn checkbox(id: &str, checked: bool) -> Self {
        Self {
            input_type: "checkbox".into(),
            checked,
            value: "on".into(),
            ..Self::input(id, "")
        }
    }

    pub fn select(id: &str, value: &str) -> Self {
        Self {
            tag: "select".into(),
            input_type: String::new(),
            ..Self::input(id, value)
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

/// In-memory document of form controls, kept in document order.
///
/// Lookups by id return the first matching control, the same way
/// `getElementById` does when ids are duplicated.
#[derive(Debug, Clone, Default)]
pub struct FormDocument {
    controls: Vec<FormControl>,
}

impl FormDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, control: FormControl) -> Self {
        self.controls.push(control);
        self
    }

    /// Convenience for the common `<input id=.. value=..>` case.
    pub fn with_input(self, id: &str, value: &str) -> Self {
        self.with(FormControl::input(id, value))
    }

    /// Adds an autofill checkbox pointing at `target`.
    pub fn with_autofill_checkbox(self, id: &str, target: &str, checksum: &str, checked: bool) -> Self {
        self.with(
            FormControl::checkbox(id, checked)
                .with_attribute("target", target)
                .with_attribute("checksum", checksum),
        )
    }

    /// Renders entity field `name` the way the entity form does: a
    /// `<name>-value` input followed by its autofill checkbox, if offered.
    /// Booleans become a checkbox input of their own.
    pub fn with_field(mut self, name: &str, value: &Value) -> Self {
        let id = value_id(name);
        let input = match value {
            Value::Bool(b) => FormControl {
                value: "true".into(),
                ..FormControl::checkbox(&id, *b)
            },
            Value::Number(_) => FormControl {
                input_type: "number".into(),
                ..FormControl::input(&id, &display_value(value))
            },
            _ => FormControl::input(&id, &display_value(value)),
        };
        self.controls.push(input);
        self.controls.extend(checkbox_for(name, value));
        self
    }

    pub fn with_select(self, id: &str, value: &str) -> Self {
        self.with(FormControl::select(id, value))
    }

    pub fn controls(&self) -> &[FormControl] {
        &self.controls
    }

    /// Current `id -> value` of every control that has an id.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.controls
            .iter()
            .filter(|c| !c.id.is_empty())
            .map(|c| (c.id.clone(), c.value.clone()))
            .collect()
    }

    fn find(&self, id: &str) -> Option<&FormControl> {
        self.controls.iter().find(|c| c.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut FormControl> {
        self.controls.iter_mut().find(|c| c.id == id)
    }

    /// Load the form controls of an HTML page.
    pub fn from_html(source: &str) -> Self {
        let html = Html::parse_document(source);
        let control_sel =
            Selector::parse("input, select, textarea").expect("control selector is valid");
        let option_sel = Selector::parse("option").expect("option selector is valid");

        let controls = html
            .select(&control_sel)
            .map(|el| control_from_element(el, &option_sel))
            .collect();

        Self { controls }
    }
}

fn control_from_element(el: ElementRef<'_>, option_sel: &Selector) -> FormControl {
    let node = el.value();
    let tag = node.name().to_lowercase();
    let attributes: BTreeMap<String, String> = node
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let value = match tag.as_str() {
        "select" => {
            let options: Vec<ElementRef<'_>> = el.select(option_sel).collect();
            options
                .iter()
                .find(|o| o.value().attr("selected").is_some())
                .or(options.first())
                .map(|o| {
                    o.value()
                        .attr("value")
                        .map(String::from)
                        .unwrap_or_else(|| o.text().collect::<String>().trim().to_string())
                })
                .unwrap_or_default()
        }
        "textarea" => el.text().collect(),
        _ => node.attr("value").unwrap_or_default().to_string(),
    };

    let input_type = if tag == "input" {
        node.attr("type").unwrap_or("text").to_lowercase()
    } else {
        String::new()
    };

    FormControl {
        id: node.id().unwrap_or_default().to_string(),
        checked: node.attr("checked").is_some(),
        tag,
        input_type,
        value,
        attributes,
    }
}

impl Document for FormDocument {
    fn inputs(&self) -> Vec<InputElement> {
        self.controls
            .iter()
            .filter(|c| c.tag == "input")
            .map(|c| InputElement {
                id: c.id.clone(),
                input_type: c.input_type.clone(),
                checked: c.checked,
            })
            .collect()
    }

    fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    fn get_attribute(&self, id: &str, name: &str) -> Option<String> {
        let control = self.find(id)?;
        match name {
            "id" => Some(control.id.clone()),
            _ => control.attributes.get(name).cloned(),
        }
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> bool {
        match self.find_mut(id) {
            Some(control) => {
                control.attributes.insert(name.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    fn get_value(&self, id: &str) -> Option<String> {
        self.find(id).map(|c| c.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) -> bool {
        match self.find_mut(id) {
            Some(control) => {
                control.value = value.to_string();
                true
            }
            None => false,
        }
    }
}
