use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// Attribute set on the bound root so a second `initialize` can be refused.
pub const BOUND_MARKER: &str = "data-upload-controller";

/// Subtree the page elements are looked up in.
#[derive(Clone)]
pub struct Scope {
    root: Element,
}

impl Scope {
    pub fn new(root: Option<Element>, document: &Document) -> Result<Self, JsValue> {
        let root = match root {
            Some(root) => root,
            None => document
                .document_element()
                .ok_or_else(|| JsValue::from_str("Missing document element"))?,
        };
        Ok(Self { root })
    }

    pub fn is_bound(&self) -> bool {
        self.root.has_attribute(BOUND_MARKER)
    }

    pub fn mark_bound(&self) -> Result<(), JsValue> {
        self.root.set_attribute(BOUND_MARKER, "bound")
    }

    /// Finds a required element by id and casts it to the expected type.
    pub fn element<T: JsCast>(&self, id: &str) -> Result<T, JsValue> {
        self.root
            .query_selector(&id_selector(id))?
            .ok_or_else(|| JsValue::from_str(&format!("Missing element #{id}")))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("Element #{id} has an unexpected type")))
    }

    pub fn query(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.root.query_selector(selector)
    }
}

/// Attribute selector for an id, so ids need no CSS identifier escaping.
pub fn id_selector(id: &str) -> String {
    format!("[id=\"{}\"]", quote_attribute(id))
}

pub fn checked_radio_selector(group: &str) -> String {
    format!("input[name=\"{}\"]:checked", quote_attribute(group))
}

fn quote_attribute(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Readable text for a thrown JS value.
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_selector_quotes_special_characters() {
        assert_eq!(id_selector("upload-btn"), "[id=\"upload-btn\"]");
        assert_eq!(id_selector("a\"b"), "[id=\"a\\\"b\"]");
    }

    #[test]
    fn checked_radio_selector_targets_group() {
        assert_eq!(
            checked_radio_selector("analysis_type"),
            "input[name=\"analysis_type\"]:checked"
        );
    }
}
