use serde_json::Value;

/// A detail-table cell, classified once into an explicit shape instead of
/// probing the raw JSON for keys at every use site.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Scalar: string, number, bool or null
    Primitive(Value),
    /// Object identifying a fetched resource by URL
    UrlRef(String),
    /// Object identifying an HTML element by snippet or selector
    NodeRef(String),
    /// Object pointing at a source location via a nested `source` object
    SourceLocation(Box<CellValue>),
    /// Object wrapping its payload in a `value` field
    Wrapped(Box<CellValue>),
    /// Anything else, reduced to the best string we can make of it
    Opaque(String),
}

impl CellValue {
    /// Classify a raw JSON value. Objects are inspected once, here; callers
    /// match on the variant and never look at raw keys again.
    pub fn classify(raw: &Value) -> CellValue {
        match raw {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                CellValue::Primitive(raw.clone())
            }
            Value::Array(elements) => {
                let joined = elements
                    .iter()
                    .map(|e| CellValue::classify(e).render())
                    .collect::<Vec<_>>()
                    .join(", ");
                CellValue::Opaque(joined)
            }
            Value::Object(map) => {
                if let Some(Value::String(url)) = map.get("url") {
                    return CellValue::UrlRef(url.clone());
                }
                if let Some(Value::String(snippet)) = map.get("snippet") {
                    return CellValue::NodeRef(snippet.clone());
                }
                if let Some(Value::String(selector)) = map.get("selector") {
                    return CellValue::NodeRef(selector.clone());
                }
                if let Some(source) = map.get("source") {
                    return CellValue::SourceLocation(Box::new(CellValue::classify(source)));
                }
                if let Some(value) = map.get("value") {
                    return CellValue::Wrapped(Box::new(CellValue::classify(value)));
                }
                CellValue::Opaque(best_effort_string(map))
            }
        }
    }

    /// Display string for the cell. Exhaustive over every variant, so no
    /// shape can reach the output unrendered.
    pub fn render(&self) -> String {
        match self {
            CellValue::Primitive(value) => render_scalar(value),
            CellValue::UrlRef(url) => url.clone(),
            CellValue::NodeRef(label) => label.clone(),
            CellValue::SourceLocation(inner) => inner.render(),
            CellValue::Wrapped(inner) => inner.render(),
            CellValue::Opaque(text) => text.clone(),
        }
    }

    /// Numeric view of the cell, if it has one. Unit-aware formatting in the
    /// flattener needs the raw magnitude, not the display string.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Primitive(Value::Number(n)) => n.as_f64(),
            CellValue::SourceLocation(inner) | CellValue::Wrapped(inner) => inner.as_f64(),
            _ => None,
        }
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            Some(f) => format!("{}", f),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

/// Fallback for object shapes we do not recognize: prefer a human-readable
/// field, else compact JSON so the cell still holds something inspectable.
fn best_effort_string(map: &serde_json::Map<String, Value>) -> String {
    for field in ["text", "label", "nodeLabel", "name"] {
        if let Some(Value::String(s)) = map.get(field) {
            return s.clone();
        }
    }
    serde_json::to_string(&Value::Object(map.clone())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_string_renders_as_is() {
        let cell = CellValue::classify(&json!("a.css"));
        assert_eq!(cell, CellValue::Primitive(json!("a.css")));
        assert_eq!(cell.render(), "a.css");
    }

    #[test]
    fn test_whole_number_renders_without_fraction() {
        assert_eq!(CellValue::classify(&json!(2048.0)).render(), "2048");
        assert_eq!(CellValue::classify(&json!(1.5)).render(), "1.5");
    }

    #[test]
    fn test_url_object_unwraps_to_url() {
        let cell = CellValue::classify(&json!({"url": "https://a.test/x.js", "totalBytes": 10}));
        assert_eq!(cell.render(), "https://a.test/x.js");
    }

    #[test]
    fn test_node_object_prefers_snippet_over_selector() {
        let cell = CellValue::classify(&json!({"snippet": "<img src=x>", "selector": "img"}));
        assert_eq!(cell.render(), "<img src=x>");

        let cell = CellValue::classify(&json!({"selector": "div.hero"}));
        assert_eq!(cell.render(), "div.hero");
    }

    #[test]
    fn test_nested_source_recurses() {
        let cell = CellValue::classify(&json!({"source": {"url": "https://a.test/app.js"}}));
        assert_eq!(cell.render(), "https://a.test/app.js");
    }

    #[test]
    fn test_wrapped_value_unwraps() {
        let cell = CellValue::classify(&json!({"value": 42}));
        assert_eq!(cell.render(), "42");
        assert_eq!(cell.as_f64(), Some(42.0));
    }

    #[test]
    fn test_unrecognized_object_never_renders_raw_structure() {
        let cell = CellValue::classify(&json!({"nodeLabel": "Hero image"}));
        assert_eq!(cell.render(), "Hero image");

        // No readable field at all: compact JSON beats an opaque Debug dump
        let cell = CellValue::classify(&json!({"weird": [1, 2]}));
        assert_eq!(cell.render(), r#"{"weird":[1,2]}"#);
    }
}
